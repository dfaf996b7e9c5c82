//! Fake camera and window shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use ec_placer::camera::{CameraError, Color, Frame, FrameFormat, VideoSource};
use ec_placer::display::{DisplayError, PreviewWindow};

/// Frame whose red channel encodes `x % 256` and blue `y % 256`.
pub fn coordinate_frame(width: u32, height: u32) -> Frame {
    let mut frame = Frame::blank(width, height, FrameFormat::Bgr);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            frame.put_pixel(x, y, Color::rgb((x % 256) as u8, 0, (y % 256) as u8));
        }
    }
    frame
}

/// What happened to a fake camera, observable after it is moved into a view.
#[derive(Debug, Default)]
pub struct CameraLog {
    pub reads: usize,
    pub releases: usize,
}

/// A camera that replays a script of frames and failures.
///
/// Once the script runs out it keeps returning `fallback` (or failing when
/// there is none).
pub struct FakeCamera {
    pub name: String,
    pub script: VecDeque<Option<Frame>>,
    pub fallback: Option<Frame>,
    pub log: Rc<RefCell<CameraLog>>,
}

impl FakeCamera {
    pub fn steady(name: &str, frame: Frame) -> (Self, Rc<RefCell<CameraLog>>) {
        let log = Rc::new(RefCell::new(CameraLog::default()));
        let camera = Self {
            name: name.to_string(),
            script: VecDeque::new(),
            fallback: Some(frame),
            log: Rc::clone(&log),
        };
        (camera, log)
    }

    pub fn dead(name: &str) -> (Self, Rc<RefCell<CameraLog>>) {
        let log = Rc::new(RefCell::new(CameraLog::default()));
        let camera = Self {
            name: name.to_string(),
            script: VecDeque::new(),
            fallback: None,
            log: Rc::clone(&log),
        };
        (camera, log)
    }
}

impl VideoSource for FakeCamera {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        self.log.borrow_mut().reads += 1;
        let next = match self.script.pop_front() {
            Some(step) => step,
            None => self.fallback.clone(),
        };
        next.ok_or_else(|| CameraError::ReadFailed("scripted failure".to_string()))
    }

    fn release(&mut self) -> Result<(), CameraError> {
        self.log.borrow_mut().releases += 1;
        Ok(())
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// A window that replays key codes and records what it was shown.
#[derive(Default)]
pub struct FakeWindow {
    pub keys: VecDeque<Option<i32>>,
    pub shown: Rc<RefCell<Vec<Frame>>>,
    pub closed: Rc<RefCell<usize>>,
}

impl FakeWindow {
    /// Replays `keys`, then presses Escape.
    pub fn with_keys(keys: &[Option<i32>]) -> Self {
        let mut keys: VecDeque<Option<i32>> = keys.iter().copied().collect();
        keys.push_back(Some(27));
        Self {
            keys,
            ..Default::default()
        }
    }
}

impl PreviewWindow for FakeWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.shown.borrow_mut().push(frame.clone());
        Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<i32>, DisplayError> {
        Ok(self.keys.pop_front().unwrap_or(Some(27)))
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        *self.closed.borrow_mut() += 1;
        Ok(())
    }
}
