//! OpenCV backend: `videoio` cameras and a `highgui` preview window.

use std::time::Duration;

use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::prelude::*;
use opencv::{highgui, videoio};

use crate::camera::{
    CameraError, CameraInfo, CameraSettings, Frame, FrameFormat, Resolution, VideoSource,
};
use crate::display::{DisplayError, PreviewWindow};

/// A camera opened through `cv::VideoCapture`.
pub struct OpenCvCamera {
    capture: videoio::VideoCapture,
    index: i32,
    released: bool,
}

impl OpenCvCamera {
    /// Open device `settings.device_index` and request `settings.resolution`.
    ///
    /// The driver picks the closest mode it supports; the actual size is
    /// whatever the first frame reports.
    ///
    /// # Errors
    /// * `CameraError::OpenFailed` - OpenCV raised while opening
    /// * `CameraError::NotAvailable` - the device did not open
    pub fn open(settings: &CameraSettings) -> Result<Self, CameraError> {
        let index = settings.device_index;
        let open_failed = |e: opencv::Error| CameraError::OpenFailed {
            index,
            message: e.to_string(),
        };

        let mut capture = videoio::VideoCapture::new(index, videoio::CAP_ANY).map_err(open_failed)?;
        if !capture.is_opened().map_err(open_failed)? {
            return Err(CameraError::NotAvailable(index));
        }

        let requested = [
            (videoio::CAP_PROP_FRAME_WIDTH, settings.resolution.width),
            (videoio::CAP_PROP_FRAME_HEIGHT, settings.resolution.height),
        ];
        for (prop, value) in requested {
            if !capture.set(prop, value as f64).map_err(open_failed)? {
                log::debug!("Camera {} ignored capture property {}", index, prop);
            }
        }

        Ok(Self {
            capture,
            index,
            released: false,
        })
    }

    /// Name of the OpenCV capture API in use (V4L2, MSMF, AVFOUNDATION, ...).
    pub fn backend_name(&self) -> String {
        self.capture
            .get_backend_name()
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

impl VideoSource for OpenCvCamera {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        if self.released {
            return Err(CameraError::ReadFailed("camera released".to_string()));
        }

        let mut mat = Mat::default();
        let ok = self
            .capture
            .read(&mut mat)
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        if !ok || mat.empty() {
            return Err(CameraError::ReadFailed("empty frame".to_string()));
        }

        mat_to_frame(&mat)
    }

    fn release(&mut self) -> Result<(), CameraError> {
        if self.released {
            return Ok(());
        }
        self.capture
            .release()
            .map_err(|e| CameraError::ReleaseFailed(e.to_string()))?;
        self.released = true;
        Ok(())
    }

    fn label(&self) -> String {
        format!("camera {}", self.index)
    }
}

fn mat_to_frame(mat: &Mat) -> Result<Frame, CameraError> {
    if mat.typ() != CV_8UC3 {
        return Err(CameraError::UnsupportedFrame(format!(
            "expected 8-bit 3-channel, got type {}",
            mat.typ()
        )));
    }

    let to_read_err = |e: opencv::Error| CameraError::ReadFailed(e.to_string());
    let data = if mat.is_continuous() {
        mat.data_bytes().map_err(to_read_err)?.to_vec()
    } else {
        let packed = mat.try_clone().map_err(to_read_err)?;
        packed.data_bytes().map_err(to_read_err)?.to_vec()
    };

    Ok(Frame {
        data,
        width: mat.cols() as u32,
        height: mat.rows() as u32,
        format: FrameFormat::Bgr,
    })
}

fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height as i32,
        frame.width as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    let dst = mat.data_bytes_mut()?;
    match frame.format {
        FrameFormat::Bgr => dst.copy_from_slice(&frame.data),
        FrameFormat::Rgb => {
            for (d, s) in dst.chunks_exact_mut(3).zip(frame.data.chunks_exact(3)) {
                d[0] = s[2];
                d[1] = s[1];
                d[2] = s[0];
            }
        }
    }
    Ok(mat)
}

/// A `highgui` named window.
pub struct HighGuiWindow {
    title: String,
    open: bool,
}

impl HighGuiWindow {
    pub fn create(title: &str) -> Result<Self, DisplayError> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE).map_err(|e| {
            DisplayError::CreateFailed {
                title: title.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            title: title.to_string(),
            open: true,
        })
    }
}

impl PreviewWindow for HighGuiWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let mat = frame_to_mat(frame).map_err(|e| DisplayError::ShowFailed(e.to_string()))?;
        highgui::imshow(&self.title, &mat).map_err(|e| DisplayError::ShowFailed(e.to_string()))
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<i32>, DisplayError> {
        // 0 would block forever
        let delay = timeout.as_millis().clamp(1, i32::MAX as u128) as i32;
        let code =
            highgui::wait_key_ex(delay).map_err(|e| DisplayError::PollFailed(e.to_string()))?;
        Ok((code >= 0).then_some(code))
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        highgui::destroy_window(&self.title)
            .and_then(|_| highgui::destroy_all_windows())
            .map_err(|e| DisplayError::CloseFailed(e.to_string()))
    }
}

/// Probe device indices `0..probe` and report the ones that deliver frames.
pub fn list_devices(probe: i32) -> Vec<CameraInfo> {
    let mut found = Vec::new();

    for index in 0..probe.max(0) {
        let settings = CameraSettings {
            device_index: index,
            resolution: Resolution::QHD,
        };
        let mut camera = match OpenCvCamera::open(&settings) {
            Ok(camera) => camera,
            Err(e) => {
                log::debug!("{}", e);
                continue;
            }
        };

        match camera.read_frame() {
            Ok(frame) => found.push(CameraInfo {
                index,
                resolution: Resolution::new(frame.width, frame.height),
                backend: camera.backend_name(),
            }),
            Err(e) => log::debug!("Camera {}: {}", index, e),
        }

        if let Err(e) = camera.release() {
            log::debug!("{}", e);
        }
    }

    found
}
