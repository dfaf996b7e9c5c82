//! Camera types and data structures.

use std::fmt;
use std::str::FromStr;

use crate::geometry::Vec2;

/// A camera found by probing device indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: i32,
    /// Resolution of the first frame it delivered
    pub resolution: Resolution,
    /// Capture backend that opened it
    pub backend: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.resolution, self.backend)
    }
}

/// Camera resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Full HD (1920x1080) - default preview display size
    pub const FULL_HD: Resolution = Resolution {
        width: 1920,
        height: 1080,
    };

    /// QHD (2560x1440) - requested from cameras so they deliver their best mode
    pub const QHD: Resolution = Resolution {
        width: 2560,
        height: 1440,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    /// Parse `WIDTHxHEIGHT` (e.g. `1920x1080`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid resolution format '{}'. Use WIDTHxHEIGHT (e.g., 1920x1080)",
                s
            ));
        }
        let width: u32 = parts[0]
            .trim()
            .parse()
            .map_err(|_| format!("Invalid width '{}' in resolution", parts[0]))?;
        let height: u32 = parts[1]
            .trim()
            .parse()
            .map_err(|_| format!("Invalid height '{}' in resolution", parts[1]))?;
        if width == 0 || height == 0 {
            return Err("Resolution width and height must be greater than 0".to_string());
        }
        if width > 7680 || height > 4320 {
            return Err("Resolution exceeds maximum supported (7680x4320)".to_string());
        }
        Ok(Resolution { width, height })
    }
}

/// Channel order of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// R, G, B (3 bytes per pixel)
    Rgb,
    /// B, G, R (3 bytes per pixel), what OpenCV delivers
    Bgr,
}

/// An RGB color, written into frames in the frame's own channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A 3-channel image, row-major, tightly packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Channel order
    pub format: FrameFormat,
}

impl Frame {
    /// Create a black frame.
    pub fn blank(width: u32, height: u32, format: FrameFormat) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * 3],
            width,
            height,
            format,
        }
    }

    /// Create a frame filled with one color.
    pub fn filled(width: u32, height: u32, format: FrameFormat, color: Color) -> Self {
        let mut frame = Self::blank(width, height, format);
        let px = encode(format, color);
        for chunk in frame.data.chunks_exact_mut(3) {
            chunk.copy_from_slice(&px);
        }
        frame
    }

    /// Get the number of bytes per pixel (3 for both supported formats).
    pub fn bytes_per_pixel(&self) -> usize {
        match self.format {
            FrameFormat::Rgb | FrameFormat::Bgr => 3,
        }
    }

    /// Frame dimensions as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as i32, self.height as i32)
    }

    fn offset_of(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.bytes_per_pixel()
    }

    /// Read the pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = self.offset_of(x, y);
        let px = [self.data[i], self.data[i + 1], self.data[i + 2]];
        decode(self.format, px)
    }

    /// Write the pixel at `(x, y)`; silently ignores out-of-bounds coordinates.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = self.offset_of(x as u32, y as u32);
        self.data[i..i + 3].copy_from_slice(&encode(self.format, color));
    }
}

fn encode(format: FrameFormat, c: Color) -> [u8; 3] {
    match format {
        FrameFormat::Rgb => [c.r, c.g, c.b],
        FrameFormat::Bgr => [c.b, c.g, c.r],
    }
}

fn decode(format: FrameFormat, px: [u8; 3]) -> Color {
    match format {
        FrameFormat::Rgb => Color::rgb(px[0], px[1], px[2]),
        FrameFormat::Bgr => Color::rgb(px[2], px[1], px[0]),
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// Failed to open camera
    #[error("Failed to open camera {index}: {message}")]
    OpenFailed { index: i32, message: String },
    /// Device opened but reports it is not usable
    #[error("Camera {0} is not available")]
    NotAvailable(i32),
    /// Failed to read a frame (end of stream or device error)
    #[error("Failed to read frame: {0}")]
    ReadFailed(String),
    /// Frame arrived in a layout we cannot handle
    #[error("Unsupported frame: {0}")]
    UnsupportedFrame(String),
    /// Failed to release the device
    #[error("Failed to release camera: {0}")]
    ReleaseFailed(String),
}
