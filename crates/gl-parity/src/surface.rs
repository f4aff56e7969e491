//! The graphics surface consumed by captures.

use gl_parity_core::{Dimensions, Error, Result};

/// Pixel layout requested from a readback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// Packed 8-bit red, green, blue, alpha
    #[default]
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Rectangle of a readback, origin at the surface's first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// First row
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Rectangle anchored at the origin.
    pub fn from_origin(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Size of the rectangle.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// A rendered surface that can report its display size and read back pixels.
pub trait Surface: Send + Sync {
    /// Display width, if the surface reports one.
    fn display_width(&self) -> Option<u32>;

    /// Display height, if the surface reports one.
    fn display_height(&self) -> Option<u32>;

    /// Read the pixels of `rect` in `format`.
    ///
    /// The returned buffer holds `rect.width * rect.height` pixels, row-major.
    fn read_pixels(&self, rect: PixelRect, format: PixelFormat) -> Result<Vec<u8>>;

    /// Positive display size, or [`Error::MissingDimensions`].
    fn display_size(&self) -> Result<Dimensions> {
        let width = self.display_width().unwrap_or(0);
        let height = self.display_height().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(Error::MissingDimensions { width, height });
        }
        Ok(Dimensions::new(width, height))
    }
}
