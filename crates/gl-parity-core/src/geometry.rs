//! Geometry types for surfaces and rasters.

use serde::{Deserialize, Serialize};

/// Size of a surface or raster in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of a packed 8-bit RGBA buffer of this size.
    pub fn rgba_len(&self) -> usize {
        self.pixel_count() * 4
    }

    /// Smallest dimensions containing both `self` and `other`.
    pub fn union(&self, other: Dimensions) -> Dimensions {
        Dimensions::new(self.width.max(other.width), self.height.max(other.height))
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
