//! The comparison capability consumed by the parity checker.

use gl_parity_core::error::BoxError;
use gl_parity_core::{HighlightColor, ParityConfig};
use image::RgbaImage;

/// Strictness of an equality judgment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Require exact pixel equality
    pub strict: bool,
    /// Largest color distance tolerated when not strict
    pub tolerance: f64,
}

impl CompareOptions {
    /// Strict options (tolerance is ignored).
    pub fn strict() -> Self {
        Self {
            strict: true,
            tolerance: 0.0,
        }
    }

    /// Non-strict options with the given tolerance.
    pub fn tolerant(tolerance: f64) -> Self {
        Self {
            strict: false,
            tolerance,
        }
    }

    /// Options for `strict`, taking the tolerance from `config`.
    pub fn from_config(config: &ParityConfig, strict: bool) -> Self {
        Self {
            strict,
            tolerance: config.tolerance,
        }
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Options for rendering a diff: the comparison judgment plus a highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffOptions {
    /// Judgment used to decide which pixels differ
    pub compare: CompareOptions,
    /// Color painted over differing pixels
    pub highlight_color: HighlightColor,
}

impl DiffOptions {
    /// Diff options matching `compare`, highlighted with `config`'s color.
    pub fn from_config(config: &ParityConfig, compare: CompareOptions) -> Self {
        Self {
            compare,
            highlight_color: config.highlight_color,
        }
    }
}

/// Equality judgment and diff rendering over decoded RGBA rasters.
///
/// Implementations must render diffs with the same judgment `compare` uses,
/// so the highlighted image agrees with the pass/fail result.
pub trait ImageComparator: Send + Sync {
    /// Decide whether `reference` and `current` are equal.
    ///
    /// Rasters of different sizes are unequal, not an error.
    fn compare(
        &self,
        reference: &RgbaImage,
        current: &RgbaImage,
        options: &CompareOptions,
    ) -> Result<bool, BoxError>;

    /// Render an image highlighting where `current` departs from `reference`.
    fn render_diff(
        &self,
        reference: &RgbaImage,
        current: &RgbaImage,
        options: &DiffOptions,
    ) -> Result<RgbaImage, BoxError>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}
