//! Default per-pixel comparator.
//!
//! Strict comparisons demand identical RGBA channels. Non-strict comparisons
//! demand identical alpha and a CIE76 color distance (in Lab space) no larger
//! than the configured tolerance.

use gl_parity_core::error::BoxError;
use gl_parity_core::Dimensions;
use image::{Rgba, RgbaImage};

use crate::comparator::{CompareOptions, DiffOptions, ImageComparator};

/// Per-pixel comparator backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelComparator;

impl PixelComparator {
    /// Create a new pixel comparator.
    pub fn new() -> Self {
        Self
    }

    /// Count pixels judged different. Rasters of different sizes count every
    /// pixel outside their overlap as different.
    pub fn count_mismatches(
        &self,
        reference: &RgbaImage,
        current: &RgbaImage,
        options: &CompareOptions,
    ) -> u64 {
        let ref_dims = dimensions(reference);
        let cur_dims = dimensions(current);
        let canvas = ref_dims.union(cur_dims);

        let mut mismatches = 0u64;
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                match (pixel_at(reference, x, y), pixel_at(current, x, y)) {
                    (Some(a), Some(b)) if pixels_match(a, b, options) => {}
                    _ => mismatches += 1,
                }
            }
        }
        mismatches
    }
}

impl ImageComparator for PixelComparator {
    fn compare(
        &self,
        reference: &RgbaImage,
        current: &RgbaImage,
        options: &CompareOptions,
    ) -> Result<bool, BoxError> {
        if reference.dimensions() != current.dimensions() {
            tracing::debug!(
                "Dimension mismatch: reference {}, current {}",
                dimensions(reference),
                dimensions(current)
            );
            return Ok(false);
        }

        Ok(reference
            .pixels()
            .zip(current.pixels())
            .all(|(a, b)| pixels_match(a, b, options)))
    }

    fn render_diff(
        &self,
        reference: &RgbaImage,
        current: &RgbaImage,
        options: &DiffOptions,
    ) -> Result<RgbaImage, BoxError> {
        let canvas = dimensions(reference).union(dimensions(current));
        let highlight = Rgba(options.highlight_color.to_rgba());

        let diff = RgbaImage::from_fn(canvas.width, canvas.height, |x, y| {
            match (pixel_at(reference, x, y), pixel_at(current, x, y)) {
                (Some(a), Some(b)) if pixels_match(a, b, &options.compare) => *a,
                _ => highlight,
            }
        });

        Ok(diff)
    }

    fn name(&self) -> &'static str {
        "pixel"
    }
}

fn dimensions(image: &RgbaImage) -> Dimensions {
    let (width, height) = image.dimensions();
    Dimensions::new(width, height)
}

fn pixel_at(image: &RgbaImage, x: u32, y: u32) -> Option<&Rgba<u8>> {
    if x < image.width() && y < image.height() {
        Some(image.get_pixel(x, y))
    } else {
        None
    }
}

fn pixels_match(a: &Rgba<u8>, b: &Rgba<u8>, options: &CompareOptions) -> bool {
    if a == b {
        return true;
    }
    if options.strict || a[3] != b[3] {
        return false;
    }
    delta_e(a, b) <= options.tolerance
}

/// CIE76 distance between two colors, ignoring alpha.
fn delta_e(a: &Rgba<u8>, b: &Rgba<u8>) -> f64 {
    let [l1, a1, b1] = to_lab(a);
    let [l2, a2, b2] = to_lab(b);
    ((l1 - l2).powi(2) + (a1 - a2).powi(2) + (b1 - b2).powi(2)).sqrt()
}

/// sRGB (D65) to CIE Lab.
fn to_lab(pixel: &Rgba<u8>) -> [f64; 3] {
    let r = linearize(pixel[0]);
    let g = linearize(pixel[1]);
    let b = linearize(pixel[2]);

    let x = (0.4124 * r + 0.3576 * g + 0.1805 * b) / 0.95047;
    let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let z = (0.0193 * r + 0.1192 * g + 0.9505 * b) / 1.08883;

    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    const EPSILON: f64 = 216.0 / 24389.0;
    const KAPPA: f64 = 24389.0 / 27.0;
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}
