//! Test doubles for graphics contexts.
//!
//! [`install_mock_canvas`] builds a fresh [`MockCanvas`] from a caller-supplied
//! factory, applies attribute overrides and attaches it to any
//! [`CanvasHost`]. [`MockContext`] is a host backed by an in-memory
//! framebuffer, so captures behave as they would against a real surface.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use gl_parity_core::{Dimensions, Error, Result};
use serde_json::Value;

use crate::surface::{PixelFormat, PixelRect, Surface};

/// Attribute holding the reported display width.
pub const CLIENT_WIDTH: &str = "clientWidth";

/// Attribute holding the reported display height.
pub const CLIENT_HEIGHT: &str = "clientHeight";

/// A placeholder drawing surface: a bag of writable attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockCanvas {
    attributes: BTreeMap<String, Value>,
}

impl MockCanvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas reporting the given display size.
    pub fn with_size(width: u32, height: u32) -> Self {
        let mut canvas = Self::new();
        canvas.set(CLIENT_WIDTH, width);
        canvas.set(CLIENT_HEIGHT, height);
        canvas
    }

    /// Read an attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Overwrite an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Read an attribute as a non-negative integer.
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        let value = self.get(name)?;
        value
            .as_u64()
            .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Reported display width.
    pub fn client_width(&self) -> Option<u32> {
        self.get_u32(CLIENT_WIDTH)
    }

    /// Reported display height.
    pub fn client_height(&self) -> Option<u32> {
        self.get_u32(CLIENT_HEIGHT)
    }

    /// Number of attributes set.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// True when no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// A graphics-context double that can carry a canvas.
pub trait CanvasHost {
    /// Attach `canvas`, replacing any canvas attached earlier.
    fn attach_canvas(&mut self, canvas: MockCanvas);
}

/// Build a fresh canvas with `factory`, apply `attributes` as writable
/// overrides, and attach it to `host`.
///
/// Every call constructs a new canvas, so nothing leaks from earlier calls.
pub fn install_mock_canvas<H, F, I, K>(host: &mut H, factory: F, attributes: I)
where
    H: CanvasHost + ?Sized,
    F: FnOnce() -> MockCanvas,
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut canvas = factory();
    for (name, value) in attributes {
        canvas.set(name, value);
    }
    tracing::trace!("Installing mock canvas with {} attributes", canvas.len());
    host.attach_canvas(canvas);
}

/// In-memory graphics context with an RGBA framebuffer.
///
/// The display size comes from the attached canvas, not the framebuffer,
/// so tests can report any size they like.
#[derive(Debug)]
pub struct MockContext {
    framebuffer: Vec<u8>,
    dimensions: Dimensions,
    canvas: Option<MockCanvas>,
    reads: AtomicUsize,
}

impl MockContext {
    /// Create a context with a transparent black framebuffer and no canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let dimensions = Dimensions::new(width, height);
        Self {
            framebuffer: vec![0; dimensions.rgba_len()],
            dimensions,
            canvas: None,
            reads: AtomicUsize::new(0),
        }
    }

    /// Create a context filled with `rgba` and a canvas reporting its size.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut context = Self::new(width, height);
        context.fill(rgba);
        context.attach_canvas(MockCanvas::with_size(width, height));
        context
    }

    /// Framebuffer size.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Paint the whole framebuffer.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for pixel in self.framebuffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Paint one pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(offset) = self.offset(x, y) {
            self.framebuffer[offset..offset + 4].copy_from_slice(&rgba);
        }
    }

    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.framebuffer[offset..offset + 4]);
        Some(rgba)
    }

    /// Attached canvas.
    pub fn canvas(&self) -> Option<&MockCanvas> {
        self.canvas.as_ref()
    }

    /// Attached canvas, mutably, for tests that change reported attributes.
    pub fn canvas_mut(&mut self) -> Option<&mut MockCanvas> {
        self.canvas.as_mut()
    }

    /// Number of pixel readbacks performed so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return None;
        }
        Some((y as usize * self.dimensions.width as usize + x as usize) * 4)
    }
}

impl CanvasHost for MockContext {
    fn attach_canvas(&mut self, canvas: MockCanvas) {
        self.canvas = Some(canvas);
    }
}

impl Surface for MockContext {
    fn display_width(&self) -> Option<u32> {
        self.canvas.as_ref().and_then(MockCanvas::client_width)
    }

    fn display_height(&self) -> Option<u32> {
        self.canvas.as_ref().and_then(MockCanvas::client_height)
    }

    /// Pixels outside the framebuffer read back as transparent black.
    fn read_pixels(&self, rect: PixelRect, format: PixelFormat) -> Result<Vec<u8>> {
        if rect.dimensions().is_empty() {
            return Err(Error::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            });
        }
        self.reads.fetch_add(1, Ordering::SeqCst);

        let bpp = format.bytes_per_pixel();
        let mut pixels = vec![0u8; rect.dimensions().pixel_count() * bpp];
        for row in 0..rect.height {
            for col in 0..rect.width {
                let source = rect
                    .x
                    .checked_add(col)
                    .zip(rect.y.checked_add(row))
                    .and_then(|(x, y)| self.offset(x, y));
                if let Some(offset) = source {
                    let target = (row as usize * rect.width as usize + col as usize) * bpp;
                    pixels[target..target + bpp]
                        .copy_from_slice(&self.framebuffer[offset..offset + bpp]);
                }
            }
        }
        Ok(pixels)
    }
}
