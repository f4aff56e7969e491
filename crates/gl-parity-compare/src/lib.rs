//! # gl-parity-compare
//!
//! Image comparison capability for gl-parity.
//!
//! This crate provides:
//! - The [`ImageComparator`] trait: equality judgment plus diff rendering
//! - [`PixelComparator`], the default per-pixel implementation
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on gl-parity-core only.
//! The parity checker accepts any [`ImageComparator`], so exact, perceptual
//! or GPU-backed implementations can be swapped in without touching it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comparator;
pub mod pixel;

// Re-export commonly used types
pub use comparator::{CompareOptions, DiffOptions, ImageComparator};
pub use image::RgbaImage;
pub use pixel::PixelComparator;
