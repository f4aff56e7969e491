//! # gl-parity-core
//!
//! Core types for gl-parity.
//!
//! This crate contains the fundamental types with **no internal dependencies**
//! on other gl-parity crates. It provides:
//!
//! - Run mode selection (record a new baseline vs. verify against one)
//! - Postfix and highlight configuration
//! - Artifact path resolution (reference, current capture, diff)
//! - Dimensions and highlight color types
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other gl-parity crates.

#![warn(missing_docs)]

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod mode;
pub mod paths;

// Re-export commonly used types
pub use color::HighlightColor;
pub use config::{ParityConfig, ParityContext, CONFIG_ENV_VAR};
pub use error::{BoxError, Error, Result};
pub use geometry::Dimensions;
pub use mode::{RunMode, MODE_ENV_VAR};
pub use paths::ImagePaths;
