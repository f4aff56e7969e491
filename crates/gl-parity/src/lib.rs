//! # gl-parity
//!
//! Visual regression helpers for rendered graphics surfaces.
//!
//! This crate provides:
//! - Surface capture into PNG artifacts
//! - Parity checks against an accepted reference image, with diff artifacts
//! - Fixture loading to stand in for network fetches in tests
//! - A mock canvas installer and mock graphics context for tests
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on gl-parity-core for
//! configuration, mode and paths, and on gl-parity-compare for the
//! comparison capability.
//!
//! ```no_run
//! use gl_parity::{ParityChecker, ParityOptions, Surface};
//!
//! # async fn run(surface: &dyn Surface) -> gl_parity::Result<()> {
//! let checker = ParityChecker::from_env()?;
//! let equal = checker
//!     .check_parity(surface, "tests/images", "button", ParityOptions::default())
//!     .await?;
//! assert!(equal);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod capture;
pub mod fixture;
pub mod mock;
pub mod parity;
pub mod surface;

// Re-export commonly used types
pub use capture::capture;
pub use fixture::{load_fixture, FixtureRoot};
pub use gl_parity_compare::{ImageComparator, PixelComparator};
pub use gl_parity_core::{
    Dimensions, Error, HighlightColor, ImagePaths, ParityConfig, ParityContext, Result, RunMode,
};
pub use mock::{install_mock_canvas, CanvasHost, MockCanvas, MockContext};
pub use parity::{ParityChecker, ParityOptions, ParityReport};
pub use surface::{PixelFormat, PixelRect, Surface};
