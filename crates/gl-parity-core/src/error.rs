//! Error types for gl-parity.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Boxed cause carried by errors raised inside an external capability.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for gl-parity operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Surface has no reportable display size
    #[error("Surface does not report display dimensions (width: {width}, height: {height})")]
    MissingDimensions {
        /// Reported display width (0 when absent)
        width: u32,
        /// Reported display height (0 when absent)
        height: u32,
    },

    /// Capture requested with a zero-sized rectangle
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Pixel readback returned a buffer of the wrong size
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    PixelBuffer {
        /// Expected byte count (width * height * 4)
        expected: usize,
        /// Byte count actually returned
        actual: usize,
    },

    /// Read or write failure on an artifact
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Raster encoding failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// The comparison capability failed (typically: no reference yet)
    #[error("Comparison failed for {}: {source}", reference.display())]
    Comparison {
        /// Reference image path
        reference: PathBuf,
        /// Underlying cause
        #[source]
        source: BoxError,
    },

    /// The diff-rendering capability failed
    #[error("Diff rendering failed for {}: {source}", diff.display())]
    DiffRender {
        /// Diff artifact path
        diff: PathBuf,
        /// Underlying cause
        #[source]
        source: BoxError,
    },

    /// Fixture path resolution or read failed
    #[error("Fixture not found for {url} (mapped to {}): {source}", path.display())]
    FixtureNotFound {
        /// Logical resource identifier
        url: String,
        /// Local path the identifier mapped to
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a failure of the comparison capability.
    pub fn comparison(reference: impl AsRef<Path>, source: impl Into<BoxError>) -> Self {
        Error::Comparison {
            reference: reference.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Wrap a failure of the diff-rendering capability.
    pub fn diff_render(diff: impl AsRef<Path>, source: impl Into<BoxError>) -> Self {
        Error::DiffRender {
            diff: diff.as_ref().to_path_buf(),
            source: source.into(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_dimensions_error() {
        let err = Error::MissingDimensions {
            width: 0,
            height: 100,
        };
        assert_eq!(
            err.to_string(),
            "Surface does not report display dimensions (width: 0, height: 100)"
        );
    }

    #[test]
    fn test_invalid_dimensions_error() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid dimensions: 0x10");
    }

    #[test]
    fn test_pixel_buffer_error() {
        let err = Error::PixelBuffer {
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "Pixel buffer size mismatch: expected 16 bytes, got 12"
        );
    }

    #[test]
    fn test_io_error_keeps_cause() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only fs");
        let err = Error::io("/tmp/img/button.head.png", io_err);
        assert!(err.to_string().contains("/tmp/img/button.head.png"));
        assert!(err.to_string().contains("read-only fs"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_comparison_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::comparison("/tmp/img/button.spec.png", io_err);
        assert!(matches!(err, Error::Comparison { .. }));
        assert!(err.to_string().starts_with("Comparison failed for"));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_diff_render_error() {
        let err = Error::diff_render("/tmp/img/output/button.diff.png", "disk full");
        assert!(matches!(err, Error::DiffRender { .. }));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_fixture_not_found_error() {
        let err = Error::FixtureNotFound {
            url: "http://x/a.json".to_string(),
            path: PathBuf::from("fixtures/a.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let display = err.to_string();
        assert!(display.starts_with("Fixture not found for http://x/a.json"));
        assert!(display.contains("fixtures/a.json"));
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("spec_postfix cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: spec_postfix cannot be empty"
        );
    }

    #[test]
    fn test_error_debug() {
        let err = Error::Encode("bad buffer".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Encode"));
    }
}
