//! Parity checks: capture, compare against the reference, manage the diff.
//!
//! One check runs strictly in sequence: capture the surface to the current
//! path, compare it with the reference, then either write a diff artifact
//! (mismatch, diffs requested) or remove any stale one. Checks for distinct
//! image identities may run concurrently; two checks for the same identity
//! race on the same files and must be serialized by the caller.

use std::path::Path;

use gl_parity_compare::{
    CompareOptions, DiffOptions, ImageComparator, PixelComparator, RgbaImage,
};
use gl_parity_core::{Error, ImagePaths, ParityContext, Result};

use crate::artifact::{read_png, remove_artifact, write_png};
use crate::capture::capture;
use crate::surface::Surface;

/// Per-check options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParityOptions {
    /// Require exact pixel equality
    pub strict: bool,
    /// Write a diff artifact when the images differ
    pub save_diff_on_error: bool,
}

impl Default for ParityOptions {
    fn default() -> Self {
        Self {
            strict: true,
            save_diff_on_error: true,
        }
    }
}

impl ParityOptions {
    /// Set strictness.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable diff artifacts on mismatch.
    pub fn with_save_diff_on_error(mut self, enabled: bool) -> Self {
        self.save_diff_on_error = enabled;
        self
    }
}

/// Outcome of one parity check.
#[derive(Debug)]
pub struct ParityReport {
    /// Whether the capture matched the reference
    pub equal: bool,
    /// Artifact paths used by the check
    pub paths: ImagePaths,
    /// Whether a diff artifact was written
    pub diff_written: bool,
    /// Diff rendering failure, reported without altering `equal`
    pub diff_error: Option<Error>,
}

/// Runs parity checks with a fixed context and comparison capability.
#[derive(Debug, Clone)]
pub struct ParityChecker<C = PixelComparator> {
    context: ParityContext,
    comparator: C,
}

impl ParityChecker<PixelComparator> {
    /// Create a checker using the default pixel comparator.
    pub fn new(context: ParityContext) -> Self {
        Self::with_comparator(context, PixelComparator::new())
    }

    /// Create a checker from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ParityContext::from_env()?))
    }
}

impl<C: ImageComparator> ParityChecker<C> {
    /// Create a checker using a custom comparison capability.
    pub fn with_comparator(context: ParityContext, comparator: C) -> Self {
        Self {
            context,
            comparator,
        }
    }

    /// Context in effect.
    pub fn context(&self) -> &ParityContext {
        &self.context
    }

    /// Comparison capability in use.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Artifact paths for `name` under `dir`.
    pub fn paths(&self, dir: impl AsRef<Path>, name: &str) -> ImagePaths {
        self.context.resolve_paths(dir, name)
    }

    /// Check `surface` against the reference image of `(dir, name)`.
    ///
    /// Resolves with `true` when the images are equal. A diff rendering
    /// failure is logged and does not change the result; use
    /// [`ParityChecker::check_parity_report`] to inspect it.
    pub async fn check_parity<S>(
        &self,
        surface: &S,
        dir: impl AsRef<Path>,
        name: &str,
        options: ParityOptions,
    ) -> Result<bool>
    where
        S: Surface + ?Sized,
    {
        let report = self
            .check_parity_report(surface, dir, name, options)
            .await?;
        Ok(report.equal)
    }

    /// Like [`ParityChecker::check_parity`], returning the full report.
    pub async fn check_parity_report<S>(
        &self,
        surface: &S,
        dir: impl AsRef<Path>,
        name: &str,
        options: ParityOptions,
    ) -> Result<ParityReport>
    where
        S: Surface + ?Sized,
    {
        // Checked before any I/O so a 0x0 artifact is never produced.
        let size = surface.display_size()?;
        let paths = self.paths(dir, name);
        tracing::debug!(
            "Parity check '{}' ({} mode, {}): reference={}, current={}",
            name,
            self.context.mode(),
            size,
            paths.reference.display(),
            paths.current.display()
        );

        capture(surface, &paths.current, size.width, size.height).await?;
        if paths.captures_into_reference() {
            tracing::info!("Recorded baseline {}", paths.reference.display());
        }

        let compare = CompareOptions::from_config(self.context.config(), options.strict);
        let (reference, current) = load_pair(&paths).await?;
        let equal = self
            .comparator
            .compare(&reference, &current, &compare)
            .map_err(|e| Error::comparison(&paths.reference, e))?;

        let mut report = ParityReport {
            equal,
            paths,
            diff_written: false,
            diff_error: None,
        };

        if !equal && options.save_diff_on_error {
            tracing::warn!(
                "Parity mismatch for '{}', writing diff to {}",
                name,
                report.paths.diff.display()
            );
            let diff_options = DiffOptions::from_config(self.context.config(), compare);
            match self
                .write_diff(&reference, &current, &report.paths.diff, &diff_options)
                .await
            {
                Ok(()) => report.diff_written = true,
                Err(e) => {
                    tracing::warn!("Failed to write diff for '{}': {}", name, e);
                    report.diff_error = Some(e);
                }
            }
        } else {
            if !equal {
                tracing::warn!("Parity mismatch for '{}' (diff disabled)", name);
            }
            remove_stale_diff(&report.paths.diff).await;
        }

        Ok(report)
    }

    async fn write_diff(
        &self,
        reference: &RgbaImage,
        current: &RgbaImage,
        diff_path: &Path,
        options: &DiffOptions,
    ) -> Result<()> {
        let diff = self
            .comparator
            .render_diff(reference, current, options)
            .map_err(|e| Error::diff_render(diff_path, e))?;

        write_png(diff_path, &diff)
            .await
            .map_err(|e| Error::diff_render(diff_path, e))
    }
}

/// Decode the reference and the current capture. Any failure here, a missing
/// reference included, is a comparison error.
async fn load_pair(paths: &ImagePaths) -> Result<(RgbaImage, RgbaImage)> {
    let reference = read_png(&paths.reference)
        .await
        .map_err(|e| Error::comparison(&paths.reference, e))?;
    let current = read_png(&paths.current)
        .await
        .map_err(|e| Error::comparison(&paths.current, e))?;
    Ok((reference, current))
}

/// Best-effort: a missing file is fine, other failures are only logged.
async fn remove_stale_diff(diff: &Path) {
    match remove_artifact(diff).await {
        Ok(true) => tracing::debug!("Removed stale diff {}", diff.display()),
        Ok(false) => {}
        Err(e) => tracing::warn!("Could not remove stale diff: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gl_parity_core::error::BoxError;
    use gl_parity_core::{ParityConfig, RunMode};

    use crate::mock::{CanvasHost, MockCanvas, MockContext};

    fn checker(mode: RunMode) -> ParityChecker {
        ParityChecker::new(ParityContext::new(ParityConfig::default(), mode))
    }

    /// Comparator that judges every pair unequal and fails to render diffs.
    struct BrokenDiff;

    impl ImageComparator for BrokenDiff {
        fn compare(
            &self,
            _reference: &RgbaImage,
            _current: &RgbaImage,
            _options: &CompareOptions,
        ) -> std::result::Result<bool, BoxError> {
            Ok(false)
        }

        fn render_diff(
            &self,
            _reference: &RgbaImage,
            _current: &RgbaImage,
            _options: &DiffOptions,
        ) -> std::result::Result<RgbaImage, BoxError> {
            Err("renderer unavailable".into())
        }

        fn name(&self) -> &'static str {
            "broken-diff"
        }
    }

    #[test]
    fn test_parity_options_default() {
        let options = ParityOptions::default();
        assert!(options.strict);
        assert!(options.save_diff_on_error);
    }

    #[tokio::test]
    async fn test_record_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let surface = MockContext::filled(4, 4, [30, 60, 90, 255]);

        let recorded = checker(RunMode::Record)
            .check_parity(&surface, dir.path(), "square", ParityOptions::default())
            .await
            .unwrap();
        assert!(recorded);
        assert!(dir.path().join("square.spec.png").exists());
        assert!(!dir.path().join("square.head.png").exists());

        let verified = checker(RunMode::Verify)
            .check_parity(&surface, dir.path(), "square", ParityOptions::default())
            .await
            .unwrap();
        assert!(verified);
        assert!(dir.path().join("square.head.png").exists());
        assert!(!dir.path().join("output/square.diff.png").exists());
    }

    #[tokio::test]
    async fn test_missing_reference_is_comparison_error() {
        let dir = tempfile::tempdir().unwrap();
        let surface = MockContext::filled(2, 2, [0, 0, 0, 255]);

        let result = checker(RunMode::Verify)
            .check_parity(&surface, dir.path(), "first_run", ParityOptions::default())
            .await;
        assert!(matches!(result, Err(Error::Comparison { .. })));
        assert!(dir.path().join("first_run.head.png").exists());
    }

    #[tokio::test]
    async fn test_missing_dimensions_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = MockContext::filled(2, 2, [0, 0, 0, 255]);
        surface.attach_canvas(MockCanvas::with_size(0, 2));

        let result = checker(RunMode::Record)
            .check_parity(&surface, dir.path(), "empty", ParityOptions::default())
            .await;
        assert!(matches!(result, Err(Error::MissingDimensions { .. })));
        assert_eq!(surface.read_count(), 0);
        assert!(!dir.path().join("empty.spec.png").exists());
    }

    #[tokio::test]
    async fn test_diff_render_failure_keeps_result() {
        let dir = tempfile::tempdir().unwrap();
        let surface = MockContext::filled(2, 2, [0, 0, 0, 255]);
        checker(RunMode::Record)
            .check_parity(&surface, dir.path(), "broken", ParityOptions::default())
            .await
            .unwrap();

        let checker = ParityChecker::with_comparator(ParityContext::default(), BrokenDiff);
        let report = checker
            .check_parity_report(&surface, dir.path(), "broken", ParityOptions::default())
            .await
            .unwrap();
        assert!(!report.equal);
        assert!(!report.diff_written);
        assert!(matches!(report.diff_error, Some(Error::DiffRender { .. })));
        assert!(!report.paths.diff.exists());

        let equal = checker
            .check_parity(&surface, dir.path(), "broken", ParityOptions::default())
            .await
            .unwrap();
        assert!(!equal);
    }
}
