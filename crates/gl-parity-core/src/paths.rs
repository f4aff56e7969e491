//! Artifact path resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ParityConfig, RunMode};

/// The three files derived from one image identity `(dir, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImagePaths {
    /// Accepted baseline: `dir/<name><spec>.png`
    pub reference: PathBuf,
    /// This run's capture: `dir/<name><spec|head>.png` depending on mode
    pub current: PathBuf,
    /// Highlighted difference: `dir/<output>/<name><diff>.png`
    pub diff: PathBuf,
}

impl ImagePaths {
    /// Compute the artifact paths for `name` under `dir`.
    ///
    /// `name` must not already carry a postfix or extension. In
    /// [`RunMode::Record`] `current` equals `reference`.
    pub fn resolve(
        config: &ParityConfig,
        mode: RunMode,
        dir: impl AsRef<Path>,
        name: &str,
    ) -> Self {
        let dir = dir.as_ref();
        let paths = Self {
            reference: dir.join(png_name(name, &config.spec_postfix)),
            current: dir.join(png_name(name, config.capture_postfix(mode))),
            diff: dir
                .join(&config.output_dir)
                .join(png_name(name, &config.diff_postfix)),
        };
        tracing::trace!(?paths, %mode, "Resolved artifact paths");
        paths
    }

    /// True when the capture overwrites the reference directly.
    pub fn captures_into_reference(&self) -> bool {
        self.reference == self.current
    }
}

fn png_name(name: &str, postfix: &str) -> String {
    format!("{name}{postfix}.png")
}
