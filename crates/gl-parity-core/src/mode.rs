//! Run mode selection.
//!
//! A run either records new baselines (captures overwrite the reference
//! image) or verifies against existing ones (captures go to a separate file).
//! The mode is decided once, at process entry, and then carried as a value.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the run mode.
pub const MODE_ENV_VAR: &str = "TEST_MODE";

/// Whether captures become the new baseline or are checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Captures overwrite the reference image
    Record,

    /// Captures are written next to the reference and compared against it
    #[default]
    Verify,
}

impl RunMode {
    /// Read the run mode from [`MODE_ENV_VAR`].
    pub fn from_env() -> Self {
        let mode = Self::from_value(std::env::var(MODE_ENV_VAR).ok().as_deref());
        tracing::debug!("Run mode from {}: {}", MODE_ENV_VAR, mode);
        mode
    }

    /// Decide the run mode from a raw signal value.
    ///
    /// `update` or `record` (any case) selects [`RunMode::Record`]; anything
    /// else, including an absent value, selects [`RunMode::Verify`].
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("update") || v.eq_ignore_ascii_case("record") => {
                RunMode::Record
            }
            _ => RunMode::Verify,
        }
    }

    /// True in [`RunMode::Record`].
    pub fn is_record(&self) -> bool {
        matches!(self, RunMode::Record)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Record => write!(f, "record"),
            RunMode::Verify => write!(f, "verify"),
        }
    }
}
