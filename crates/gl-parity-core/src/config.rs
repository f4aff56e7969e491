//! Configuration types for gl-parity.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, HighlightColor, ImagePaths, Result, RunMode};

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV_VAR: &str = "GL_PARITY_CONFIG";

/// Postfix and diff settings, resolved once at initialization.
///
/// Every field is optional in YAML; missing fields take the defaults
/// `.spec`, `.head`, `.diff`, `#ff00ff`, `output` and `2.3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityConfig {
    /// Postfix of the reference image (`<name><spec_postfix>.png`)
    #[serde(alias = "specPostfix")]
    pub spec_postfix: String,
    /// Postfix of the verification capture
    #[serde(alias = "headPostfix")]
    pub head_postfix: String,
    /// Postfix of the diff artifact
    #[serde(alias = "diffPostfix")]
    pub diff_postfix: String,
    /// Color painted over differing pixels in the diff artifact
    #[serde(alias = "highlightColor")]
    pub highlight_color: HighlightColor,
    /// Subdirectory (relative to the image directory) holding diff artifacts
    #[serde(alias = "outputDir")]
    pub output_dir: String,
    /// Largest per-pixel color distance (CIE76 delta-E) tolerated by
    /// non-strict comparisons
    pub tolerance: f64,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            spec_postfix: ".spec".to_string(),
            head_postfix: ".head".to_string(),
            diff_postfix: ".diff".to_string(),
            highlight_color: HighlightColor::MAGENTA,
            output_dir: "output".to_string(),
            tolerance: 2.3,
        }
    }
}

impl ParityConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ParityConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], or fall back to defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::debug!("Loading parity config from {:?}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (field, postfix) in [
            ("spec_postfix", &self.spec_postfix),
            ("head_postfix", &self.head_postfix),
            ("diff_postfix", &self.diff_postfix),
        ] {
            if postfix.is_empty() {
                return Err(Error::Config(format!("{field} cannot be empty")));
            }
            if postfix.contains(['/', '\\']) {
                return Err(Error::Config(format!(
                    "{field} '{postfix}' cannot contain path separators"
                )));
            }
        }

        // Verification captures must never land on the reference image.
        if self.spec_postfix == self.head_postfix {
            return Err(Error::Config(format!(
                "spec_postfix and head_postfix must differ (both '{}')",
                self.spec_postfix
            )));
        }

        if self.output_dir.trim().is_empty() {
            return Err(Error::Config("output_dir cannot be empty".to_string()));
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::Config(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }

    /// Set the reference postfix.
    pub fn with_spec_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.spec_postfix = postfix.into();
        self
    }

    /// Set the verification-capture postfix.
    pub fn with_head_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.head_postfix = postfix.into();
        self
    }

    /// Set the diff postfix.
    pub fn with_diff_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.diff_postfix = postfix.into();
        self
    }

    /// Set the highlight color.
    pub fn with_highlight_color(mut self, color: HighlightColor) -> Self {
        self.highlight_color = color;
        self
    }

    /// Set the non-strict tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Postfix of the file the current run captures into.
    pub fn capture_postfix(&self, mode: RunMode) -> &str {
        match mode {
            RunMode::Record => &self.spec_postfix,
            RunMode::Verify => &self.head_postfix,
        }
    }
}

/// Immutable per-process settings: configuration plus run mode.
///
/// Built once at process entry and handed to every component that needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityContext {
    config: ParityConfig,
    mode: RunMode,
}

impl ParityContext {
    /// Create a context from an explicit configuration and mode.
    pub fn new(config: ParityConfig, mode: RunMode) -> Self {
        Self { config, mode }
    }

    /// Build the context from the process environment.
    pub fn from_env() -> Result<Self> {
        let config = ParityConfig::from_env()?;
        let mode = RunMode::from_env();
        tracing::info!("gl-parity running in {} mode", mode);
        Ok(Self::new(config, mode))
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ParityConfig {
        &self.config
    }

    /// Run mode in effect.
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Resolve the artifact paths of one image identity.
    pub fn resolve_paths(&self, dir: impl AsRef<Path>, name: &str) -> ImagePaths {
        ImagePaths::resolve(&self.config, self.mode, dir, name)
    }
}

impl Default for ParityContext {
    fn default() -> Self {
        Self::new(ParityConfig::default(), RunMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParityConfig::default();
        assert_eq!(config.spec_postfix, ".spec");
        assert_eq!(config.head_postfix, ".head");
        assert_eq!(config.diff_postfix, ".diff");
        assert_eq!(config.highlight_color.to_string(), "#ff00ff");
        assert_eq!(config.output_dir, "output");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ParityConfig::from_yaml("head_postfix: .current\n").unwrap();
        assert_eq!(config.head_postfix, ".current");
        assert_eq!(config.spec_postfix, ".spec");
        assert_eq!(config.diff_postfix, ".diff");
    }

    #[test]
    fn test_parse_camel_case_yaml() {
        let yaml = r##"
specPostfix: .golden
headPostfix: .actual
diffPostfix: .delta
highlightColor: "#00ff00"
tolerance: 5.0
"##;

        let config = ParityConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.spec_postfix, ".golden");
        assert_eq!(config.head_postfix, ".actual");
        assert_eq!(config.diff_postfix, ".delta");
        assert_eq!(config.highlight_color, HighlightColor::rgb(0, 255, 0));
        assert_eq!(config.tolerance, 5.0);
    }

    #[test]
    fn test_invalid_highlight_color() {
        let result = ParityConfig::from_yaml("highlight_color: pink\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_postfix_rejected() {
        let config = ParityConfig::default().with_diff_postfix("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_postfix_with_separator_rejected() {
        let config = ParityConfig::default().with_head_postfix("/head");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_identical_spec_and_head_rejected() {
        let config = ParityConfig::default().with_head_postfix(".spec");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = ParityConfig::default().with_tolerance(-1.0);
        assert!(config.validate().is_err());
        let config = ParityConfig::default().with_tolerance(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capture_postfix_follows_mode() {
        let config = ParityConfig::default();
        assert_eq!(config.capture_postfix(RunMode::Record), ".spec");
        assert_eq!(config.capture_postfix(RunMode::Verify), ".head");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parity.yaml");
        std::fs::write(&path, "diff_postfix: .changes\n").unwrap();

        let config = ParityConfig::from_file(&path).unwrap();
        assert_eq!(config.diff_postfix, ".changes");
    }

    #[test]
    fn test_from_missing_file() {
        let result = ParityConfig::from_file("/nonexistent/parity.yaml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_context_accessors() {
        let context = ParityContext::new(ParityConfig::default(), RunMode::Record);
        assert_eq!(context.mode(), RunMode::Record);
        assert_eq!(context.config().spec_postfix, ".spec");
    }
}
