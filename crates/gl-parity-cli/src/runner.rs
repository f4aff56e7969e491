//! Test runner: wraps `cargo test` with the run mode and config exported.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Context};
use gl_parity_core::{ParityConfig, RunMode, CONFIG_ENV_VAR, MODE_ENV_VAR};
use tokio::process::Command;

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Usage: gl-parity [-u] [--config <path>] [-- <cargo test args>]

Options:
  -u, --update       Record new baselines (sets TEST_MODE=update)
  --config <path>    Validate and export a YAML parity config
  -h, --help         Print this help
";

/// Parsed runner arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunnerArgs {
    /// Run mode exported to the tests
    pub mode: RunMode,
    /// Configuration file exported to the tests
    pub config: Option<PathBuf>,
    /// Arguments forwarded to `cargo test`
    pub passthrough: Vec<OsString>,
    /// Print usage and exit
    pub help: bool,
}

impl RunnerArgs {
    /// Parse arguments (without the program name).
    ///
    /// Unrecognized arguments are forwarded to `cargo test`, as is everything
    /// after `--`.
    pub fn parse<I, S>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut parsed = RunnerArgs::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.to_str() {
                Some("-u") | Some("--update") => parsed.mode = RunMode::Record,
                Some("-h") | Some("--help") => parsed.help = true,
                Some("--config") => {
                    let Some(path) = args.next() else {
                        bail!("--config requires a path");
                    };
                    parsed.config = Some(PathBuf::from(path));
                }
                Some("--") => {
                    parsed.passthrough.extend(args.by_ref());
                    break;
                }
                _ => parsed.passthrough.push(arg),
            }
        }

        Ok(parsed)
    }

    /// Load and validate the config file, if one was given.
    pub fn validate_config(&self) -> anyhow::Result<Option<ParityConfig>> {
        let Some(path) = &self.config else {
            return Ok(None);
        };
        let config = ParityConfig::from_file(path)
            .with_context(|| format!("invalid parity config {}", path.display()))?;
        Ok(Some(config))
    }

    /// Build the `cargo test` command with the mode and config exported.
    pub fn command(&self) -> Command {
        let cargo = std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"));
        let mut command = Command::new(cargo);
        command.arg("test").args(&self.passthrough);

        match self.mode {
            RunMode::Record => {
                command.env(MODE_ENV_VAR, "update");
            }
            RunMode::Verify => {
                command.env_remove(MODE_ENV_VAR);
            }
        }
        if let Some(path) = &self.config {
            command.env(CONFIG_ENV_VAR, path);
        }
        command
    }
}
