//! # gl-parity
//!
//! Runs the test suite in verify mode, or with `-u` in record mode so every
//! parity check writes a new baseline.

use gl_parity_cli::{RunnerArgs, USAGE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = RunnerArgs::parse(std::env::args_os().skip(1))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    if args.validate_config()?.is_some() {
        tracing::debug!("Parity config validated");
    }

    tracing::info!("Running tests in {} mode", args.mode);
    let status = args.command().status().await.map_err(|e| {
        tracing::error!("Failed to start cargo test: {}", e);
        e
    })?;

    if !status.success() {
        tracing::error!("Tests failed ({})", status);
    }
    std::process::exit(status.code().unwrap_or(1));
}
