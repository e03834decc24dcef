use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use crate::errors::*;

// A non-empty RUST_LOG wins over the --verbosity flag
fn env_filter(verbosity: &str) -> anyhow::Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => {
            EnvFilter::try_new(&directives).with_context(|| format!("invalid RUST_LOG directives {directives:?}"))
        },
        _ => EnvFilter::try_new(verbosity).with_context(|| format!("invalid verbosity {verbosity:?}")),
    }
}

/// Logging for the long-running server: span creation events plus source locations.
pub fn setup(verbosity: &str) -> EmptyResult {
    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NEW)
        .with_target(false)
        .with_env_filter(env_filter(verbosity)?)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("could not set up logging: {e}"))
}

/// Logging for kbctl: goes to stderr so it never mixes with the command's output.
pub fn setup_for_cli(verbosity: &str) -> EmptyResult {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter(verbosity)?)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .try_init()
        .map_err(|e| anyhow!("could not set up logging: {e}"))
}
