//! Tracing setup for the CLI binary.

use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "INFRATRACK_LOG";

const DEFAULT_LOG_FILTER: &str = "infratrack=warn";
const VERBOSE_LOG_FILTER: &str = "infratrack=debug";

/// Install the stderr subscriber. `verbose` wins over the environment.
pub fn init_logging(verbose: bool) -> AppResult<()> {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Other(format!("logging setup failed: {e}")))
}
