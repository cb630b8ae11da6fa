//! Tracing setup for hosts embedding the reconciler

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global subscriber printing compact logs to stdout.
///
/// `RUST_LOG` takes precedence over [`DEFAULT_FILTER`]. Fails if a global
/// subscriber is already set.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with_filter(DEFAULT_FILTER)
}

/// Like [`init`], with a custom fallback filter such as `hooks_core=debug`.
pub fn init_with_filter(fallback: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    let fmt_layer = fmt::layer().with_target(true).with_level(true).compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
