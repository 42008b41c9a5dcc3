//! Global tracing subscriber setup.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,taleweaver=debug";

/// Output format for log lines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable lines for development
    #[default]
    Pretty,
    /// One JSON object per line for log shippers
    Json,
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to
/// `info,taleweaver=debug`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
///
/// # Examples
///
/// ```
/// use taleweaver::{LogFormat, init_tracing};
///
/// let format: LogFormat = "json".parse().unwrap();
/// init_tracing(format).unwrap();
/// assert!(init_tracing(LogFormat::Pretty).is_err());
/// ```
pub fn init_tracing(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    info!(%format, "Tracing initialized");
    Ok(())
}
