//! Log output for hosts that embed scoreline without a subscriber.
//!
//! Boards report creation and deletion at `info` under `scoreline::board`,
//! every reconciliation at `debug` with the packet count, and dropped or
//! failed deliveries at `debug`/`warn`. The registry reports joins, leaves
//! and failing hooks under `scoreline::registry`. Filtering by target, for
//! example `scoreline::board=debug,warn`, traces one engine without the
//! rest of the host.
//!
//! [`initialise`] writes those events to stderr. JSON output is never
//! coloured so log shippers receive clean lines; compact output is
//! coloured only on a terminal.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::UtcTime;

use scoreline_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Proof that the global subscriber is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter expression does not parse.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Offending expression.
        filter: String,
        /// Parser message.
        message: String,
    },
    /// Another global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[source] SetGlobalDefaultError),
}

/// Installs the global subscriber on first use.
///
/// Later calls return a new handle without touching global state.
///
/// # Examples
///
/// ```rust
/// use scoreline::telemetry;
/// use scoreline_config::Config;
///
/// # fn main() -> Result<(), telemetry::TelemetryError> {
/// let config = Config::default();
/// let _first = telemetry::initialise(&config)?;
/// let _second = telemetry::initialise(&config)?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid
/// [`Config::log_filter`] and [`TelemetryError::Subscriber`] when the host
/// already installed a subscriber.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| TelemetryHandle)
}

fn build_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(expression).map_err(|error| TelemetryError::Filter {
        filter: expression.to_owned(),
        message: error.to_string(),
    })
}

const fn use_ansi(format: LogFormat, terminal: bool) -> bool {
    terminal && !format.is_structured()
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = build_filter(config.log_filter())?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .with_ansi(use_ansi(config.log_format(), io::stderr().is_terminal()))
            .with_timer(UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format() {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
