//! Shared configuration for scoreline hosts.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file (`--config-path` or `SCORELINE_CONFIG_PATH`), then
//! `SCORELINE_*` environment variables, then command-line flags. The board
//! engine itself never reads configuration; the registry and the telemetry
//! initialiser consume the resolved [`Config`].

mod defaults;
mod dialect;
mod logging;

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_REFRESH_TICKS, default_dialect_selection, default_log_filter,
    default_log_filter_string, default_log_format, default_refresh_ticks,
};
pub use dialect::{DialectSelection, DialectSelectionParseError};
pub use logging::{LogFormat, LogFormatParseError};

/// Duration of one host tick at the conventional 20 Hz rate.
pub const TICK: Duration = Duration::from_millis(50);

/// Resolved configuration for a scoreline host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SCORELINE")]
pub struct Config {
    /// `tracing` filter expression, e.g. `info` or `scoreline=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log events.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Dialect negotiation policy for new boards.
    #[ortho_config(default = default_dialect_selection())]
    pub dialect: DialectSelection,
    /// Host ticks between two registry refresh passes.
    #[ortho_config(default = default_refresh_ticks())]
    pub refresh_ticks: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            dialect: default_dialect_selection(),
            refresh_ticks: default_refresh_ticks(),
        }
    }
}

impl Config {
    /// Filter expression handed to the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for log events.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Dialect negotiation policy.
    #[must_use]
    pub const fn dialect(&self) -> DialectSelection {
        self.dialect
    }

    /// Refresh period in host ticks, never less than one.
    #[must_use]
    pub const fn refresh_ticks(&self) -> u64 {
        if self.refresh_ticks == 0 {
            1
        } else {
            self.refresh_ticks
        }
    }

    /// Refresh period as wall-clock time at the conventional tick rate.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        TICK.saturating_mul(u32::try_from(self.refresh_ticks()).unwrap_or(u32::MAX))
    }
}
