//! Default values applied when no configuration layer provides a setting.

use crate::dialect::DialectSelection;
use crate::logging::LogFormat;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default number of host ticks between two registry refresh passes.
///
/// Twenty ticks is one second on a host running at the usual 20 Hz.
pub const DEFAULT_REFRESH_TICKS: u64 = 20;

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default dialect selection: negotiate per viewer.
#[must_use]
pub const fn default_dialect_selection() -> DialectSelection {
    DialectSelection::Negotiate
}

/// Default refresh period, in host ticks.
#[must_use]
pub const fn default_refresh_ticks() -> u64 {
    DEFAULT_REFRESH_TICKS
}
