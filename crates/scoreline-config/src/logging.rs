//! Log output selection shared by every host embedding the board engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output format for the tracing subscriber.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened.
    #[default]
    Json,
    /// Single-line human-readable events.
    Compact,
}

impl LogFormat {
    /// Returns `true` when events are emitted as machine-readable JSON.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when a [`LogFormat`] cannot be parsed.
pub type LogFormatParseError = strum::ParseError;
