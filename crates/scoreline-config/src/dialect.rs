//! Operator override for wire-dialect negotiation.
//!
//! By default every board negotiates its dialect from the viewer's protocol
//! version. Operators may pin a single dialect instead, which is useful when
//! a proxy in front of the host rewrites packets for older clients.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the registry picks the dialect for a newly registered viewer.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DialectSelection {
    /// Negotiate from the viewer's reported protocol version.
    #[default]
    Negotiate,
    /// Pin the oldest plain-text dialect.
    Legacy,
    /// Pin the plain-text dialect with named score actions.
    MidEra,
    /// Pin the rich-text dialect without custom score labels.
    Modern,
    /// Pin the newest dialect, including custom score labels.
    Current,
}

impl DialectSelection {
    /// Returns `true` when negotiation is bypassed.
    #[must_use]
    pub const fn is_pinned(self) -> bool {
        !matches!(self, Self::Negotiate)
    }
}

/// Error returned when a [`DialectSelection`] cannot be parsed.
pub type DialectSelectionParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::negotiate("negotiate", DialectSelection::Negotiate)]
    #[case::legacy("legacy", DialectSelection::Legacy)]
    #[case::mid_era("mid_era", DialectSelection::MidEra)]
    #[case::modern("Modern", DialectSelection::Modern)]
    #[case::current("CURRENT", DialectSelection::Current)]
    fn parses_selection(#[case] input: &str, #[case] expected: DialectSelection) {
        assert_eq!(DialectSelection::from_str(input).expect("parse"), expected);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let text = DialectSelection::MidEra.to_string();
        assert_eq!(text, "mid_era");
        assert_eq!(
            DialectSelection::from_str(&text).expect("parse"),
            DialectSelection::MidEra
        );
    }

    #[test]
    fn only_negotiate_is_unpinned() {
        assert!(!DialectSelection::Negotiate.is_pinned());
        assert!(DialectSelection::Current.is_pinned());
    }
}
