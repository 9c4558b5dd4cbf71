//! Wire-format generations and their packet encoders.
//!
//! Each [`Dialect`] has a stateless encoder implementing
//! [`ProtocolDialect`]. The board picks its encoder once at construction
//! and calls the same operations whatever the dialect; only the packet
//! shapes differ:
//!
//! | Dialect | Text | Score action | Team fields | Score labels |
//! |---|---|---|---|---|
//! | [`Dialect::Legacy`] | plain, 16 chars | ordinal | inline | no |
//! | [`Dialect::MidEra`] | plain, 16 chars | named | inline | no |
//! | [`Dialect::Modern`] | component | named, bare removal | inline | no |
//! | [`Dialect::Current`] | component | named, or reset packet | wrapped | from 765 |
//!
//! [`Dialect::Current`] spans several client generations. The encoder
//! returned by [`Dialect::encoder_for`] knows which of them the viewer
//! speaks; [`Dialect::encoder`] assumes the newest.

mod current;
mod legacy;
mod mid_era;
mod modern;


use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use scoreline_config::DialectSelection;

use crate::packet::{
    DisplayObjectivePacket, DisplaySlot, ObjectiveMode, ObjectivePacket, Packet, RenderType,
    TeamBody, TeamMode, TeamPacket, WireText,
};
use crate::state::{BoardId, Slot};
use crate::text::{SplitLine, Text, split_line};

pub use self::current::CurrentDialect;
pub use self::legacy::LegacyDialect;
pub use self::mid_era::MidEraDialect;
pub use self::modern::ModernDialect;

/// Visible team field length on plain-text dialects.
pub const LEGACY_FIELD_LENGTH: usize = 16;

/// Visible team field length on rich-text dialects.
pub const RICH_FIELD_LENGTH: usize = 1024;

/// Longest legacy line: two fields, less the colour code the suffix inherits.
pub const LEGACY_LINE_LENGTH: usize = 30;

/// Longest legacy title.
pub const LEGACY_TITLE_LENGTH: usize = 32;

/// First protocol version with named score actions.
pub const MID_ERA_PROTOCOL: u32 = 47;

/// First protocol version with rich-text components.
pub const MODERN_PROTOCOL: u32 = 393;

/// First protocol version with wrapped team parameters.
pub const CURRENT_PROTOCOL: u32 = 755;

/// First protocol version addressing the sidebar by name.
pub const NAMED_SLOT_PROTOCOL: u32 = 764;

/// First protocol version with a reset packet and number formats.
pub const SCORE_RESET_PROTOCOL: u32 = 765;

/// A generation of the scoreboard wire format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Dialect {
    /// Plain text, integer action ordinals.
    Legacy,
    /// Plain text, named actions, render type and visibility fields.
    MidEra,
    /// Rich-text components, inline team fields.
    Modern,
    /// Rich text, wrapped team parameters; reset packet and custom score
    /// labels from [`SCORE_RESET_PROTOCOL`].
    Current,
}

impl Dialect {
    /// Every dialect, oldest first.
    pub const ALL: [Self; 4] = [Self::Legacy, Self::MidEra, Self::Modern, Self::Current];

    /// Encoder for this dialect, at its newest client generation.
    #[must_use]
    pub const fn encoder(self) -> &'static dyn ProtocolDialect {
        match self {
            Self::Legacy => &LegacyDialect,
            Self::MidEra => &MidEraDialect,
            Self::Modern => &ModernDialect,
            Self::Current => &CurrentDialect::SCORE_RESET,
        }
    }

    /// Encoder for this dialect as spoken by the client described by `host`.
    #[must_use]
    pub const fn encoder_for(self, host: &HostInfo) -> &'static dyn ProtocolDialect {
        match self {
            Self::Current => CurrentDialect::for_protocol(host.protocol_version),
            other => other.encoder(),
        }
    }

    /// Capabilities of this dialect.
    #[must_use]
    pub fn capabilities(self) -> Capabilities {
        self.encoder().capabilities()
    }

    /// Dialect pinned by `selection`, or `None` when it asks to negotiate.
    #[must_use]
    pub const fn pinned(selection: DialectSelection) -> Option<Self> {
        match selection {
            DialectSelection::Negotiate => None,
            DialectSelection::Legacy => Some(Self::Legacy),
            DialectSelection::MidEra => Some(Self::MidEra),
            DialectSelection::Modern => Some(Self::Modern),
            DialectSelection::Current => Some(Self::Current),
        }
    }

    /// Pinned dialect if any, otherwise the one negotiated for `host`.
    #[must_use]
    pub const fn resolve(selection: DialectSelection, host: &HostInfo) -> Self {
        match Self::pinned(selection) {
            Some(dialect) => dialect,
            None => negotiate(host),
        }
    }

    /// Encoder for `host`: the newest generation of a pinned dialect,
    /// otherwise the negotiated dialect at the host's generation.
    #[must_use]
    pub const fn resolve_encoder(
        selection: DialectSelection,
        host: &HostInfo,
    ) -> &'static dyn ProtocolDialect {
        match Self::pinned(selection) {
            Some(dialect) => dialect.encoder(),
            None => negotiate(host).encoder_for(host),
        }
    }
}

/// What a dialect can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Lines and titles are chat components rather than plain strings.
    pub supports_rich_text: bool,
    /// Individual scores may render text instead of the number.
    pub supports_custom_score_label: bool,
    /// Scores are removed with a dedicated reset packet.
    pub supports_score_reset: bool,
    /// Characters per visible team field.
    pub max_visible_field_length: usize,
    /// Longest accepted line, if limited.
    pub max_line_length: Option<usize>,
    /// Longest accepted title, if limited.
    pub max_title_length: Option<usize>,
}

impl Capabilities {
    pub(crate) const PLAIN: Self = Self {
        supports_rich_text: false,
        supports_custom_score_label: false,
        supports_score_reset: false,
        max_visible_field_length: LEGACY_FIELD_LENGTH,
        max_line_length: Some(LEGACY_LINE_LENGTH),
        max_title_length: Some(LEGACY_TITLE_LENGTH),
    };

    pub(crate) const RICH: Self = Self {
        supports_rich_text: true,
        supports_custom_score_label: false,
        supports_score_reset: false,
        max_visible_field_length: RICH_FIELD_LENGTH,
        max_line_length: None,
        max_title_length: None,
    };
}

/// What the host knows about a viewer's client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostInfo {
    /// Protocol version reported by the client.
    pub protocol_version: u32,
}

impl HostInfo {
    /// Host info for a client speaking `protocol_version`.
    #[must_use]
    pub const fn new(protocol_version: u32) -> Self {
        Self { protocol_version }
    }
}

/// Dialect spoken by the client described by `host`.
#[must_use]
pub const fn negotiate(host: &HostInfo) -> Dialect {
    match host.protocol_version {
        v if v < MID_ERA_PROTOCOL => Dialect::Legacy,
        v if v < MODERN_PROTOCOL => Dialect::MidEra,
        v if v < CURRENT_PROTOCOL => Dialect::Modern,
        _ => Dialect::Current,
    }
}

/// Encodes logical board operations as packets for one dialect.
///
/// Every method is pure. `label` arguments follow the board convention:
/// `None` shows the numeric score, an empty text shows nothing and any
/// other text replaces the number. Dialects without custom score labels
/// ignore them.
pub trait ProtocolDialect: Send + Sync {
    /// Which dialect this encoder speaks.
    fn dialect(&self) -> Dialect;

    /// What this dialect can express.
    fn capabilities(&self) -> Capabilities;

    /// Creates the objective with `title`.
    fn encode_create_objective(&self, board: &BoardId, title: &Text) -> Packet;

    /// Changes the objective title.
    fn encode_update_objective(&self, board: &BoardId, title: &Text) -> Packet;

    /// Removes the objective and everything attached to it.
    fn encode_remove_objective(&self, board: &BoardId) -> Packet;

    /// Shows the objective in the sidebar.
    fn encode_display_slot(&self, board: &BoardId) -> Packet;

    /// Adds the score for `slot`.
    fn encode_score_create(&self, board: &BoardId, slot: Slot, label: Option<&Text>) -> Packet;

    /// Removes the score for `slot`.
    fn encode_score_remove(&self, board: &BoardId, slot: Slot) -> Packet;

    /// Changes how the score for `slot` is rendered.
    fn encode_score_label_update(
        &self,
        board: &BoardId,
        slot: Slot,
        label: Option<&Text>,
    ) -> Packet;

    /// Creates the team for `slot` showing `line`.
    fn encode_row_create(&self, board: &BoardId, slot: Slot, line: &Text) -> Packet;

    /// Changes the line shown by the team for `slot`.
    fn encode_row_update(&self, board: &BoardId, slot: Slot, line: &Text) -> Packet;

    /// Removes the team for `slot`.
    fn encode_row_remove(&self, board: &BoardId, slot: Slot) -> Packet;

    /// Prefix and suffix carrying `line` in the team for `slot`.
    fn split(&self, line: &Text, slot: Slot) -> SplitLine {
        split_line(
            &line.to_legacy(),
            self.capabilities().max_visible_field_length,
            &slot.placeholder(),
        )
    }
}

fn plain(text: &Text) -> WireText {
    WireText::Plain(text.to_legacy())
}

fn component(text: &Text) -> WireText {
    WireText::Component(text.to_component())
}

fn empty_component() -> WireText {
    component(&Text::empty())
}

fn objective(
    board: &BoardId,
    mode: ObjectiveMode,
    display_name: Option<WireText>,
    render_type: Option<RenderType>,
) -> Packet {
    Packet::SetObjective(ObjectivePacket {
        name: board.to_string(),
        mode,
        display_name,
        render_type,
    })
}

fn display_slot(board: &BoardId, slot: DisplaySlot) -> Packet {
    Packet::DisplayObjective(DisplayObjectivePacket {
        slot,
        name: board.to_string(),
    })
}

fn team(board: &BoardId, slot: Slot, mode: TeamMode, body: Option<TeamBody>) -> Packet {
    let players = if mode == TeamMode::Create {
        vec![slot.symbol()]
    } else {
        Vec::new()
    };
    Packet::SetTeam(TeamPacket {
        name: slot.team_name(board),
        mode,
        body,
        players,
    })
}
