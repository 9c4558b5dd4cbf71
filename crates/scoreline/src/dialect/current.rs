//! Newest rich-text dialect: team fields in a wrapped parameters block.
//!
//! Later clients in this range also address the sidebar by name and gain a
//! dedicated reset packet with per-score number formats. Those features are
//! negotiated from the protocol version, so one encoder covers the range.

use crate::packet::{
    ALWAYS, ActionField, COLOR_RESET, DisplaySlot, NumberFormat, ObjectiveMode, Packet,
    RenderType, ResetScorePacket, SIDEBAR_NAME, SIDEBAR_POSITION, ScoreAction, ScorePacket,
    TeamBody, TeamMode, TeamParameters,
};
use crate::state::{BoardId, Slot};
use crate::text::Text;

use super::{
    Capabilities, Dialect, NAMED_SLOT_PROTOCOL, ProtocolDialect, SCORE_RESET_PROTOCOL, component,
    display_slot, empty_component, objective, team,
};

/// Encoder for [`Dialect::Current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentDialect {
    named_slot: bool,
    score_reset: bool,
}

impl CurrentDialect {
    /// Clients before [`NAMED_SLOT_PROTOCOL`]: positional sidebar, named
    /// score actions.
    pub const WRAPPED: Self = Self {
        named_slot: false,
        score_reset: false,
    };

    /// Clients on [`NAMED_SLOT_PROTOCOL`]: named sidebar, named score
    /// actions.
    pub const NAMED_SLOT: Self = Self {
        named_slot: true,
        score_reset: false,
    };

    /// Clients from [`SCORE_RESET_PROTOCOL`]: reset packet and number
    /// formats.
    pub const SCORE_RESET: Self = Self {
        named_slot: true,
        score_reset: true,
    };

    /// Encoder for a client speaking `protocol_version`.
    #[must_use]
    pub const fn for_protocol(protocol_version: u32) -> &'static Self {
        if protocol_version >= SCORE_RESET_PROTOCOL {
            &Self::SCORE_RESET
        } else if protocol_version >= NAMED_SLOT_PROTOCOL {
            &Self::NAMED_SLOT
        } else {
            &Self::WRAPPED
        }
    }

    /// Whether scores are removed with a reset packet and may show labels.
    #[must_use]
    pub const fn has_score_reset(self) -> bool {
        self.score_reset
    }

    fn set_score(self, board: &BoardId, slot: Slot, label: Option<&Text>) -> Packet {
        if !self.score_reset {
            return named_score(board, slot, ScoreAction::Change);
        }
        Packet::SetScore(ScorePacket {
            owner: slot.symbol(),
            objective: Some(board.to_string()),
            action: None,
            value: Some(slot.value()),
            number_format: number_format(label),
        })
    }
}

fn number_format(label: Option<&Text>) -> Option<NumberFormat> {
    label.map(|text| {
        if text.is_empty() {
            NumberFormat::Blank
        } else {
            NumberFormat::Fixed(component(text))
        }
    })
}

/// Score packet that names the action and always repeats the objective and
/// value, including on removal.
fn named_score(board: &BoardId, slot: Slot, action: ScoreAction) -> Packet {
    Packet::SetScore(ScorePacket {
        owner: slot.symbol(),
        objective: Some(board.to_string()),
        action: Some(ActionField::Named(action)),
        value: Some(slot.value()),
        number_format: None,
    })
}

fn row(board: &BoardId, slot: Slot, mode: TeamMode, line: &Text) -> Packet {
    let parameters = TeamParameters {
        display_name: empty_component(),
        color: Some(COLOR_RESET),
        prefix: component(line),
        suffix: empty_component(),
        nametag_visibility: Some(ALWAYS),
        collision_rule: Some(ALWAYS),
    };
    team(board, slot, mode, Some(TeamBody::Wrapped { parameters }))
}

impl ProtocolDialect for CurrentDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Current
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            supports_custom_score_label: self.score_reset,
            supports_score_reset: self.score_reset,
            ..Capabilities::RICH
        }
    }

    fn encode_create_objective(&self, board: &BoardId, title: &Text) -> Packet {
        objective(
            board,
            ObjectiveMode::Create,
            Some(component(title)),
            Some(RenderType::Integer),
        )
    }

    fn encode_update_objective(&self, board: &BoardId, title: &Text) -> Packet {
        objective(
            board,
            ObjectiveMode::Update,
            Some(component(title)),
            Some(RenderType::Integer),
        )
    }

    fn encode_remove_objective(&self, board: &BoardId) -> Packet {
        objective(board, ObjectiveMode::Remove, None, None)
    }

    fn encode_display_slot(&self, board: &BoardId) -> Packet {
        let slot = if self.named_slot {
            DisplaySlot::Named(SIDEBAR_NAME)
        } else {
            DisplaySlot::Position(SIDEBAR_POSITION)
        };
        display_slot(board, slot)
    }

    fn encode_score_create(&self, board: &BoardId, slot: Slot, label: Option<&Text>) -> Packet {
        self.set_score(board, slot, label)
    }

    fn encode_score_remove(&self, board: &BoardId, slot: Slot) -> Packet {
        if !self.score_reset {
            return named_score(board, slot, ScoreAction::Remove);
        }
        Packet::ResetScore(ResetScorePacket {
            owner: slot.symbol(),
            objective: board.to_string(),
        })
    }

    fn encode_score_label_update(
        &self,
        board: &BoardId,
        slot: Slot,
        label: Option<&Text>,
    ) -> Packet {
        self.set_score(board, slot, label)
    }

    fn encode_row_create(&self, board: &BoardId, slot: Slot, line: &Text) -> Packet {
        row(board, slot, TeamMode::Create, line)
    }

    fn encode_row_update(&self, board: &BoardId, slot: Slot, line: &Text) -> Packet {
        row(board, slot, TeamMode::Update, line)
    }

    fn encode_row_remove(&self, board: &BoardId, slot: Slot) -> Packet {
        team(board, slot, TeamMode::Remove, None)
    }
}
