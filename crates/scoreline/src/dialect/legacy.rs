//! Oldest plain-text dialect.
//!
//! Score actions are integer ordinals, removals carry only the holder and
//! the team packet has no visibility or collision fields. Removing the
//! objective still sends an empty display name.

use crate::packet::{
    ActionField, DisplaySlot, ObjectiveMode, Packet, SIDEBAR_POSITION, ScoreAction, ScorePacket,
    TeamBody, TeamMode, TeamParameters, WireText,
};
use crate::state::{BoardId, Slot};
use crate::text::Text;

use super::{Capabilities, Dialect, ProtocolDialect, display_slot, objective, plain, team};

/// Encoder for [`Dialect::Legacy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDialect;

impl LegacyDialect {
    fn row(self, board: &BoardId, slot: Slot, mode: TeamMode, line: &Text) -> Packet {
        let split = self.split(line, slot);
        let parameters = TeamParameters {
            display_name: WireText::Plain(String::new()),
            color: None,
            prefix: WireText::Plain(split.prefix().to_owned()),
            suffix: WireText::Plain(split.suffix().to_owned()),
            nametag_visibility: None,
            collision_rule: None,
        };
        team(board, slot, mode, Some(TeamBody::Inline(parameters)))
    }

    fn score_change(board: &BoardId, slot: Slot) -> Packet {
        Packet::SetScore(ScorePacket {
            owner: slot.symbol(),
            objective: Some(board.to_string()),
            action: Some(ActionField::Ordinal(ScoreAction::Change.ordinal())),
            value: Some(slot.value()),
            number_format: None,
        })
    }
}

impl ProtocolDialect for LegacyDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Legacy
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::PLAIN
    }

    fn encode_create_objective(&self, board: &BoardId, title: &Text) -> Packet {
        objective(board, ObjectiveMode::Create, Some(plain(title)), None)
    }

    fn encode_update_objective(&self, board: &BoardId, title: &Text) -> Packet {
        objective(board, ObjectiveMode::Update, Some(plain(title)), None)
    }

    fn encode_remove_objective(&self, board: &BoardId) -> Packet {
        objective(
            board,
            ObjectiveMode::Remove,
            Some(WireText::Plain(String::new())),
            None,
        )
    }

    fn encode_display_slot(&self, board: &BoardId) -> Packet {
        display_slot(board, DisplaySlot::Position(SIDEBAR_POSITION))
    }

    fn encode_score_create(&self, board: &BoardId, slot: Slot, _label: Option<&Text>) -> Packet {
        Self::score_change(board, slot)
    }

    fn encode_score_remove(&self, _board: &BoardId, slot: Slot) -> Packet {
        Packet::SetScore(ScorePacket {
            owner: slot.symbol(),
            objective: None,
            action: Some(ActionField::Ordinal(ScoreAction::Remove.ordinal())),
            value: None,
            number_format: None,
        })
    }

    fn encode_score_label_update(
        &self,
        board: &BoardId,
        slot: Slot,
        _label: Option<&Text>,
    ) -> Packet {
        Self::score_change(board, slot)
    }

    fn encode_row_create(&self, board: &BoardId, slot: Slot, line: &Text) -> Packet {
        self.row(board, slot, TeamMode::Create, line)
    }

    fn encode_row_update(&self, board: &BoardId, slot: Slot, line: &Text) -> Packet {
        self.row(board, slot, TeamMode::Update, line)
    }

    fn encode_row_remove(&self, board: &BoardId, slot: Slot) -> Packet {
        team(board, slot, TeamMode::Remove, None)
    }
}
