//! First rich-text dialect.
//!
//! Titles and team fields are chat components, but team fields still sit
//! inline on the team packet and score removals carry only the owner and
//! the action.

use crate::packet::{
    ALWAYS, ActionField, DisplaySlot, ObjectiveMode, Packet, RenderType, SIDEBAR_POSITION,
    ScoreAction, ScorePacket, TeamBody, TeamMode, TeamParameters,
};
use crate::state::{BoardId, Slot};
use crate::text::Text;

use super::{
    Capabilities, Dialect, ProtocolDialect, component, display_slot, empty_component, objective,
    team,
};

/// Encoder for [`Dialect::Modern`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernDialect;

fn row(board: &BoardId, slot: Slot, mode: TeamMode, line: &Text) -> Packet {
    let parameters = TeamParameters {
        display_name: empty_component(),
        color: None,
        prefix: component(line),
        suffix: empty_component(),
        nametag_visibility: Some(ALWAYS),
        collision_rule: Some(ALWAYS),
    };
    team(board, slot, mode, Some(TeamBody::Inline(parameters)))
}

fn score_change(board: &BoardId, slot: Slot) -> Packet {
    Packet::SetScore(ScorePacket {
        owner: slot.symbol(),
        objective: Some(board.to_string()),
        action: Some(ActionField::Named(ScoreAction::Change)),
        value: Some(slot.value()),
        number_format: None,
    })
}

impl ProtocolDialect for ModernDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Modern
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::RICH
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
        display_slot(board, DisplaySlot::Position(SIDEBAR_POSITION))
    }

    fn encode_score_create(&self, board: &BoardId, slot: Slot, _label: Option<&Text>) -> Packet {
        score_change(board, slot)
    }

    fn encode_score_remove(&self, _board: &BoardId, slot: Slot) -> Packet {
        Packet::SetScore(ScorePacket {
            owner: slot.symbol(),
            objective: None,
            action: Some(ActionField::Named(ScoreAction::Remove)),
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
        score_change(board, slot)
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
