//! Crate-level test doubles and behaviour tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::TransportError;
use crate::packet::{ActionField, ObjectiveMode, Packet, ScoreAction, TeamMode};
use crate::transport::TransportSink;

mod behaviour;

/// Sink recording every delivered packet, shared between clones.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Default)]
struct Recorded {
    packets: Vec<(String, Packet)>,
    unreachable: HashSet<String>,
    failing: bool,
}

impl RecordingSink {
    fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every packet delivered so far.
    pub(crate) fn packets(&self) -> Vec<Packet> {
        self.recorded()
            .packets
            .iter()
            .map(|(_, packet)| packet.clone())
            .collect()
    }

    /// Packets delivered to `viewer`.
    pub(crate) fn packets_for(&self, viewer: &str) -> Vec<Packet> {
        self.recorded()
            .packets
            .iter()
            .filter(|(target, _)| target == viewer)
            .map(|(_, packet)| packet.clone())
            .collect()
    }

    /// Drains the packets delivered so far.
    pub(crate) fn take(&self) -> Vec<Packet> {
        self.recorded()
            .packets
            .drain(..)
            .map(|(_, packet)| packet)
            .collect()
    }

    pub(crate) fn set_reachable(&self, viewer: &str, reachable: bool) {
        let mut recorded = self.recorded();
        if reachable {
            recorded.unreachable.remove(viewer);
        } else {
            recorded.unreachable.insert(viewer.to_owned());
        }
    }

    pub(crate) fn fail_sends(&self, failing: bool) {
        self.recorded().failing = failing;
    }
}

impl TransportSink for RecordingSink {
    type Viewer = String;

    fn send(&self, viewer: &Self::Viewer, packet: &Packet) -> Result<(), TransportError> {
        let mut recorded = self.recorded();
        if recorded.failing {
            return Err(TransportError::delivery("connection closed"));
        }
        recorded.packets.push((viewer.clone(), packet.clone()));
        Ok(())
    }

    fn is_reachable(&self, viewer: &Self::Viewer) -> bool {
        !self.recorded().unreachable.contains(viewer)
    }
}

/// Packet counts by logical operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tally {
    pub(crate) objective_create: usize,
    pub(crate) objective_update: usize,
    pub(crate) objective_remove: usize,
    pub(crate) display: usize,
    pub(crate) score_set: usize,
    pub(crate) score_remove: usize,
    pub(crate) row_create: usize,
    pub(crate) row_update: usize,
    pub(crate) row_remove: usize,
}

impl Tally {
    pub(crate) fn of(packets: &[Packet]) -> Self {
        let mut tally = Self::default();
        for packet in packets {
            match packet {
                Packet::SetObjective(objective) => match objective.mode {
                    ObjectiveMode::Create => tally.objective_create += 1,
                    ObjectiveMode::Update => tally.objective_update += 1,
                    ObjectiveMode::Remove => tally.objective_remove += 1,
                },
                Packet::DisplayObjective(_) => tally.display += 1,
                Packet::SetScore(score) => match score.action {
                    Some(ActionField::Ordinal(1) | ActionField::Named(ScoreAction::Remove)) => {
                        tally.score_remove += 1;
                    }
                    _ => tally.score_set += 1,
                },
                Packet::ResetScore(_) => tally.score_remove += 1,
                Packet::SetTeam(team) => match team.mode {
                    TeamMode::Create => tally.row_create += 1,
                    TeamMode::Update => tally.row_update += 1,
                    TeamMode::Remove => tally.row_remove += 1,
                },
            }
        }
        tally
    }
}
