//! One board per connected viewer.
//!
//! The [`BoardRegistry`] creates a board when the host reports a viewer
//! joining, deletes it when the viewer leaves, and runs a refresh hook over
//! every board each time the host's scheduler calls [`BoardRegistry::tick`].
//! Scheduling itself stays with the host; [`BoardRegistry::refresh_ticks`]
//! and [`BoardRegistry::refresh_interval`] tell it how often to tick.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use scoreline_config::{Config, DialectSelection};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::dialect::{Dialect, HostInfo};
use crate::error::BoardError;
use crate::state::BoardId;
use crate::transport::TransportSink;

const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Callback run against one board.
pub type BoardHook<S> = Box<dyn Fn(&Board<S>) -> Result<(), BoardError> + Send + Sync>;

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Boards whose hook succeeded.
    pub refreshed: usize,
    /// Boards whose hook failed.
    pub failed: usize,
}

/// Boards keyed by viewer.
pub struct BoardRegistry<S>
where
    S: TransportSink + Clone,
    S::Viewer: Eq + Hash,
{
    sink: S,
    selection: DialectSelection,
    refresh_ticks: u64,
    refresh_interval: Duration,
    boards: HashMap<S::Viewer, Board<S>>,
    on_register: Option<BoardHook<S>>,
    on_unregister: Option<BoardHook<S>>,
    on_tick: Option<BoardHook<S>>,
}

impl<S> BoardRegistry<S>
where
    S: TransportSink + Clone,
    S::Viewer: Eq + Hash,
{
    /// Empty registry negotiating each viewer's dialect.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::from_config(sink, &Config::default())
    }

    /// Empty registry using the dialect policy and refresh period of
    /// `config`.
    #[must_use]
    pub fn from_config(sink: S, config: &Config) -> Self {
        Self {
            sink,
            selection: config.dialect(),
            refresh_ticks: config.refresh_ticks(),
            refresh_interval: config.refresh_interval(),
            boards: HashMap::new(),
            on_register: None,
            on_unregister: None,
            on_tick: None,
        }
    }

    /// Runs `hook` on each new board before it is stored.
    #[must_use]
    pub fn with_on_register<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Board<S>) -> Result<(), BoardError> + Send + Sync + 'static,
    {
        self.on_register = Some(Box::new(hook));
        self
    }

    /// Runs `hook` on a board just before it is deleted.
    #[must_use]
    pub fn with_on_unregister<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Board<S>) -> Result<(), BoardError> + Send + Sync + 'static,
    {
        self.on_unregister = Some(Box::new(hook));
        self
    }

    /// Runs `hook` on every board at each [`BoardRegistry::tick`].
    #[must_use]
    pub fn with_on_tick<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Board<S>) -> Result<(), BoardError> + Send + Sync + 'static,
    {
        self.on_tick = Some(Box::new(hook));
        self
    }

    /// Host ticks between two refresh passes.
    #[must_use]
    pub const fn refresh_ticks(&self) -> u64 {
        self.refresh_ticks
    }

    /// Wall-clock time between two refresh passes at the standard tick
    /// rate.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Dialect a viewer described by `host` would get.
    #[must_use]
    pub const fn dialect_for(&self, host: &HostInfo) -> Dialect {
        Dialect::resolve(self.selection, host)
    }

    /// Creates and stores a board for `viewer`.
    ///
    /// A board already registered for the viewer is deleted first. A
    /// failing register hook is logged; the board is kept.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Transport`] when the board cannot be created.
    pub fn register(
        &mut self,
        viewer: S::Viewer,
        host: &HostInfo,
    ) -> Result<&Board<S>, BoardError> {
        if let Some(previous) = self.boards.remove(&viewer) {
            debug!(
                target: REGISTRY_TARGET,
                board = %previous.id(),
                "replacing board for re-registered viewer"
            );
            discard(&previous);
        }

        let encoder = Dialect::resolve_encoder(self.selection, host);
        let dialect = encoder.dialect();
        let board = Board::with_encoder(
            BoardId::generate(),
            viewer.clone(),
            self.sink.clone(),
            encoder,
        )?;
        run_hook(self.on_register.as_ref(), &board, "register");
        info!(
            target: REGISTRY_TARGET,
            board = %board.id(),
            %dialect,
            pinned = self.selection.is_pinned(),
            protocol = host.protocol_version,
            "viewer registered"
        );
        Ok(&*self.boards.entry(viewer).insert_entry(board).into_mut())
    }

    /// Removes and deletes the board for `viewer`.
    ///
    /// Returns `false` when the viewer had no board.
    pub fn unregister(&mut self, viewer: &S::Viewer) -> bool {
        let Some(board) = self.boards.remove(viewer) else {
            return false;
        };
        run_hook(self.on_unregister.as_ref(), &board, "unregister");
        discard(&board);
        info!(target: REGISTRY_TARGET, board = %board.id(), "viewer unregistered");
        true
    }

    /// Runs the tick hook over every board.
    ///
    /// A failing hook is logged and counted; the pass continues.
    pub fn tick(&self) -> TickReport {
        let mut report = TickReport::default();
        let Some(hook) = self.on_tick.as_ref() else {
            return report;
        };
        for board in self.boards.values() {
            if run_hook(Some(hook), board, "tick") {
                report.refreshed += 1;
            } else {
                report.failed += 1;
            }
        }
        debug!(
            target: REGISTRY_TARGET,
            refreshed = report.refreshed,
            failed = report.failed,
            "refresh pass finished"
        );
        report
    }

    /// Board registered for `viewer`.
    #[must_use]
    pub fn get(&self, viewer: &S::Viewer) -> Option<&Board<S>> {
        self.boards.get(viewer)
    }

    /// Every registered board.
    pub fn boards(&self) -> impl Iterator<Item = &Board<S>> {
        self.boards.values()
    }

    /// Number of registered boards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Returns `true` when no boards are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

/// Runs `hook` on `board`, logging a failure. Returns `true` on success.
fn run_hook<S: TransportSink>(
    hook: Option<&BoardHook<S>>,
    board: &Board<S>,
    stage: &'static str,
) -> bool {
    let Some(hook) = hook else {
        return true;
    };
    match hook(board) {
        Ok(()) => true,
        Err(error) => {
            warn!(
                target: REGISTRY_TARGET,
                board = %board.id(),
                stage,
                %error,
                "board hook failed"
            );
            false
        }
    }
}

fn discard<S: TransportSink>(board: &Board<S>) {
    if let Err(error) = board.delete() {
        warn!(
            target: REGISTRY_TARGET,
            board = %board.id(),
            %error,
            "board could not be deleted"
        );
    }
}
