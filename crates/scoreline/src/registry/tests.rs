//! Unit tests for the board registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rstest::{fixture, rstest};

use super::*;
use crate::error::ValidationError;
use crate::packet::{ObjectiveMode, Packet};
use crate::tests::{RecordingSink, Tally};
use crate::text::Text;

const MODERN_CLIENT: HostInfo = HostInfo::new(740);
const WRAPPED_CLIENT: HostInfo = HostInfo::new(760);
const CURRENT_CLIENT: HostInfo = HostInfo::new(770);

#[fixture]
fn sink() -> RecordingSink {
    RecordingSink::default()
}

fn removed_objectives(packets: &[Packet]) -> Vec<String> {
    packets
        .iter()
        .filter_map(|packet| match packet {
            Packet::SetObjective(objective) if objective.mode == ObjectiveMode::Remove => {
                Some(objective.name.clone())
            }
            _ => None,
        })
        .collect()
}

#[rstest]
fn register_negotiates_dialect(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink.clone());
    let board = registry
        .register("alice".to_owned(), &MODERN_CLIENT)
        .expect("register");
    assert_eq!(board.dialect(), Dialect::Modern);
    assert_eq!(Tally::of(&sink.packets_for("alice")).objective_create, 1);
    assert_eq!(registry.len(), 1);
}

#[rstest]
fn register_uses_client_generation(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink.clone());
    let board = registry
        .register("carol".to_owned(), &WRAPPED_CLIENT)
        .expect("register");
    assert_eq!(board.dialect(), Dialect::Current);
    assert!(!board.supports_custom_score_labels());
    board.set_lines(["a", "b"]).expect("grow");
    board.set_lines(["a"]).expect("shrink");
    let resets = sink
        .packets_for("carol")
        .iter()
        .filter(|packet| matches!(packet, Packet::ResetScore(_)))
        .count();
    assert_eq!(resets, 0);
}

#[rstest]
fn pinned_dialect_overrides_negotiation(sink: RecordingSink) {
    let config = Config {
        dialect: DialectSelection::MidEra,
        refresh_ticks: 40,
        ..Config::default()
    };
    let mut registry = BoardRegistry::from_config(sink, &config);
    let board = registry
        .register("bob".to_owned(), &CURRENT_CLIENT)
        .expect("register");
    assert_eq!(board.dialect(), Dialect::MidEra);
    assert_eq!(registry.refresh_ticks(), 40);
    assert_eq!(registry.refresh_interval(), Duration::from_secs(2));
}

#[rstest]
fn re_registering_replaces_previous_board(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink.clone());
    let first = registry
        .register("alice".to_owned(), &CURRENT_CLIENT)
        .expect("first")
        .id()
        .clone();
    sink.take();
    registry
        .register("alice".to_owned(), &CURRENT_CLIENT)
        .expect("second");
    assert_eq!(removed_objectives(&sink.take()), vec![first.to_string()]);
    assert_eq!(registry.len(), 1);
}

#[rstest]
fn register_hook_prepares_new_boards(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink)
        .with_on_register(|board| board.set_title("§6Lobby"));
    let board = registry
        .register("alice".to_owned(), &CURRENT_CLIENT)
        .expect("register");
    assert_eq!(board.title(), Text::from("§6Lobby"));
}

#[rstest]
fn failing_register_hook_keeps_board(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink).with_on_register(|_| {
        Err(ValidationError::TooManyLines { count: 99, max: 15 }.into())
    });
    registry
        .register("alice".to_owned(), &CURRENT_CLIENT)
        .expect("register");
    assert!(registry.get(&"alice".to_owned()).is_some());
}

#[rstest]
fn unregister_runs_hook_and_deletes(sink: RecordingSink) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut registry = BoardRegistry::new(sink.clone()).with_on_unregister(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let id = registry
        .register("alice".to_owned(), &CURRENT_CLIENT)
        .expect("register")
        .id()
        .clone();

    assert!(registry.unregister(&"alice".to_owned()));
    assert!(!registry.unregister(&"alice".to_owned()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(removed_objectives(&sink.packets()), vec![id.to_string()]);
    assert!(registry.is_empty());
}

#[rstest]
fn tick_refreshes_every_board(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink)
        .with_on_tick(|board| board.set_lines(["Online: 2"]));
    for viewer in ["alice", "bob"] {
        registry
            .register(viewer.to_owned(), &CURRENT_CLIENT)
            .expect("register");
    }
    let report = registry.tick();
    assert_eq!(
        report,
        TickReport {
            refreshed: 2,
            failed: 0,
        }
    );
    for board in registry.boards() {
        assert_eq!(board.lines(), vec![Text::from("Online: 2")]);
    }
}

#[rstest]
fn tick_counts_failures_without_stopping(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink).with_on_tick(|board| {
        if board.viewer() == "bob" {
            board.delete()?;
            board.set_lines(["never"])
        } else {
            board.set_lines(["ok"])
        }
    });
    for viewer in ["alice", "bob", "carol"] {
        registry
            .register(viewer.to_owned(), &CURRENT_CLIENT)
            .expect("register");
    }
    let report = registry.tick();
    assert_eq!(report.refreshed, 2);
    assert_eq!(report.failed, 1);
}

#[rstest]
fn tick_without_hook_is_empty(sink: RecordingSink) {
    let mut registry = BoardRegistry::new(sink);
    registry
        .register("alice".to_owned(), &CURRENT_CLIENT)
        .expect("register");
    assert_eq!(registry.tick(), TickReport::default());
}

#[rstest]
fn default_refresh_interval_is_one_second(sink: RecordingSink) {
    let registry = BoardRegistry::new(sink);
    assert_eq!(registry.refresh_ticks(), 20);
    assert_eq!(registry.refresh_interval(), Duration::from_secs(1));
}
