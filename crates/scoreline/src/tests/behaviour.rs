//! Behaviour-driven tests for board reconciliation.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::board::Board;
use crate::dialect::Dialect;
use crate::error::BoardError;
use crate::state::BoardId;

use super::{RecordingSink, Tally};

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    sink: RecordingSink,
    viewer: String,
    board: Option<Board<RecordingSink>>,
    sent: Tally,
    outcome: Option<Result<(), BoardError>>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn board(world: &TestWorld) -> &Board<RecordingSink> {
    world.board.as_ref().expect("board should be created first")
}

fn split_lines(lines: &str) -> Vec<String> {
    lines
        .trim_matches('"')
        .split(',')
        .map(str::to_owned)
        .collect()
}

/// Runs `action` against the board, recording its outcome and the packets
/// it sent.
fn perform(
    world: &mut TestWorld,
    action: impl FnOnce(&Board<RecordingSink>) -> Result<(), BoardError>,
) {
    world.sink.take();
    let outcome = action(board(world));
    world.sent = Tally::of(&world.sink.take());
    world.outcome = Some(outcome);
}

fn tally_field(tally: Tally, kind: &str) -> usize {
    match kind {
        "objective_create" => tally.objective_create,
        "objective_update" => tally.objective_update,
        "objective_remove" => tally.objective_remove,
        "score_set" => tally.score_set,
        "score_remove" => tally.score_remove,
        "row_create" => tally.row_create,
        "row_update" => tally.row_update,
        "row_remove" => tally.row_remove,
        other => panic!("unsupported packet kind: '{other}'"),
    }
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a board for {viewer} speaking {dialect}")]
fn given_board(world: &mut TestWorld, viewer: String, dialect: String) {
    let dialect = Dialect::from_str(dialect.trim_matches('"')).expect("known dialect");
    world.viewer = viewer.trim_matches('"').to_owned();
    let created = Board::with_id(
        BoardId::new("sl-bdd"),
        world.viewer.clone(),
        world.sink.clone(),
        dialect,
    )
    .expect("create board");
    world.board = Some(created);
    world.sink.take();
}

#[given("the viewer is unreachable")]
fn given_unreachable(world: &mut TestWorld) {
    world.sink.set_reachable(&world.viewer, false);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the lines are set to {lines}")]
fn when_set_lines(world: &mut TestWorld, lines: String) {
    let lines = split_lines(&lines);
    perform(world, |board| board.set_lines(lines));
}

#[when("the title is set to {title}")]
fn when_set_title(world: &mut TestWorld, title: String) {
    let title = title.trim_matches('"').to_owned();
    perform(world, |board| board.set_title(title));
}

#[when("row {row} is labelled {label}")]
fn when_label_row(world: &mut TestWorld, row: usize, label: String) {
    let label = label.trim_matches('"').to_owned();
    perform(world, |board| board.set_score_label(row, label));
}

#[when("the board is deleted")]
fn when_deleted(world: &mut TestWorld) {
    perform(world, Board::delete);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("{count} {kind} packets were sent")]
fn then_packets_sent(world: &mut TestWorld, count: usize, kind: String) {
    let sent = tally_field(world.sent, kind.trim_matches('"'));
    assert_eq!(sent, count, "unexpected {kind} count in {:?}", world.sent);
}

#[then("no packets were sent")]
fn then_nothing_sent(world: &mut TestWorld) {
    assert_eq!(world.sent, Tally::default());
}

#[then("the board shows {lines}")]
fn then_board_shows(world: &mut TestWorld, lines: String) {
    let shown: Vec<String> = board(world)
        .lines()
        .iter()
        .map(|line| line.to_legacy())
        .collect();
    assert_eq!(shown, split_lines(&lines));
}

#[then("the call failed because the board was deleted")]
fn then_failed_deleted(world: &mut TestWorld) {
    let outcome = world.outcome.as_ref().expect("no call recorded");
    assert!(
        matches!(outcome, Err(BoardError::Deleted { .. })),
        "expected Deleted, got: {outcome:?}"
    );
}

#[then("the call failed validation")]
fn then_failed_validation(world: &mut TestWorld) {
    let outcome = world.outcome.as_ref().expect("no call recorded");
    assert!(
        matches!(outcome, Err(BoardError::Validation(_))),
        "expected a validation error, got: {outcome:?}"
    );
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/board_reconciliation.feature",
    name = "Growing, changing and shrinking the line set"
)]
fn growing_changing_and_shrinking(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_reconciliation.feature",
    name = "Repeating the same lines sends nothing"
)]
fn repeated_lines_send_nothing(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_reconciliation.feature",
    name = "Updates are kept while the viewer is away"
)]
fn updates_kept_while_viewer_away(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_reconciliation.feature",
    name = "A deleted board rejects further changes"
)]
fn deleted_board_rejects_changes(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_reconciliation.feature",
    name = "Score labels reach capable clients only"
)]
fn labels_need_capable_dialect(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_reconciliation.feature",
    name = "Score labels replace the number on current clients"
)]
fn labels_replace_number_on_current(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_reconciliation.feature",
    name = "Long plain lines are rejected"
)]
fn long_plain_lines_rejected(world: TestWorld) {
    let _ = world;
}
