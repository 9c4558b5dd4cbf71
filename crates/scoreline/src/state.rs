//! Per-viewer board model.
//!
//! [`BoardState`] holds what the viewer should currently see. It performs
//! no validation and emits nothing; [`crate::board::Board`] validates input,
//! diffs against the stored state and commits through the crate-private
//! setters.
//!
//! Rows are addressed two ways. The row index counts from the top of the
//! sidebar. The score counts from the bottom, `size - row - 1`, because the
//! client sorts entries by descending score. Each score owns one [`Slot`]
//! while the row is occupied.

use std::fmt;

use rand::random;
use serde::Serialize;

use crate::text::{Color, FORMAT_CHAR, FormatCode, Text};

/// Number of slot symbols available to a board.
pub const SLOT_CAPACITY: usize = Color::ALL.len();

/// Largest number of lines a board may show; one symbol is held back.
pub const MAX_LINES: usize = SLOT_CAPACITY - 1;

/// Highest row index accepted by single-row updates.
pub const MAX_ROW: usize = MAX_LINES - 1;

/// Unique board identifier, also the objective name on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Wraps an explicit identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Random identifier in the `sl-` namespace.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("sl-{:08x}", random::<u32>()))
    }

    /// Identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The slot symbol bound to one score value.
///
/// The symbol is the colour code whose index equals the score. It renders
/// as nothing, so the score holder is invisible between prefix and suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    score: u8,
    color: Color,
}

impl Slot {
    /// Slot for `score`, or `None` beyond [`SLOT_CAPACITY`].
    #[must_use]
    pub fn new(score: usize) -> Option<Self> {
        let color = *Color::ALL.get(score)?;
        let score = u8::try_from(score).ok()?;
        Some(Self { score, color })
    }

    /// Slot occupied by `row` on a board of `size` lines.
    #[must_use]
    pub fn for_row(row: usize, size: usize) -> Option<Self> {
        size.checked_sub(row.checked_add(1)?).and_then(Self::new)
    }

    /// Score value.
    #[must_use]
    pub fn score(self) -> usize {
        usize::from(self.score)
    }

    /// Score value as sent on the wire.
    #[must_use]
    pub fn value(self) -> i32 {
        i32::from(self.score)
    }

    /// Score holder name.
    #[must_use]
    pub fn symbol(self) -> String {
        FormatCode::Color(self.color).to_string()
    }

    /// Non-empty filler shown by an empty line.
    #[must_use]
    pub fn placeholder(self) -> String {
        format!("{}{FORMAT_CHAR}r", self.symbol())
    }

    /// Team name for this slot on `board`.
    #[must_use]
    pub fn team_name(self, board: &BoardId) -> String {
        format!("{board}:{}", self.score)
    }
}

/// One displayed line and its optional score label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    text: Text,
    label: Option<Text>,
}

impl Row {
    /// Builds a row.
    #[must_use]
    pub const fn new(text: Text, label: Option<Text>) -> Self {
        Self { text, label }
    }

    /// Visible line.
    #[must_use]
    pub const fn text(&self) -> &Text {
        &self.text
    }

    /// Score label; `None` shows the numeric score.
    #[must_use]
    pub const fn label(&self) -> Option<&Text> {
        self.label.as_ref()
    }
}

/// What one viewer's sidebar currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    id: BoardId,
    title: Text,
    rows: Vec<Row>,
    deleted: bool,
}

impl BoardState {
    /// Empty, live state.
    #[must_use]
    pub const fn new(id: BoardId) -> Self {
        Self {
            id,
            title: Text::empty(),
            rows: Vec::new(),
            deleted: false,
        }
    }

    /// Board identifier.
    #[must_use]
    pub const fn id(&self) -> &BoardId {
        &self.id
    }

    /// Current title.
    #[must_use]
    pub const fn title(&self) -> &Text {
        &self.title
    }

    /// Number of lines.
    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` once the board has been deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Rows, top first.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at `row`, counted from the top.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Copy of every line, top first.
    #[must_use]
    pub fn lines(&self) -> Vec<Text> {
        self.rows.iter().map(|row| row.text.clone()).collect()
    }

    /// Copy of every score label, top first.
    #[must_use]
    pub fn score_labels(&self) -> Vec<Option<Text>> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }

    /// Row holding `score`.
    #[must_use]
    pub fn row_by_score(&self, score: usize) -> Option<&Row> {
        let row = self.size().checked_sub(score.checked_add(1)?)?;
        self.rows.get(row)
    }

    pub(crate) fn set_title(&mut self, title: Text) {
        self.title = title;
    }

    pub(crate) fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub(crate) fn set_label(&mut self, row: usize, label: Option<Text>) {
        if let Some(entry) = self.rows.get_mut(row) {
            entry.label = label;
        }
    }

    pub(crate) fn set_text(&mut self, row: usize, text: Text) {
        if let Some(entry) = self.rows.get_mut(row) {
            entry.text = text;
        }
    }

    pub(crate) const fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
