//! The per-viewer board and its reconciliation engine.
//!
//! A [`Board`] owns a [`BoardState`] behind a mutex and sends the packets
//! needed to move the viewer's sidebar from the previous state to the new
//! one. Every mutator validates first, then computes the packet sequence
//! against the old state, commits, and emits while still holding the lock,
//! so concurrent callers can never interleave two diffs.
//!
//! Rows map to scores counted from the bottom. Changing the line count
//! therefore moves every row's score, which is why single-row inserts and
//! removals go through the same diff as [`Board::set_lines`].
//!
//! Emission is best-effort. An unreachable viewer gets no packets and a
//! failing send stops the sequence with a warning; in both cases the state
//! is still committed so a later resync can rebuild the sidebar from it.


use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::dialect::{Capabilities, Dialect, ProtocolDialect};
use crate::error::{BoardError, ValidationError};
use crate::packet::Packet;
use crate::state::{BoardId, BoardState, MAX_LINES, MAX_ROW, Row, Slot};
use crate::text::Text;
use crate::transport::TransportSink;

const BOARD_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::board");

/// A sidebar shown to one viewer.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use scoreline::{Board, Dialect, Packet, TransportError, TransportSink};
///
/// #[derive(Default)]
/// struct Outbox(Mutex<Vec<Packet>>);
///
/// impl TransportSink for Outbox {
///     type Viewer = u32;
///
///     fn send(&self, _viewer: &u32, packet: &Packet) -> Result<(), TransportError> {
///         self.0.lock().expect("outbox lock").push(packet.clone());
///         Ok(())
///     }
///
///     fn is_reachable(&self, _viewer: &u32) -> bool {
///         true
///     }
/// }
///
/// let outbox = Arc::new(Outbox::default());
/// let board = Board::create(7, Arc::clone(&outbox), Dialect::Current)?;
/// board.set_title("§6Arena")?;
/// board.set_lines(["§aKills: 3", "§cDeaths: 1"])?;
/// assert_eq!(board.size(), 2);
/// assert_eq!(outbox.0.lock().expect("outbox lock").len(), 7);
/// # Ok::<(), scoreline::BoardError>(())
/// ```
pub struct Board<S: TransportSink> {
    id: BoardId,
    viewer: S::Viewer,
    sink: S,
    encoder: &'static dyn ProtocolDialect,
    state: Mutex<BoardState>,
}

impl<S: TransportSink> Board<S> {
    /// Creates a board with a fresh id and shows it to `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Transport`] when the objective cannot be sent.
    pub fn create(viewer: S::Viewer, sink: S, dialect: Dialect) -> Result<Self, BoardError> {
        Self::with_id(BoardId::generate(), viewer, sink, dialect)
    }

    /// Creates a board with an explicit id and shows it to `viewer`.
    ///
    /// The objective and its sidebar binding are sent immediately; nothing
    /// is sent while the viewer is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Transport`] when the objective cannot be sent.
    pub fn with_id(
        id: BoardId,
        viewer: S::Viewer,
        sink: S,
        dialect: Dialect,
    ) -> Result<Self, BoardError> {
        Self::with_encoder(id, viewer, sink, dialect.encoder())
    }

    /// Creates a board that encodes with `encoder`, usually one chosen by
    /// [`Dialect::encoder_for`] for the viewer's client generation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Transport`] when the objective cannot be sent.
    pub fn with_encoder(
        id: BoardId,
        viewer: S::Viewer,
        sink: S,
        encoder: &'static dyn ProtocolDialect,
    ) -> Result<Self, BoardError> {
        let dialect = encoder.dialect();
        let state = BoardState::new(id.clone());
        let packets = [
            encoder.encode_create_objective(&id, state.title()),
            encoder.encode_display_slot(&id),
        ];
        if sink.is_reachable(&viewer) {
            for packet in &packets {
                sink.send(&viewer, packet)?;
            }
        } else {
            debug!(
                target: BOARD_TARGET,
                board = %id,
                "viewer unreachable at creation; objective not sent"
            );
        }
        info!(target: BOARD_TARGET, board = %id, %dialect, "board created");
        Ok(Self {
            id,
            viewer,
            sink,
            encoder,
            state: Mutex::new(state),
        })
    }

    /// Board identifier.
    #[must_use]
    pub const fn id(&self) -> &BoardId {
        &self.id
    }

    /// Viewer this board is shown to.
    #[must_use]
    pub const fn viewer(&self) -> &S::Viewer {
        &self.viewer
    }

    /// Dialect chosen at creation.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.encoder.dialect()
    }

    /// Capabilities of the board's dialect.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.encoder.capabilities()
    }

    /// Returns `true` when score labels reach the viewer.
    #[must_use]
    pub fn supports_custom_score_labels(&self) -> bool {
        self.capabilities().supports_custom_score_label
    }

    /// Current title.
    #[must_use]
    pub fn title(&self) -> Text {
        self.lock().title().clone()
    }

    /// Copy of every line, top first.
    #[must_use]
    pub fn lines(&self) -> Vec<Text> {
        self.lock().lines()
    }

    /// Copy of every score label, top first.
    #[must_use]
    pub fn score_labels(&self) -> Vec<Option<Text>> {
        self.lock().score_labels()
    }

    /// Line at `row`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RowOutOfRange`] when `row >= size()`.
    pub fn line(&self, row: usize) -> Result<Text, ValidationError> {
        let state = self.lock();
        state
            .row(row)
            .map(|entry| entry.text().clone())
            .ok_or(ValidationError::RowOutOfRange {
                row,
                size: state.size(),
            })
    }

    /// Score label at `row`; `None` means the numeric score is shown.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RowOutOfRange`] when `row >= size()`.
    pub fn score_label(&self, row: usize) -> Result<Option<Text>, ValidationError> {
        let state = self.lock();
        state
            .row(row)
            .map(|entry| entry.label().cloned())
            .ok_or(ValidationError::RowOutOfRange {
                row,
                size: state.size(),
            })
    }

    /// Number of lines.
    #[must_use]
    pub fn size(&self) -> usize {
        self.lock().size()
    }

    /// Returns `true` once [`Board::delete`] has run.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.lock().is_deleted()
    }

    /// Consistent copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.lock().clone()
    }

    /// Changes the title. Setting the current title sends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Deleted`] after deletion and
    /// [`ValidationError::TitleTooLong`] when the dialect limits titles.
    pub fn set_title(&self, title: impl Into<Text>) -> Result<(), BoardError> {
        let title = title.into();
        let mut state = self.lock();
        self.ensure_live(&state)?;
        if state.title() == &title {
            return Ok(());
        }
        self.validate_title(&title)?;
        let packet = self.encoder.encode_update_objective(&self.id, &title);
        state.set_title(title);
        self.emit("set_title", &[packet]);
        Ok(())
    }

    /// Sets the line at `row` and shows the numeric score for it.
    ///
    /// # Errors
    ///
    /// See [`Board::set_line_with_label`].
    pub fn set_line(&self, row: usize, line: impl Into<Text>) -> Result<(), BoardError> {
        self.set_line_with_label(row, line, None)
    }

    /// Sets the line and score label at `row`.
    ///
    /// An existing row is changed in place and only the fields that differ
    /// are sent. A row at or past the end is appended, padding with empty
    /// lines, through the bulk diff.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Deleted`] after deletion,
    /// [`ValidationError::RowBeyondCapacity`] when `row` exceeds
    /// [`MAX_ROW`] and [`ValidationError::LineTooLong`] when the dialect
    /// limits line length.
    pub fn set_line_with_label(
        &self,
        row: usize,
        line: impl Into<Text>,
        label: Option<Text>,
    ) -> Result<(), BoardError> {
        let line = line.into();
        let mut state = self.lock();
        self.ensure_live(&state)?;
        if row > MAX_ROW {
            return Err(ValidationError::RowBeyondCapacity { row, max: MAX_ROW }.into());
        }

        let size = state.size();
        let Some(current) = state.row(row) else {
            let mut rows = state.rows().to_vec();
            rows.resize(row, Row::default());
            rows.push(Row::new(line, label));
            return self.reconcile(&mut state, rows, "set_line");
        };

        self.validate_line(row, &line)?;
        let slot = slot_for_score(size - row - 1)?;
        let mut packets = Vec::new();
        if current.text() != &line {
            packets.push(self.encoder.encode_row_update(&self.id, slot, &line));
        }
        if self.supports_custom_score_labels() && current.label() != label.as_ref() {
            packets.push(
                self.encoder
                    .encode_score_label_update(&self.id, slot, label.as_ref()),
            );
        }
        state.set_text(row, line);
        state.set_label(row, label);
        self.emit("set_line", &packets);
        Ok(())
    }

    /// Removes the line at `row`, moving later lines up. Rows past the end
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Deleted`] after deletion.
    pub fn remove_line(&self, row: usize) -> Result<(), BoardError> {
        let mut state = self.lock();
        self.ensure_live(&state)?;
        if row >= state.size() {
            return Ok(());
        }
        let mut rows = state.rows().to_vec();
        rows.remove(row);
        self.reconcile(&mut state, rows, "remove_line")
    }

    /// Replaces every line; all score labels become unset.
    ///
    /// # Errors
    ///
    /// See [`Board::set_lines_with_labels`].
    pub fn set_lines<I>(&self, lines: I) -> Result<(), BoardError>
    where
        I: IntoIterator,
        I::Item: Into<Text>,
    {
        self.set_lines_with_labels(lines, None)
    }

    /// Replaces every line and, when given, every score label.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Deleted`] after deletion,
    /// [`ValidationError::LabelCountMismatch`] when `labels` and `lines`
    /// differ in length, [`ValidationError::TooManyLines`] beyond
    /// [`MAX_LINES`] and [`ValidationError::LineTooLong`] when the dialect
    /// limits line length.
    pub fn set_lines_with_labels<I>(
        &self,
        lines: I,
        labels: Option<Vec<Option<Text>>>,
    ) -> Result<(), BoardError>
    where
        I: IntoIterator,
        I::Item: Into<Text>,
    {
        let lines: Vec<Text> = lines.into_iter().map(Into::into).collect();
        let mut state = self.lock();
        self.ensure_live(&state)?;
        let rows: Vec<Row> = match labels {
            None => lines.into_iter().map(|line| Row::new(line, None)).collect(),
            Some(labels) if labels.len() == lines.len() => lines
                .into_iter()
                .zip(labels)
                .map(|(line, label)| Row::new(line, label))
                .collect(),
            Some(labels) => {
                return Err(ValidationError::LabelCountMismatch {
                    lines: lines.len(),
                    labels: labels.len(),
                }
                .into());
            }
        };
        self.reconcile(&mut state, rows, "set_lines")
    }

    /// Replaces the numeric score of `row` with `label`. An empty label
    /// hides the score.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Deleted`] after deletion and
    /// [`ValidationError::RowOutOfRange`] when `row >= size()`.
    pub fn set_score_label(&self, row: usize, label: impl Into<Text>) -> Result<(), BoardError> {
        self.update_label(row, Some(label.into()))
    }

    /// Shows the numeric score of `row` again.
    ///
    /// # Errors
    ///
    /// Same as [`Board::set_score_label`].
    pub fn clear_score_label(&self, row: usize) -> Result<(), BoardError> {
        self.update_label(row, None)
    }

    /// Replaces every score label, sending only those that changed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Deleted`] after deletion and
    /// [`ValidationError::LabelCountMismatch`] when `labels.len() != size()`.
    pub fn set_score_labels(&self, labels: Vec<Option<Text>>) -> Result<(), BoardError> {
        let mut state = self.lock();
        self.ensure_live(&state)?;
        let size = state.size();
        if labels.len() != size {
            return Err(ValidationError::LabelCountMismatch {
                lines: size,
                labels: labels.len(),
            }
            .into());
        }
        let mut packets = Vec::new();
        for (row, label) in labels.iter().enumerate() {
            let changed = state
                .row(row)
                .is_some_and(|entry| entry.label() != label.as_ref());
            if changed && self.supports_custom_score_labels() {
                let slot = slot_for_score(size - row - 1)?;
                packets.push(
                    self.encoder
                        .encode_score_label_update(&self.id, slot, label.as_ref()),
                );
            }
        }
        for (row, label) in labels.into_iter().enumerate() {
            state.set_label(row, label);
        }
        self.emit("set_score_labels", &packets);
        Ok(())
    }

    /// Removes every row and the objective; the board accepts no further
    /// calls.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Deleted`] when already deleted.
    pub fn delete(&self) -> Result<(), BoardError> {
        let mut state = self.lock();
        self.ensure_live(&state)?;
        let size = state.size();
        let mut packets = Vec::with_capacity(size + 1);
        for score in 0..size {
            packets.push(
                self.encoder
                    .encode_row_remove(&self.id, slot_for_score(score)?),
            );
        }
        packets.push(self.encoder.encode_remove_objective(&self.id));
        state.mark_deleted();
        self.emit("delete", &packets);
        info!(target: BOARD_TARGET, board = %self.id, lines = size, "board deleted");
        Ok(())
    }

    fn update_label(&self, row: usize, label: Option<Text>) -> Result<(), BoardError> {
        let mut state = self.lock();
        self.ensure_live(&state)?;
        let size = state.size();
        let Some(current) = state.row(row) else {
            return Err(ValidationError::RowOutOfRange { row, size }.into());
        };
        let mut packets = Vec::new();
        if self.supports_custom_score_labels() && current.label() != label.as_ref() {
            let slot = slot_for_score(size - row - 1)?;
            packets.push(
                self.encoder
                    .encode_score_label_update(&self.id, slot, label.as_ref()),
            );
        }
        state.set_label(row, label);
        self.emit("set_score_label", &packets);
        Ok(())
    }

    /// Diffs `rows` against `state`, commits them and sends the packets.
    ///
    /// Surplus scores are removed highest first (team, then score), new
    /// scores are added lowest first (score, then team) and scores present
    /// on both sides are updated only where the line or label differs.
    fn reconcile(
        &self,
        state: &mut BoardState,
        rows: Vec<Row>,
        operation: &'static str,
    ) -> Result<(), BoardError> {
        self.validate_rows(&rows)?;
        let old_size = state.size();
        let new_size = rows.len();
        let labels = self.supports_custom_score_labels();
        let mut packets = Vec::new();

        for score in (new_size..old_size).rev() {
            let slot = slot_for_score(score)?;
            packets.push(self.encoder.encode_row_remove(&self.id, slot));
            packets.push(self.encoder.encode_score_remove(&self.id, slot));
        }

        for score in old_size..new_size {
            let slot = slot_for_score(score)?;
            let Some(row) = row_by_score(&rows, score) else {
                continue;
            };
            packets.push(
                self.encoder
                    .encode_score_create(&self.id, slot, row.label()),
            );
            packets.push(self.encoder.encode_row_create(&self.id, slot, row.text()));
        }

        for score in 0..old_size.min(new_size) {
            let (Some(old), Some(new)) = (state.row_by_score(score), row_by_score(&rows, score))
            else {
                continue;
            };
            let slot = slot_for_score(score)?;
            if old.text() != new.text() {
                packets.push(self.encoder.encode_row_update(&self.id, slot, new.text()));
            }
            if labels && old.label() != new.label() {
                packets.push(
                    self.encoder
                        .encode_score_label_update(&self.id, slot, new.label()),
                );
            }
        }

        state.replace_rows(rows);
        debug!(
            target: BOARD_TARGET,
            board = %self.id,
            operation,
            old_size,
            new_size,
            packets = packets.len(),
            "lines reconciled"
        );
        self.emit(operation, &packets);
        Ok(())
    }

    fn emit(&self, operation: &'static str, packets: &[Packet]) {
        if packets.is_empty() {
            return;
        }
        if !self.sink.is_reachable(&self.viewer) {
            debug!(
                target: BOARD_TARGET,
                board = %self.id,
                operation,
                packets = packets.len(),
                "viewer unreachable; packets dropped"
            );
            return;
        }
        for packet in packets {
            if let Err(error) = self.sink.send(&self.viewer, packet) {
                warn!(
                    target: BOARD_TARGET,
                    board = %self.id,
                    operation,
                    packet = packet.kind(),
                    %error,
                    "packet delivery failed; board state kept"
                );
                return;
            }
        }
    }

    fn ensure_live(&self, state: &BoardState) -> Result<(), BoardError> {
        if state.is_deleted() {
            return Err(BoardError::Deleted {
                board: self.id.clone(),
            });
        }
        Ok(())
    }

    fn validate_title(&self, title: &Text) -> Result<(), ValidationError> {
        let Some(max) = self.capabilities().max_title_length else {
            return Ok(());
        };
        let length = title.to_legacy().chars().count();
        if length > max {
            return Err(ValidationError::TitleTooLong { length, max });
        }
        Ok(())
    }

    fn validate_line(&self, index: usize, line: &Text) -> Result<(), ValidationError> {
        let Some(max) = self.capabilities().max_line_length else {
            return Ok(());
        };
        let length = line.to_legacy().chars().count();
        if length > max {
            return Err(ValidationError::LineTooLong { index, length, max });
        }
        Ok(())
    }

    fn validate_rows(&self, rows: &[Row]) -> Result<(), ValidationError> {
        if rows.len() > MAX_LINES {
            return Err(ValidationError::TooManyLines {
                count: rows.len(),
                max: MAX_LINES,
            });
        }
        rows.iter()
            .enumerate()
            .try_for_each(|(index, row)| self.validate_line(index, row.text()))
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn slot_for_score(score: usize) -> Result<Slot, ValidationError> {
    Slot::new(score).ok_or(ValidationError::RowBeyondCapacity {
        row: score,
        max: MAX_ROW,
    })
}

fn row_by_score(rows: &[Row], score: usize) -> Option<&Row> {
    let index = rows.len().checked_sub(score.checked_add(1)?)?;
    rows.get(index)
}
