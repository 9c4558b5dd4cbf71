//! Errors raised by board operations.
//!
//! Failures fall into three kinds. Invalid input is a [`ValidationError`]
//! and leaves the board untouched. Calls on a deleted board fail with
//! [`BoardError::Deleted`]. Delivery problems are [`TransportError`]s; the
//! board only surfaces them while it is being created and logs them
//! otherwise.

use thiserror::Error;

use crate::state::BoardId;

/// Input rejected before any packet is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An indexed read or label update named a row that does not exist.
    #[error("row {row} is out of range for a board of {size} lines")]
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Current line count.
        size: usize,
    },

    /// A row would need a slot symbol beyond the alphabet.
    #[error("row {row} is beyond the slot capacity (highest usable row is {max})")]
    RowBeyondCapacity {
        /// Requested row.
        row: usize,
        /// Highest usable row.
        max: usize,
    },

    /// A line set is larger than the slot capacity allows.
    #[error("{count} lines exceed the maximum of {max}")]
    TooManyLines {
        /// Requested line count.
        count: usize,
        /// Maximum line count.
        max: usize,
    },

    /// A line is too long for a plain-text dialect.
    #[error("line {index} is {length} characters long, the limit is {max}")]
    LineTooLong {
        /// Index of the offending line.
        index: usize,
        /// Rendered length in characters.
        length: usize,
        /// Dialect limit.
        max: usize,
    },

    /// The title is too long for a plain-text dialect.
    #[error("title is {length} characters long, the limit is {max}")]
    TitleTooLong {
        /// Rendered length in characters.
        length: usize,
        /// Dialect limit.
        max: usize,
    },

    /// The label list does not match the line list.
    #[error("{labels} score labels supplied for {lines} lines")]
    LabelCountMismatch {
        /// Number of lines.
        lines: usize,
        /// Number of labels.
        labels: usize,
    },
}

/// Failure reported by a transport sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The packet could not be delivered.
    #[error("packet delivery failed: {message}")]
    Delivery {
        /// Description supplied by the sink.
        message: String,
    },

    /// The sink refused the packet.
    #[error("transport rejected {packet} packet: {message}")]
    Rejected {
        /// Packet kind, see [`crate::packet::Packet::kind`].
        packet: &'static str,
        /// Description supplied by the sink.
        message: String,
    },
}

impl TransportError {
    /// Builds a [`TransportError::Delivery`].
    #[must_use]
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Errors returned by [`crate::board::Board`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The input was invalid; the board is unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The board was deleted and accepts no further calls.
    #[error("board '{board}' has been deleted")]
    Deleted {
        /// Id of the deleted board.
        board: BoardId,
    },

    /// The transport failed while the board was being created.
    #[error("board transport failed: {0}")]
    Transport(#[from] TransportError),
}

impl BoardError {
    /// Returns `true` when the same call may succeed with corrected input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` when the board cannot be used any more.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_retryable()
    }
}

#[cfg(test)]
mod tests;
