//! Flicker-free sidebar scoreboards over a multi-generation wire protocol.
//!
//! A [`Board`] keeps one viewer's sidebar in step with a local model. Each
//! mutation is diffed against the previous state and only the packets
//! needed to get there are sent: scores and teams are created for new rows,
//! removed for dropped rows and updated where the visible text changed.
//!
//! The same calls work against every [`Dialect`] of the protocol. The
//! dialect is chosen once per board, usually by [`negotiate`] from the
//! viewer's protocol version, and decides the packet shapes, whether text
//! is plain or rich and whether rows can carry custom score labels.
//!
//! # Architecture
//!
//! - [`text`] parses `§`-coded lines into normalized [`Text`] and splits
//!   plain lines across the two visible team fields.
//! - [`dialect`] encodes logical operations as [`Packet`]s.
//! - [`board`] owns the [`BoardState`] and runs the reconciliation.
//! - [`transport`] is the seam to the host's connection layer.
//! - [`registry`] keeps one board per viewer and drives refresh hooks.
//!
//! # Example
//!
//! ```rust,no_run
//! use scoreline::{BoardRegistry, HostInfo, TransportSink};
//!
//! fn on_join<S>(registry: &mut BoardRegistry<S>, viewer: S::Viewer, protocol: u32)
//! where
//!     S: TransportSink + Clone,
//!     S::Viewer: Eq + std::hash::Hash,
//! {
//!     let board = registry
//!         .register(viewer, &HostInfo::new(protocol))
//!         .expect("board created");
//!     board.set_title("§6§lArena").expect("title");
//!     board
//!         .set_lines(["", "§7Players: §f12", "§7Round: §f3", ""])
//!         .expect("lines");
//! }
//! ```

pub mod board;
pub mod dialect;
pub mod error;
pub mod packet;
pub mod registry;
pub mod state;
pub mod telemetry;
pub mod text;
pub mod transport;

#[cfg(test)]
mod tests;

pub use self::board::Board;
pub use self::dialect::{Capabilities, Dialect, HostInfo, ProtocolDialect, negotiate};
pub use self::error::{BoardError, TransportError, ValidationError};
pub use self::packet::Packet;
pub use self::registry::{BoardHook, BoardRegistry, TickReport};
pub use self::state::{BoardId, BoardState, MAX_LINES, MAX_ROW, Row, SLOT_CAPACITY, Slot};
pub use self::text::{SplitLine, Text, split_line};
pub use self::transport::TransportSink;
