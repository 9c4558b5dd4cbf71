//! Delivery of encoded packets to viewers.
//!
//! The host supplies a [`TransportSink`]; the board never serializes or
//! queues packets itself. Sinks are shared between every board of a host,
//! so they take `&self` and must be thread-safe.

use std::sync::Arc;

use crate::error::TransportError;
use crate::packet::Packet;

/// Best-effort packet delivery to connected viewers.
pub trait TransportSink: Send + Sync {
    /// Handle identifying one viewer.
    type Viewer: Clone + Send + Sync;

    /// Delivers `packet` to `viewer`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the packet could not be handed to
    /// the viewer's connection.
    fn send(&self, viewer: &Self::Viewer, packet: &Packet) -> Result<(), TransportError>;

    /// Returns `true` while `viewer` is connected.
    fn is_reachable(&self, viewer: &Self::Viewer) -> bool;
}

impl<T: TransportSink + ?Sized> TransportSink for Arc<T> {
    type Viewer = T::Viewer;

    fn send(&self, viewer: &Self::Viewer, packet: &Packet) -> Result<(), TransportError> {
        (**self).send(viewer, packet)
    }

    fn is_reachable(&self, viewer: &Self::Viewer) -> bool {
        (**self).is_reachable(viewer)
    }
}
