//! Outbound transport seam

use parking_lot::Mutex;
use std::sync::Arc;

use crate::messages::OutboundMessage;

/// Opaque outbound transport to the rendering view.
///
/// Sends are synchronous and fire-and-forget: delivery and failure
/// handling belong to the transport layer, not to this model.
pub trait ViewChannel: Send {
    fn send(&self, message: &OutboundMessage);
}

/// Channel that buffers every message in memory.
///
/// Useful in tests and for embedders that drain state pushes themselves
/// instead of wiring a live transport.
#[derive(Clone, Default)]
pub struct RecordingChannel {
    messages: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything sent so far
    pub fn drain(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Snapshot of everything sent so far
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl ViewChannel for RecordingChannel {
    fn send(&self, message: &OutboundMessage) {
        self.messages.lock().push(message.clone());
    }
}
