use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

use gestris_engine::Gesture;
use tracing::trace;

/// Latest-gesture cell shared between a producer and the frame loop.
///
/// Clones share the same cell. The producer [`publish`](Self::publish)es
/// whenever it recognizes a gesture; a newer gesture replaces one that has not
/// been consumed yet. The frame loop [`take`](Self::take)s once per frame,
/// which reads the gesture and resets the cell to [`Gesture::None`] in one
/// atomic swap, so each frame sees exactly one symbol and no symbol is seen
/// twice.
#[derive(Debug, Clone, Default)]
pub struct GestureLatch {
    cell: Arc<AtomicU8>,
}

impl GestureLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, gesture: Gesture) {
        let previous = self.cell.swap(gesture as u8, Ordering::AcqRel);
        if previous != Gesture::None as u8 {
            trace!(
                %gesture,
                previous = %decode(previous),
                "replaced unconsumed gesture"
            );
        }
    }

    /// Returns the pending gesture and clears the cell.
    #[must_use]
    pub fn take(&self) -> Gesture {
        decode(self.cell.swap(Gesture::None as u8, Ordering::AcqRel))
    }

    /// Returns the pending gesture without consuming it.
    #[must_use]
    pub fn peek(&self) -> Gesture {
        decode(self.cell.load(Ordering::Acquire))
    }
}

// Only `publish` writes the cell, so every stored value is a valid gesture.
fn decode(raw: u8) -> Gesture {
    Gesture::from_repr(raw).unwrap_or_default()
}
