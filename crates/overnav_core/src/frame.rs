//! Frame continuation scheduler
//!
//! Queues work that must wait for the next rendered frame (layout settle)
//! before it runs. The host drives it by calling [`FrameScheduler::advance`]
//! once per frame. Work scheduled while a frame is being processed runs on
//! the following frame, never the current one.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a pending frame continuation
    pub struct FrameCallbackId;
}

/// Frame the scheduler is currently processing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInfo {
    /// Number of frames started so far (0 before the first `advance`)
    pub index: u64,
    /// Host clock at frame start, in milliseconds
    pub timestamp_ms: u64,
}

/// Continuations that became due at a frame boundary
pub type DueContinuations<T> = SmallVec<[(FrameCallbackId, T); 2]>;

/// Single-tick continuation queue
pub struct FrameScheduler<T> {
    pending: SlotMap<FrameCallbackId, T>,
    /// Scheduling order; slotmap iteration order is not insertion order
    order: Vec<FrameCallbackId>,
    current: FrameInfo,
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            order: Vec::new(),
            current: FrameInfo::default(),
        }
    }

    /// Queue a continuation for the next frame
    pub fn schedule(&mut self, payload: T) -> FrameCallbackId {
        let id = self.pending.insert(payload);
        self.order.push(id);
        tracing::trace!(frame = self.current.index, ?id, "frame continuation scheduled");
        id
    }

    /// Cancel a pending continuation, returning its payload if it had not run yet
    pub fn cancel(&mut self, id: FrameCallbackId) -> Option<T> {
        let payload = self.pending.remove(id)?;
        self.order.retain(|queued| *queued != id);
        tracing::trace!(frame = self.current.index, ?id, "frame continuation cancelled");
        Some(payload)
    }

    /// Start the next frame and take every continuation queued before it
    pub fn advance(&mut self, timestamp_ms: u64) -> (FrameInfo, DueContinuations<T>) {
        self.current = FrameInfo {
            index: self.current.index + 1,
            timestamp_ms,
        };

        let mut due = DueContinuations::new();
        for id in self.order.drain(..) {
            if let Some(payload) = self.pending.remove(id) {
                due.push((id, payload));
            }
        }

        (self.current, due)
    }

    /// Number of pending continuations
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
