use crate::common::types::FrameId;
use crate::storage::buffer::config::ReplacementStrategy;
use crate::storage::buffer::frame::Frame;
use super::{Replacer, RingCursor};

/// First-in first-out replacement
///
/// Frames are filled in slot order, so walking the ring from the slot after
/// the last replacement visits pages in arrival order. Hits do not reorder.
/// A pinned frame passed over by a scan is not reconsidered until the pointer
/// wraps back to it, even if it is the oldest page once unpinned.
pub struct FifoReplacer {
    next: RingCursor,
}

impl FifoReplacer {
    pub fn new(pool_size: usize) -> Self {
        Self {
            next: RingCursor::new(pool_size),
        }
    }
}

impl Replacer for FifoReplacer {
    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Fifo
    }

    fn record_load(&mut self, _frame: &mut Frame) {}

    fn record_access(&mut self, _frame: &mut Frame) {}

    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        let slot = self.next.iter().find(|&slot| !frames[slot].is_pinned())?;
        self.next.move_past(slot);
        Some(slot as FrameId)
    }
}
