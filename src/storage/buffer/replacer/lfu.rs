use crate::common::types::FrameId;
use crate::storage::buffer::config::ReplacementStrategy;
use crate::storage::buffer::frame::Frame;
use super::{Replacer, RingCursor};

/// Least frequently used replacement
///
/// The scan starts at a rotating pointer so that equally cold frames are
/// reclaimed in turn instead of always hitting the lowest slot.
pub struct LfuReplacer {
    start: RingCursor,
    initial_frequency: u64,
}

impl LfuReplacer {
    pub fn new(pool_size: usize, initial_frequency: u64) -> Self {
        Self {
            start: RingCursor::new(pool_size),
            initial_frequency,
        }
    }
}

impl Replacer for LfuReplacer {
    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Lfu
    }

    fn record_load(&mut self, frame: &mut Frame) {
        frame.frequency = self.initial_frequency;
    }

    fn record_access(&mut self, frame: &mut Frame) {
        frame.frequency = frame.frequency.saturating_add(1);
    }

    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        let mut victim: Option<usize> = None;
        for slot in self.start.iter() {
            if frames[slot].is_pinned() {
                continue;
            }
            match victim {
                Some(best) if frames[best].frequency <= frames[slot].frequency => {}
                _ => victim = Some(slot),
            }
        }

        let slot = victim?;
        self.start.move_past(slot);
        Some(slot as FrameId)
    }
}
