use crate::common::types::FrameId;
use crate::storage::buffer::config::ReplacementStrategy;
use crate::storage::buffer::frame::Frame;
use super::Replacer;

/// Least recently used replacement
///
/// Every load and hit stamps the frame with the next value of a pool-local
/// counter; the unpinned frame with the smallest stamp is the victim.
pub struct LruReplacer {
    clock: u64,
}

impl LruReplacer {
    pub fn new() -> Self {
        Self { clock: 0 }
    }

    fn stamp(&mut self, frame: &mut Frame) {
        self.clock += 1;
        frame.last_used = self.clock;
    }
}

impl Default for LruReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer for LruReplacer {
    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Lru
    }

    fn record_load(&mut self, frame: &mut Frame) {
        self.stamp(frame);
    }

    fn record_access(&mut self, frame: &mut Frame) {
        self.stamp(frame);
    }

    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        // min_by_key keeps the first minimum, so ties go to the lowest slot
        frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| !frame.is_pinned())
            .min_by_key(|(_, frame)| frame.last_used)
            .map(|(slot, _)| slot as FrameId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::buffer::replacer::test_util::frames_with;

    #[test]
    fn test_evicts_least_recently_used() {
        let mut replacer = LruReplacer::new();
        let mut frames = frames_with(&[1, 2, 3]);
        for frame in frames.iter_mut() {
            replacer.record_load(frame);
        }

        replacer.record_access(&mut frames[0]);
        assert_eq!(replacer.victim(&mut frames), Some(1));

        replacer.record_access(&mut frames[1]);
        assert_eq!(replacer.victim(&mut frames), Some(2));
    }

    #[test]
    fn test_ties_go_to_lowest_slot() {
        let mut replacer = LruReplacer::new();
        let mut frames = frames_with(&[1, 2, 3]);

        assert_eq!(replacer.victim(&mut frames), Some(0));
    }

    #[test]
    fn test_skips_pinned_oldest() {
        let mut replacer = LruReplacer::new();
        let mut frames = frames_with(&[1, 2, 3]);
        for frame in frames.iter_mut() {
            replacer.record_load(frame);
        }
        frames[0].pin_count = 1;

        assert_eq!(replacer.victim(&mut frames), Some(1));
    }
}
