use crate::common::types::FrameId;
use crate::storage::buffer::config::ReplacementStrategy;
use crate::storage::buffer::frame::Frame;
use super::{Replacer, RingCursor};

/// CLOCK (second chance) replacement
pub struct ClockReplacer {
    hand: RingCursor,
}

impl ClockReplacer {
    pub fn new(pool_size: usize) -> Self {
        Self {
            hand: RingCursor::new(pool_size),
        }
    }

    pub fn hand(&self) -> usize {
        self.hand.get()
    }
}

impl Replacer for ClockReplacer {
    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Clock
    }

    fn record_load(&mut self, frame: &mut Frame) {
        frame.reference = true;
    }

    fn record_access(&mut self, frame: &mut Frame) {
        frame.reference = true;
    }

    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        if frames.iter().all(Frame::is_pinned) {
            return None;
        }

        // The first pass clears every unpinned reference bit, so the second
        // pass is guaranteed to find a victim.
        for _ in 0..2 * self.hand.len() {
            let slot = self.hand.get();
            let frame = &mut frames[slot];
            if frame.is_pinned() {
                self.hand.advance();
            } else if frame.reference {
                frame.reference = false;
                self.hand.advance();
            } else {
                self.hand.move_past(slot);
                return Some(slot as FrameId);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::buffer::replacer::test_util::frames_with;

    #[test]
    fn test_second_chance_then_wrap() {
        let mut replacer = ClockReplacer::new(2);
        let mut frames = frames_with(&[1, 2]);
        for frame in frames.iter_mut() {
            replacer.record_load(frame);
        }

        assert_eq!(replacer.victim(&mut frames), Some(0));
        assert!(!frames[1].reference);
        assert_eq!(replacer.hand(), 1);
    }

    #[test]
    fn test_unreferenced_frame_evicted_first() {
        let mut replacer = ClockReplacer::new(3);
        let mut frames = frames_with(&[1, 2, 3]);
        frames[0].reference = true;
        frames[1].reference = false;
        frames[2].reference = true;

        assert_eq!(replacer.victim(&mut frames), Some(1));
        assert!(!frames[0].reference);
        assert!(frames[2].reference);
        assert_eq!(replacer.hand(), 2);
    }

    #[test]
    fn test_pinned_frames_keep_their_bit() {
        let mut replacer = ClockReplacer::new(3);
        let mut frames = frames_with(&[1, 2, 3]);
        for frame in frames.iter_mut() {
            replacer.record_load(frame);
        }
        frames[0].pin_count = 1;

        assert_eq!(replacer.victim(&mut frames), Some(1));
        assert!(frames[0].reference);
        assert!(!frames[2].reference);
    }

    #[test]
    fn test_access_restores_second_chance() {
        let mut replacer = ClockReplacer::new(2);
        let mut frames = frames_with(&[1, 2]);

        assert_eq!(replacer.victim(&mut frames), Some(0));
        replacer.record_access(&mut frames[1]);
        replacer.record_load(&mut frames[0]);
        frames[0].reference = false;

        // hand is on slot 1, whose bit was just set
        assert_eq!(replacer.victim(&mut frames), Some(0));
        assert!(!frames[1].reference);
    }
}
