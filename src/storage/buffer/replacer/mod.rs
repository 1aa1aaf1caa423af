mod clock;
mod cursor;
mod fifo;
mod lfu;
mod lru;

pub use clock::ClockReplacer;
pub use cursor::RingCursor;
pub use fifo::FifoReplacer;
pub use lfu::LfuReplacer;
pub use lru::LruReplacer;

use crate::common::types::FrameId;
use crate::storage::buffer::config::{ReplacementStrategy, StrategyConfig};
use crate::storage::buffer::error::BufferPoolError;
use crate::storage::buffer::frame::Frame;

/// Victim selection and per-frame policy bookkeeping.
///
/// The manager owns the shared eviction skeleton (write back if dirty, then
/// install); a replacer only decides which slot to reclaim and keeps its own
/// metadata current.
pub trait Replacer: Send {
    fn strategy(&self) -> ReplacementStrategy;

    /// A page was just loaded into `frame`
    fn record_load(&mut self, frame: &mut Frame);

    /// A resident page was pinned again
    fn record_access(&mut self, frame: &mut Frame);

    /// Pick an unpinned frame to reclaim, or `None` if every frame is pinned
    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId>;
}

/// Build the replacer for a strategy
pub fn build(
    strategy: ReplacementStrategy,
    config: &StrategyConfig,
    pool_size: usize,
) -> Result<Box<dyn Replacer>, BufferPoolError> {
    match strategy {
        ReplacementStrategy::Fifo => Ok(Box::new(FifoReplacer::new(pool_size))),
        ReplacementStrategy::Lru => Ok(Box::new(LruReplacer::new())),
        ReplacementStrategy::Lfu => Ok(Box::new(LfuReplacer::new(
            pool_size,
            config.lfu_initial_frequency,
        ))),
        ReplacementStrategy::Clock => Ok(Box::new(ClockReplacer::new(pool_size))),
        ReplacementStrategy::LruK => Err(BufferPoolError::Unsupported(strategy)),
    }
}
