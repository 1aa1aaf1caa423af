// Pagepool: a fixed-size page cache over a flat page file

pub mod common;
pub mod storage;

// Re-export key items for convenient access
pub use common::types::{PageId, FrameId, PAGE_SIZE};
pub use storage::buffer::{
    BufferPoolConfig, BufferPoolError, BufferPoolManager, IoStats, PageHandle,
    ReplacementStrategy, StrategyConfig,
};
pub use storage::disk::{PageFile, PageFileError};
