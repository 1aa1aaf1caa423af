pub mod config;
pub mod error;
pub mod frame;
pub mod manager;
pub mod replacer;
pub mod stats;

pub use config::{BufferPoolConfig, ReplacementStrategy, StrategyConfig};
pub use error::BufferPoolError;
pub use manager::{BufferPoolManager, PageHandle};
pub use stats::IoStats;
