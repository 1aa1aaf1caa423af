use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Page replacement policy used when the pool is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacementStrategy {
    Fifo,
    Lru,
    Lfu,
    Clock,
    /// Declared for configuration compatibility; pool creation rejects it
    LruK,
}

impl fmt::Display for ReplacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplacementStrategy::Fifo => "fifo",
            ReplacementStrategy::Lru => "lru",
            ReplacementStrategy::Lfu => "lfu",
            ReplacementStrategy::Clock => "clock",
            ReplacementStrategy::LruK => "lru-k",
        };
        f.write_str(name)
    }
}

impl FromStr for ReplacementStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(ReplacementStrategy::Fifo),
            "lru" => Ok(ReplacementStrategy::Lru),
            "lfu" => Ok(ReplacementStrategy::Lfu),
            "clock" => Ok(ReplacementStrategy::Clock),
            "lru-k" | "lru_k" | "lruk" => Ok(ReplacementStrategy::LruK),
            other => Err(format!("Unknown replacement strategy: {}", other)),
        }
    }
}

/// Per-strategy tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// History depth for LRU-K
    pub lru_k: usize,

    /// Frequency a page starts with when it is loaded under LFU
    pub lfu_initial_frequency: u64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            lru_k: 2,
            lfu_initial_frequency: 0,
        }
    }
}

/// Configuration for a buffer pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferPoolConfig {
    /// Number of frames, fixed for the lifetime of the pool
    pub pool_size: usize,

    /// Active replacement policy
    pub strategy: ReplacementStrategy,

    pub strategy_config: StrategyConfig,

    /// Grow the page file with zero pages when a pin names a page past its
    /// end. When off, such a pin fails with `OutOfRange`.
    pub extend_file: bool,
}

impl BufferPoolConfig {
    pub fn new(pool_size: usize, strategy: ReplacementStrategy) -> Self {
        Self {
            pool_size,
            strategy,
            strategy_config: StrategyConfig::default(),
            extend_file: false,
        }
    }
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self::new(64, ReplacementStrategy::Lru)
    }
}
