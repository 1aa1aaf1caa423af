use serde::Serialize;

/// Cumulative I/O and hit accounting since pool creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IoStats {
    /// Pages read from the page file
    pub reads: u64,

    /// Pages written to the page file (eviction write-back, force, flush)
    pub writes: u64,

    /// Pin requests served by a resident frame
    pub hits: u64,

    /// Pin requests that had to read the page from disk
    pub misses: u64,

    /// Resident pages replaced to make room for another page
    pub evictions: u64,
}

impl IoStats {
    pub fn hit_ratio(&self) -> f64 {
        let requests = self.hits + self.misses;
        if requests == 0 {
            0.0
        } else {
            self.hits as f64 / requests as f64
        }
    }
}
