use std::path::PathBuf;
use thiserror::Error;

use crate::common::types::PageId;
use crate::storage::buffer::config::ReplacementStrategy;
use crate::storage::disk::PageFileError;

#[derive(Error, Debug)]
pub enum BufferPoolError {
    #[error("Page file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Page {0} not found in buffer pool")]
    PageNotFound(PageId),
    #[error("Page {page_id} is out of range (file has {total_pages} pages)")]
    OutOfRange { page_id: i64, total_pages: u32 },
    #[error("IO error: {0}")]
    IoError(#[source] std::io::Error),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Replacement strategy {0} is not supported")]
    Unsupported(ReplacementStrategy),
    #[error("Buffer pool is busy: {pinned} frame(s) still pinned")]
    ResourceBusy { pinned: usize },
    #[error("Buffer pool exhausted: every frame is pinned")]
    PoolExhausted,
    #[error("Buffer pool has been shut down")]
    PoolShutDown,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<PageFileError> for BufferPoolError {
    fn from(err: PageFileError) -> Self {
        match err {
            PageFileError::FileNotFound(path) => BufferPoolError::FileNotFound(path),
            PageFileError::OutOfRange { page_id, total_pages } => {
                BufferPoolError::OutOfRange { page_id, total_pages }
            }
            PageFileError::IoError(e) => BufferPoolError::IoError(e),
        }
    }
}
