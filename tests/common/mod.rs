#![allow(dead_code)]

use std::sync::Arc;
use tempfile::NamedTempFile;
use pagepool::{BufferPoolManager, PageFile, PageId, ReplacementStrategy};
use anyhow::Result;

// Zero pages in every temporary page file
pub const TEST_FILE_PAGES: u32 = 32;

// Create a temporary page file holding `TEST_FILE_PAGES` zero pages
pub fn create_temp_page_file() -> Result<(NamedTempFile, String)> {
    let file = NamedTempFile::new()?;
    let path = file.path().to_str().unwrap().to_string();
    PageFile::create(&path)?.ensure_capacity(TEST_FILE_PAGES)?;
    Ok((file, path))
}

// Create a buffer pool manager over a temporary page file
pub fn create_test_buffer_pool(
    pool_size: usize,
    strategy: ReplacementStrategy,
) -> Result<(Arc<BufferPoolManager>, NamedTempFile)> {
    let (file, path) = create_temp_page_file()?;
    let buffer_pool = Arc::new(BufferPoolManager::with_strategy(path, pool_size, strategy)?);
    Ok((buffer_pool, file))
}

// Generate test data of specified size
pub fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

// Pin each page and immediately release it again
pub fn touch_pages(buffer_pool: &BufferPoolManager, page_ids: &[PageId]) -> Result<()> {
    for &page_id in page_ids {
        buffer_pool.pin_page(page_id)?;
        buffer_pool.unpin_page(page_id)?;
    }
    Ok(())
}

pub fn resident(pages: &[PageId]) -> Vec<Option<PageId>> {
    pages.iter().map(|&page_id| Some(page_id)).collect()
}
