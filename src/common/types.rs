/// Page size in bytes (4KB)
pub const PAGE_SIZE: usize = 4096;

/// Page ID type (zero-based block index within the page file)
pub type PageId = u32;

/// Buffer pool frame ID type
pub type FrameId = u32;

/// Raw page contents
pub type PageData = [u8; PAGE_SIZE];

/// Allocate a zero-filled page buffer on the heap
pub fn empty_page() -> Box<PageData> {
    Box::new([0; PAGE_SIZE])
}
