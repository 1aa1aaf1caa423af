use crate::common::types::{empty_page, PageData, PageId};

/// Buffer pool frame structure
///
/// A frame owns one page worth of bytes for its whole life. Only its contents
/// and bookkeeping change when a page is loaded or evicted.
#[derive(Debug)]
pub struct Frame {
    pub(crate) page_id: Option<PageId>,
    pub(crate) data: Box<PageData>,
    pub(crate) is_dirty: bool,
    pub(crate) pin_count: u32,
    /// LRU recency stamp
    pub(crate) last_used: u64,
    /// LFU reference counter
    pub(crate) frequency: u64,
    /// CLOCK second-chance bit
    pub(crate) reference: bool,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            page_id: None,
            data: empty_page(),
            is_dirty: false,
            pin_count: 0,
            last_used: 0,
            frequency: 0,
            reference: false,
        }
    }

    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn pin_count(&self) -> u32 {
        self.pin_count
    }

    pub fn is_pinned(&self) -> bool {
        self.pin_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.page_id.is_none()
    }

    /// Swap freshly read page bytes into this frame and pin it once.
    /// Policy metadata is left for the replacer to initialize.
    pub(crate) fn install(&mut self, page_id: PageId, data: &mut Box<PageData>) {
        std::mem::swap(&mut self.data, data);
        self.page_id = Some(page_id);
        self.is_dirty = false;
        self.pin_count = 1;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
