use std::collections::{HashMap, VecDeque};
use log::{debug, trace, warn};

use crate::common::types::{empty_page, FrameId, PageId};
use crate::storage::buffer::error::BufferPoolError;
use crate::storage::buffer::frame::Frame;
use crate::storage::buffer::replacer::Replacer;
use crate::storage::buffer::stats::IoStats;
use crate::storage::disk::PageFile;

/// Frame arena plus everything needed to fill and drain it
pub(super) struct FrameTable {
    frames: Vec<Frame>,
    page_table: HashMap<PageId, FrameId>,
    free_list: VecDeque<FrameId>,
    replacer: Box<dyn Replacer>,
    page_file: PageFile,
    extend_file: bool,
}

impl FrameTable {
    pub(super) fn new(
        pool_size: usize,
        replacer: Box<dyn Replacer>,
        page_file: PageFile,
        extend_file: bool,
    ) -> Self {
        Self {
            frames: (0..pool_size).map(|_| Frame::new()).collect(),
            page_table: HashMap::with_capacity(pool_size),
            free_list: (0..pool_size as FrameId).collect(),
            replacer,
            page_file,
            extend_file,
        }
    }

    pub(super) fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(super) fn lookup(&self, page_id: PageId) -> Result<FrameId, BufferPoolError> {
        self.page_table
            .get(&page_id)
            .copied()
            .ok_or(BufferPoolError::PageNotFound(page_id))
    }

    pub(super) fn frame_mut(&mut self, page_id: PageId) -> Result<&mut Frame, BufferPoolError> {
        let frame_id = self.lookup(page_id)?;
        Ok(&mut self.frames[frame_id as usize])
    }

    /// Frame behind a handle, provided it still holds that page and is pinned
    pub(super) fn pinned_frame(
        &mut self,
        page_id: PageId,
        frame_id: FrameId,
    ) -> Result<&mut Frame, BufferPoolError> {
        match self.frames.get_mut(frame_id as usize) {
            Some(frame) if frame.page_id == Some(page_id) && frame.is_pinned() => Ok(frame),
            _ => Err(BufferPoolError::PageNotFound(page_id)),
        }
    }

    pub(super) fn pinned_frames(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_pinned()).count()
    }

    pub(super) fn pin(
        &mut self,
        page_id: PageId,
        stats: &mut IoStats,
    ) -> Result<FrameId, BufferPoolError> {
        // Hit: bump the pin count and let the policy see the access
        if let Some(&frame_id) = self.page_table.get(&page_id) {
            let frame = &mut self.frames[frame_id as usize];
            frame.pin_count += 1;
            self.replacer.record_access(frame);
            stats.hits += 1;
            trace!("Buffer hit for page {} in frame {}", page_id, frame_id);
            return Ok(frame_id);
        }

        if self.free_list.is_empty() && self.frames.iter().all(Frame::is_pinned) {
            warn!(
                "Cannot load page {}: all {} frames are pinned",
                page_id,
                self.frames.len()
            );
            return Err(BufferPoolError::PoolExhausted);
        }

        if self.extend_file {
            let min_pages = page_id.checked_add(1).ok_or(BufferPoolError::OutOfRange {
                page_id: page_id as i64,
                total_pages: self.page_file.total_pages(),
            })?;
            self.page_file.ensure_capacity(min_pages)?;
        }

        // Page fault: read into a holder first so a failed read leaves the
        // frames untouched

        let mut data = empty_page();
        self.page_file.read_block(page_id, &mut data)?;
        stats.reads += 1;
        stats.misses += 1;

        let frame_id = self.allocate_frame(stats)?;
        let frame = &mut self.frames[frame_id as usize];
        frame.install(page_id, &mut data);
        self.replacer.record_load(frame);
        self.page_table.insert(page_id, frame_id);

        Ok(frame_id)
    }

    /// Take a free frame, or reclaim one chosen by the replacer
    fn allocate_frame(&mut self, stats: &mut IoStats) -> Result<FrameId, BufferPoolError> {
        if let Some(frame_id) = self.free_list.pop_front() {
            return Ok(frame_id);
        }

        let frame_id = self
            .replacer
            .victim(&mut self.frames)
            .ok_or(BufferPoolError::PoolExhausted)?;

        let victim = &self.frames[frame_id as usize];
        if victim.is_pinned() {
            return Err(BufferPoolError::InvariantViolation(format!(
                "{} replacer chose pinned frame {}",
                self.replacer.strategy(),
                frame_id
            )));
        }

        if victim.is_dirty {
            self.write_back(frame_id, stats)?;
        }

        if let Some(old_page_id) = self.frames[frame_id as usize].page_id.take() {
            self.page_table.remove(&old_page_id);
            stats.evictions += 1;
            debug!(
                "Evicted page {} from frame {} ({})",
                old_page_id,
                frame_id,
                self.replacer.strategy()
            );
        }

        Ok(frame_id)
    }

    /// Write a frame's page to disk and mark it clean
    pub(super) fn write_back(
        &mut self,
        frame_id: FrameId,
        stats: &mut IoStats,
    ) -> Result<(), BufferPoolError> {
        let frame = &mut self.frames[frame_id as usize];
        let page_id = frame.page_id.ok_or_else(|| {
            BufferPoolError::InvariantViolation(format!("write-back of empty frame {}", frame_id))
        })?;

        self.page_file.write_block(page_id, &frame.data)?;
        frame.is_dirty = false;
        stats.writes += 1;
        debug!("Wrote page {} from frame {}", page_id, frame_id);

        Ok(())
    }

    /// Write back every unpinned dirty frame in slot order
    pub(super) fn flush_unpinned(&mut self, stats: &mut IoStats) -> Result<(), BufferPoolError> {
        for frame_id in 0..self.frames.len() as FrameId {
            let frame = &self.frames[frame_id as usize];
            if frame.is_dirty && !frame.is_pinned() && !frame.is_empty() {
                self.write_back(frame_id, stats)?;
            }
        }
        Ok(())
    }
}
