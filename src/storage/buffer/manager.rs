mod frame_management;

use std::path::{Path, PathBuf};
use log::{info, warn};
use parking_lot::Mutex;

use crate::common::types::{FrameId, PageId};
use crate::storage::buffer::config::{BufferPoolConfig, ReplacementStrategy};
use crate::storage::buffer::error::BufferPoolError;
use crate::storage::buffer::frame::Frame;
use crate::storage::buffer::replacer;
use crate::storage::buffer::stats::IoStats;
use crate::storage::disk::PageFile;
use frame_management::FrameTable;

/// Handle to a pinned page.
///
/// The handle names a slot in the pool's frame arena; it does not borrow the
/// bytes. Access goes through [`BufferPoolManager::with_page`] and
/// [`BufferPoolManager::with_page_mut`], which refuse handles whose page has
/// been unpinned and evicted since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle {
    page_id: PageId,
    frame_id: FrameId,
}

impl PageHandle {
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }
}

struct PoolState {
    /// `None` once the pool has been shut down
    table: Option<FrameTable>,
    stats: IoStats,
}

impl PoolState {
    fn active(&mut self) -> Result<(&mut FrameTable, &mut IoStats), BufferPoolError> {
        match self.table.as_mut() {
            Some(table) => Ok((table, &mut self.stats)),
            None => Err(BufferPoolError::PoolShutDown),
        }
    }
}

/// Fixed-size page cache over a single page file.
///
/// All frame state sits behind one mutex which is held across disk I/O, so a
/// pool can be shared between threads with `Arc`.
pub struct BufferPoolManager {
    pool_size: usize,
    strategy: ReplacementStrategy,
    path: PathBuf,
    state: Mutex<PoolState>,
}

impl BufferPoolManager {
    pub fn new(
        db_path: impl AsRef<Path>,
        config: BufferPoolConfig,
    ) -> Result<Self, BufferPoolError> {
        if config.pool_size == 0 {
            return Err(BufferPoolError::InvalidConfig(
                "pool_size must be at least 1".to_string(),
            ));
        }

        let replacer =
            replacer::build(config.strategy, &config.strategy_config, config.pool_size)?;
        let page_file = PageFile::open(&db_path)?;

        info!(
            "Created buffer pool over {} with {} frames ({})",
            db_path.as_ref().display(),
            config.pool_size,
            config.strategy
        );

        Ok(Self {
            pool_size: config.pool_size,
            strategy: config.strategy,
            path: db_path.as_ref().to_path_buf(),
            state: Mutex::new(PoolState {
                table: Some(FrameTable::new(
                    config.pool_size,
                    replacer,
                    page_file,
                    config.extend_file,
                )),
                stats: IoStats::default(),
            }),
        })
    }

    pub fn with_strategy(
        db_path: impl AsRef<Path>,
        pool_size: usize,
        strategy: ReplacementStrategy,
    ) -> Result<Self, BufferPoolError> {
        Self::new(db_path, BufferPoolConfig::new(pool_size, strategy))
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn strategy(&self) -> ReplacementStrategy {
        self.strategy
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pin a page, reading it from disk if it is not resident.
    ///
    /// Fails with `PoolExhausted` when the page must be loaded but every
    /// frame is pinned.
    pub fn pin_page(&self, page_id: PageId) -> Result<PageHandle, BufferPoolError> {
        let mut state = self.state.lock();
        let (table, stats) = state.active()?;
        let frame_id = table.pin(page_id, stats)?;
        Ok(PageHandle { page_id, frame_id })
    }

    /// Release one pin on a resident page
    pub fn unpin_page(&self, page_id: PageId) -> Result<(), BufferPoolError> {
        let mut state = self.state.lock();
        let (table, _) = state.active()?;
        let frame = table.frame_mut(page_id)?;

        if frame.pin_count == 0 {
            return Err(BufferPoolError::InvariantViolation(format!(
                "unpin of page {} whose pin count is already zero",
                page_id
            )));
        }
        frame.pin_count -= 1;

        Ok(())
    }

    pub fn mark_dirty(&self, page_id: PageId) -> Result<(), BufferPoolError> {
        let mut state = self.state.lock();
        let (table, _) = state.active()?;
        table.frame_mut(page_id)?.is_dirty = true;
        Ok(())
    }

    /// Write a resident page to disk whether or not it is dirty
    pub fn force_page(&self, page_id: PageId) -> Result<(), BufferPoolError> {
        let mut state = self.state.lock();
        let (table, stats) = state.active()?;
        let frame_id = table.lookup(page_id)?;
        table.write_back(frame_id, stats)
    }

    /// Write every unpinned dirty page to disk.
    ///
    /// Pinned pages are skipped even when dirty. Stops at the first failed
    /// write; pages written before it stay clean.
    pub fn flush_all_pages(&self) -> Result<(), BufferPoolError> {
        let mut state = self.state.lock();
        let (table, stats) = state.active()?;
        table.flush_unpinned(stats)
    }

    /// Flush and release every frame.
    ///
    /// Refused with `ResourceBusy` while any page is pinned, in which case the
    /// pool stays usable and the call can be retried after unpinning.
    pub fn shutdown(&self) -> Result<(), BufferPoolError> {
        let mut state = self.state.lock();
        let (table, stats) = state.active()?;
        table.flush_unpinned(stats)?;

        let pinned = table.pinned_frames();
        if pinned > 0 {
            warn!("Refusing to shut down buffer pool: {} frame(s) pinned", pinned);
            return Err(BufferPoolError::ResourceBusy { pinned });
        }

        state.table = None;
        info!("Shut down buffer pool over {}", self.path.display());
        Ok(())
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.lock().table.is_none()
    }

    /// Run `f` over the bytes of a pinned page.
    ///
    /// The pool lock is held while `f` runs, so `f` must not call back into
    /// the pool.
    pub fn with_page<R>(
        &self,
        handle: &PageHandle,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Result<R, BufferPoolError> {
        let mut state = self.state.lock();
        let (table, _) = state.active()?;
        let frame = table.pinned_frame(handle.page_id, handle.frame_id)?;
        Ok(f(&frame.data[..]))
    }

    /// Run `f` over the mutable bytes of a pinned page.
    ///
    /// Does not mark the page dirty; call [`Self::mark_dirty`] for that. The
    /// same re-entrancy rule as [`Self::with_page`] applies.
    pub fn with_page_mut<R>(
        &self,
        handle: &PageHandle,
        f: impl FnOnce(&mut [u8]) -> R,
    ) -> Result<R, BufferPoolError> {
        let mut state = self.state.lock();
        let (table, _) = state.active()?;
        let frame = table.pinned_frame(handle.page_id, handle.frame_id)?;
        Ok(f(&mut frame.data[..]))
    }

    /// Page held by each frame slot, `None` for empty slots
    pub fn frame_contents(&self) -> Vec<Option<PageId>> {
        self.collect_frames(|frame| frame.page_id())
    }

    pub fn dirty_flags(&self) -> Vec<bool> {
        self.collect_frames(|frame| frame.is_dirty())
    }

    pub fn fix_counts(&self) -> Vec<u32> {
        self.collect_frames(|frame| frame.pin_count())
    }

    pub fn read_io_count(&self) -> u64 {
        self.state.lock().stats.reads
    }

    pub fn write_io_count(&self) -> u64 {
        self.state.lock().stats.writes
    }

    pub fn hit_count(&self) -> u64 {
        self.state.lock().stats.hits
    }

    pub fn stats(&self) -> IoStats {
        self.state.lock().stats
    }

    fn collect_frames<T>(&self, f: impl Fn(&Frame) -> T) -> Vec<T> {
        let state = self.state.lock();
        match state.table.as_ref() {
            Some(table) => table.frames().iter().map(f).collect(),
            None => Vec::new(),
        }
    }
}
