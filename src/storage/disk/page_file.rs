use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::common::types::{PageData, PageId, PAGE_SIZE};

#[derive(Error, Debug)]
pub enum PageFileError {
    #[error("Page file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Page {page_id} is out of range (file has {total_pages} pages)")]
    OutOfRange { page_id: i64, total_pages: u32 },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// A flat file of fixed-size pages with no header.
///
/// Block `i` occupies bytes `[i * PAGE_SIZE, (i + 1) * PAGE_SIZE)`. The handle
/// keeps the page count and a cursor used by the relative read operations.
#[derive(Debug)]
pub struct PageFile {
    path: PathBuf,
    file: File,
    total_pages: u32,
    cursor: PageId,
}

impl PageFile {
    /// Create (or truncate) a page file holding a single zero-filled page
    pub fn create(path: impl AsRef<Path>) -> Result<Self, PageFileError> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        file.write_all(&[0u8; PAGE_SIZE])?;
        file.flush()?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            total_pages: 1,
            cursor: 0,
        })
    }

    /// Open an existing page file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PageFileError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => PageFileError::FileNotFound(path.to_path_buf()),
                _ => PageFileError::IoError(e),
            })?;

        let file_size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            total_pages: (file_size / PAGE_SIZE as u64) as u32,
            cursor: 0,
        })
    }

    /// Delete a page file from disk
    pub fn destroy(path: impl AsRef<Path>) -> Result<(), PageFileError> {
        let path = path.as_ref();
        fs::remove_file(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PageFileError::FileNotFound(path.to_path_buf()),
            _ => PageFileError::IoError(e),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page index of the last block read or written
    pub fn block_pos(&self) -> PageId {
        self.cursor
    }

    /// Read a page from disk
    pub fn read_block(&mut self, page_id: PageId, buf: &mut PageData) -> Result<(), PageFileError> {
        if page_id >= self.total_pages {
            return Err(self.out_of_range(page_id as i64));
        }

        self.file.seek(SeekFrom::Start(Self::page_offset(page_id)))?;
        self.file.read_exact(buf)?;
        self.cursor = page_id;

        Ok(())
    }

    pub fn read_first_block(&mut self, buf: &mut PageData) -> Result<(), PageFileError> {
        self.read_block(0, buf)
    }

    pub fn read_previous_block(&mut self, buf: &mut PageData) -> Result<(), PageFileError> {
        match self.cursor.checked_sub(1) {
            Some(page_id) => self.read_block(page_id, buf),
            None => Err(self.out_of_range(-1)),
        }
    }

    pub fn read_current_block(&mut self, buf: &mut PageData) -> Result<(), PageFileError> {
        self.read_block(self.cursor, buf)
    }

    pub fn read_next_block(&mut self, buf: &mut PageData) -> Result<(), PageFileError> {
        self.read_block(self.cursor.saturating_add(1), buf)
    }

    pub fn read_last_block(&mut self, buf: &mut PageData) -> Result<(), PageFileError> {
        match self.total_pages.checked_sub(1) {
            Some(page_id) => self.read_block(page_id, buf),
            None => Err(self.out_of_range(0)),
        }
    }

    /// Write a page to disk, growing the file if the page lies past its end
    pub fn write_block(&mut self, page_id: PageId, buf: &PageData) -> Result<(), PageFileError> {
        let min_pages = page_id
            .checked_add(1)
            .ok_or_else(|| self.out_of_range(page_id as i64))?;
        self.ensure_capacity(min_pages)?;

        self.file.seek(SeekFrom::Start(Self::page_offset(page_id)))?;
        self.file.write_all(buf)?;
        self.file.flush()?;
        self.cursor = page_id;

        Ok(())
    }

    pub fn write_current_block(&mut self, buf: &PageData) -> Result<(), PageFileError> {
        self.write_block(self.cursor, buf)
    }

    /// Append one zero-filled page to the end of the file
    pub fn append_empty_block(&mut self) -> Result<(), PageFileError> {
        let min_pages = self
            .total_pages
            .checked_add(1)
            .ok_or_else(|| self.out_of_range(self.total_pages as i64))?;
        self.ensure_capacity(min_pages)
    }

    /// Grow the file with zero-filled pages until it holds at least `min_pages`.
    ///
    /// A partial trailing page is dropped first, so every new page reads as
    /// zeros.
    pub fn ensure_capacity(&mut self, min_pages: u32) -> Result<(), PageFileError> {
        if self.total_pages >= min_pages {
            return Ok(());
        }

        self.file.set_len(Self::page_offset(self.total_pages))?;
        self.file.set_len(Self::page_offset(min_pages))?;
        self.total_pages = min_pages;

        Ok(())
    }

    fn out_of_range(&self, page_id: i64) -> PageFileError {
        PageFileError::OutOfRange {
            page_id,
            total_pages: self.total_pages,
        }
    }

    fn page_offset(page_id: PageId) -> u64 {
        page_id as u64 * PAGE_SIZE as u64
    }
}
