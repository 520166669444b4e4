//! Directory cursor
//!
//! Wraps one open directory handle and tracks the logical position inside the
//! listing. Position 0 is the synthetic ".." entry; real children follow from
//! position 1. Seeking is rewind-and-replay because the underlying enumeration
//! cannot jump.

use log::warn;

use crate::error::FsError;
use crate::fs::{DirectoryEntry, FileSystem};
use crate::path::DirPath;

/// Forward-only cursor over a folder listing
pub struct DirectoryCursor<F: FileSystem> {
    /// Open handle, `None` once closed
    handle: Option<F::Dir>,
    /// Logical position of the next entry `advance` returns
    position: usize,
    /// Reached end of directory (or an I/O failure ended the scan)
    finished: bool,
}

impl<F: FileSystem> DirectoryCursor<F> {
    /// Open `path` and position the cursor before the synthetic parent entry
    pub fn open(fs: &mut F, path: &DirPath) -> Result<Self, FsError> {
        let handle = fs.open_dir(path.as_str())?;
        Ok(Self {
            handle: Some(handle),
            position: 0,
            finished: false,
        })
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Logical position of the next entry
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Restart from the synthetic parent entry
    pub fn rewind(&mut self, fs: &mut F) {
        self.position = 0;
        self.finished = false;

        if let Some(handle) = self.handle.as_mut() {
            if let Err(e) = fs.rewind_dir(handle) {
                warn!("directory rewind failed: {}", e);
                self.finished = true;
            }
        }
    }

    /// Next entry in the listing, `None` at end of directory
    ///
    /// Read errors end the listing early; the entries already seen stay valid.
    pub fn advance(&mut self, fs: &mut F) -> Option<DirectoryEntry> {
        let handle = self.handle.as_mut()?;

        if self.position == 0 {
            self.position = 1;
            return Some(DirectoryEntry::parent());
        }

        if self.finished {
            return None;
        }

        match fs.read_dir(handle) {
            Ok(Some(entry)) if !entry.is_end_marker() => {
                self.position += 1;
                Some(entry)
            }
            Ok(_) => {
                self.finished = true;
                None
            }
            Err(e) => {
                warn!("directory read failed after {} entries: {}", self.position, e);
                self.finished = true;
                None
            }
        }
    }

    /// Count every entry in the listing, synthetic parent included, then rewind
    pub fn count_entries(&mut self, fs: &mut F) -> usize {
        self.rewind(fs);
        let mut count = 0;
        while self.advance(fs).is_some() {
            count += 1;
        }
        self.rewind(fs);
        count
    }

    /// Rewind then skip `index` entries, so the next `advance` returns the entry
    /// at `index`. Returns false if the listing ended first.
    pub fn seek_to_logical_index(&mut self, fs: &mut F, index: usize) -> bool {
        self.rewind(fs);
        while self.position < index {
            if self.advance(fs).is_none() {
                return false;
            }
        }
        true
    }

    /// Release the handle. Safe to call more than once.
    pub fn close(&mut self, fs: &mut F) {
        if let Some(handle) = self.handle.take() {
            fs.close_dir(handle);
        }
        self.position = 0;
        self.finished = true;
    }
}
