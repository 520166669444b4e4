//! Filesystem abstraction
//!
//! The host provides directory enumeration and file opening, typically on top
//! of FatFs or a FAT32 driver. Enumeration is forward-only: there is no way to
//! jump to the n-th entry other than rewinding and reading n entries.

use crate::error::FsError;

/// Maximum filename length we support (FAT long filenames)
pub const MAX_NAME_LEN: usize = 255;

/// A directory entry with fixed-size filename buffer
#[derive(Clone, Copy)]
pub struct DirectoryEntry {
    /// Filename bytes (UTF-8)
    pub name: [u8; MAX_NAME_LEN],
    /// Actual length of name
    pub name_len: usize,
    /// Entry is a folder
    pub is_dir: bool,
}

impl DirectoryEntry {
    /// Create an empty entry
    pub const fn empty() -> Self {
        Self {
            name: [0u8; MAX_NAME_LEN],
            name_len: 0,
            is_dir: false,
        }
    }

    /// Create an entry from a name, clipped to `MAX_NAME_LEN` on a char boundary
    pub fn new(name: &str, is_dir: bool) -> Self {
        let mut len = name.len().min(MAX_NAME_LEN);
        while !name.is_char_boundary(len) {
            len -= 1;
        }

        let mut entry = Self::empty();
        entry.name[..len].copy_from_slice(&name.as_bytes()[..len]);
        entry.name_len = len;
        entry.is_dir = is_dir;
        entry
    }

    /// The synthetic ".." entry heading every listing
    pub fn parent() -> Self {
        Self::new("..", true)
    }

    /// Get filename as string slice
    pub fn name_str(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or("<invalid>")
    }

    /// Empty names mark the end of a directory
    #[inline]
    pub fn is_end_marker(&self) -> bool {
        self.name_len == 0
    }
}

impl core::fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DirectoryEntry")
            .field("name", &self.name_str())
            .field("is_dir", &self.is_dir)
            .finish()
    }
}

/// Seekable handle on an opened file
pub trait DiskFile {
    /// File size in bytes as reported by the filesystem
    fn size(&self) -> u64;

    /// Move the read/write pointer
    fn seek(&mut self, offset: u64) -> Result<(), FsError>;

    /// Read into `buf`, returning the number of bytes read
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// Write `data`, returning the number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize, FsError>;
}

/// Host filesystem
pub trait FileSystem {
    /// Open directory handle
    type Dir;
    /// Open file handle
    type File: DiskFile;

    /// Open a folder for enumeration. The root is the empty path.
    fn open_dir(&mut self, path: &str) -> Result<Self::Dir, FsError>;

    /// Read the next entry. `Ok(None)` or an entry with an empty name both
    /// mean the end of the directory.
    fn read_dir(&mut self, dir: &mut Self::Dir) -> Result<Option<DirectoryEntry>, FsError>;

    /// Restart enumeration from the first entry
    fn rewind_dir(&mut self, dir: &mut Self::Dir) -> Result<(), FsError>;

    /// Release a directory handle
    fn close_dir(&mut self, dir: Self::Dir);

    /// Open an existing file for reading and writing
    fn open_file(&mut self, path: &str) -> Result<Self::File, FsError>;
}
