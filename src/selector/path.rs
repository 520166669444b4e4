//! Bounded folder path
//!
//! Paths live in a fixed buffer. The root is the empty path, children are
//! appended as `"/name"`, and going up truncates at the last separator.

use crate::error::SelectorError;

/// Maximum path length in bytes
pub const MAX_PATH_LEN: usize = 256;

const SEPARATOR: u8 = b'/';

/// Folder path with a fixed-size buffer
#[derive(Clone, Copy)]
pub struct DirPath {
    buf: [u8; MAX_PATH_LEN],
    len: usize,
}

impl DirPath {
    /// The filesystem root
    pub const fn root() -> Self {
        Self {
            buf: [0u8; MAX_PATH_LEN],
            len: 0,
        }
    }

    /// Build a path from a string such as `"/Games/Mac"`
    pub fn new(path: &str) -> Result<Self, SelectorError> {
        let mut out = Self::root();
        out.append(path.as_bytes())?;
        Ok(out)
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get path as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("<invalid>")
    }

    /// Path of a child entry, `self + "/" + name`
    pub fn join(&self, name: &str) -> Result<Self, SelectorError> {
        let mut out = *self;
        out.append(&[SEPARATOR])?;
        out.append(name.as_bytes())?;
        Ok(out)
    }

    /// Truncate at the last separator. No-op at the root.
    pub fn pop(&mut self) {
        let cut = self.buf[..self.len]
            .iter()
            .rposition(|&b| b == SEPARATOR)
            .unwrap_or(0);
        self.len = cut;
    }

    /// Parent folder, the root is its own parent
    pub fn parent(&self) -> Self {
        let mut out = *self;
        out.pop();
        out
    }

    fn append(&mut self, bytes: &[u8]) -> Result<(), SelectorError> {
        let new_len = self.len + bytes.len();
        if new_len > MAX_PATH_LEN {
            return Err(SelectorError::PathTooLong {
                len: new_len,
                max: MAX_PATH_LEN,
            });
        }
        self.buf[self.len..new_len].copy_from_slice(bytes);
        self.len = new_len;
        Ok(())
    }
}

impl PartialEq for DirPath {
    fn eq(&self, other: &Self) -> bool {
        self.buf[..self.len] == other.buf[..other.len]
    }
}

impl Eq for DirPath {}

impl core::fmt::Debug for DirPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl core::fmt::Display for DirPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(self.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn test_join_and_parent() {
        let root = DirPath::root();
        let games = root.join("Games").unwrap();
        assert_eq!(games.as_str(), "/Games");

        let mac = games.join("Mac").unwrap();
        assert_eq!(mac.as_str(), "/Games/Mac");
        assert_eq!(mac.parent(), games);
        assert_eq!(games.parent(), root);
        assert!(games.parent().is_root());
    }

    #[test]
    fn test_pop_at_root_is_noop() {
        let mut root = DirPath::root();
        root.pop();
        assert!(root.is_root());
        assert_eq!(format!("{}", root), "/");
    }

    #[test]
    fn test_path_too_long() {
        let long: String = core::iter::repeat('x').take(MAX_PATH_LEN).collect();
        let err = DirPath::root().join(&long).unwrap_err();
        assert_eq!(
            err,
            SelectorError::PathTooLong {
                len: MAX_PATH_LEN + 1,
                max: MAX_PATH_LEN
            }
        );

        // Exactly at the limit is fine
        let fits: String = core::iter::repeat('y').take(MAX_PATH_LEN - 1).collect();
        assert_eq!(DirPath::root().join(&fits).unwrap().len(), MAX_PATH_LEN);
    }

    #[test]
    fn test_failed_join_leaves_original_untouched() {
        let games = DirPath::new("/Games").unwrap();
        let long: String = core::iter::repeat('z').take(MAX_PATH_LEN).collect();
        assert!(games.join(&long).is_err());
        assert_eq!(games.as_str(), "/Games");
    }
}
