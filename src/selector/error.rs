//! Error types
//!
//! [`FsError`] is what the host filesystem reports; adapters map their native
//! result codes onto it. [`SelectorError`] is what the browser reports to the
//! caller.

use thiserror::Error;

/// Filesystem failure as seen by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    /// File or directory does not exist
    #[error("no such file")]
    NotFound,
    /// A component of the path does not exist
    #[error("no such path")]
    NoPath,
    /// Access denied (read-only medium, locked file)
    #[error("access denied")]
    Denied,
    /// Driver limit on concurrently open handles reached
    #[error("too many open handles")]
    TooManyOpenFiles,
    /// Name not accepted by the filesystem
    #[error("invalid name")]
    InvalidName,
    /// Low-level disk error
    #[error("disk I/O error")]
    Io,
}

/// Error type for selector operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Root folder could not be opened, browsing never started
    #[error("cannot open root folder: {0}")]
    RootUnavailable(FsError),
    /// The confirmed file entry could not be opened for read/write
    #[error("cannot open selected file: {0}")]
    FileOpen(FsError),
    /// Path would exceed the fixed path buffer
    #[error("path too long ({len} > {max} bytes)")]
    PathTooLong { len: usize, max: usize },
    /// A key event was fed after the session produced its result
    #[error("selection session already finished")]
    SessionFinished,
    /// Framebuffer slice is smaller than the configured geometry
    #[error("framebuffer too small ({actual} < {needed} bytes)")]
    FramebufferTooSmall { needed: usize, actual: usize },
    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
