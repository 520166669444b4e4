//! # Disc Selector - Key-Driven Disc Image Browser
//!
//! A `no_std` directory browser that lets the user pick a disc image from a
//! removable card using key events alone, drawing itself straight into a
//! 1-bit-per-pixel framebuffer. The chosen file is handed back as an open
//! read/write handle for the emulator to mount.
//!
//! All platform-specific functionality is abstracted through traits that must
//! be implemented by the host platform.
//!
//! ## Platform Traits
//!
//! - [`FileSystem`] - Directory enumeration and file opening (FatFs, FAT32 driver...)
//! - [`DiskFile`] - Seekable read/write access to the selected image
//! - [`KeySource`] - Non-blocking keyboard event queue
//!
//! ## Usage
//!
//! ```ignore
//! use disc_selector::{DiskImageSelector, SelectionResult, SelectorConfig};
//!
//! let mut selector = DiskImageSelector::new(&mut fs, &mut framebuffer, SelectorConfig::default())?;
//!
//! loop {
//!     usb.poll();
//!     let Some(event) = keys.pop() else { continue };
//!
//!     match selector.handle_key(event)? {
//!         SelectionResult::StillBrowsing => {}
//!         SelectionResult::FileSelected(file) => break Some(file),
//!         SelectionResult::Cancelled => break None,
//!     }
//! }
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod cursor;
pub mod disc;
pub mod error;
pub mod font;
pub mod fs;
pub mod input;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod nav;
pub mod page;
pub mod path;
pub mod render;
pub mod session;

// Re-exports for convenience
pub use config::{KeyMap, SelectorConfig};
pub use cursor::DirectoryCursor;
pub use disc::{CardDisc, DiscError, DiscImage, run_selector};
pub use error::{FsError, SelectorError};
pub use fs::{DirectoryEntry, DiskFile, FileSystem, MAX_NAME_LEN};
pub use input::{KeyEvent, KeySource, NavKey};
pub use nav::{BrowserState, NavState, NavigationStateMachine, SelectionResult};
pub use page::PageModel;
pub use path::{DirPath, MAX_PATH_LEN};
pub use render::Renderer;
pub use session::DiskImageSelector;
