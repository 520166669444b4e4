//! Disc image hand-off
//!
//! Runs a selection session and turns its result into the disc the emulator
//! mounts: the chosen card file (read/write), or the built-in image compiled
//! into the firmware (read-only) when nothing usable was chosen.

use log::{info, warn};
use thiserror::Error;

use crate::config::SelectorConfig;
use crate::error::FsError;
use crate::fs::{DiskFile, FileSystem};
use crate::input::KeySource;
use crate::nav::SelectionResult;
use crate::session::DiskImageSelector;

/// Disc access failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscError {
    /// Write to the built-in image
    #[error("disc is read-only")]
    ReadOnly,
    /// Access past the end of the built-in image
    #[error("access beyond end of disc")]
    OutOfRange,
    /// The file returned fewer bytes than requested
    #[error("short transfer ({done} of {wanted} bytes)")]
    ShortTransfer { done: usize, wanted: usize },
    /// Underlying file error
    #[error("disc I/O failed: {0}")]
    Fs(#[from] FsError),
}

/// Disc backed by an image file on the card
pub struct CardDisc<H: DiskFile> {
    file: H,
    size: u64,
}

impl<H: DiskFile> CardDisc<H> {
    pub fn new(file: H) -> Self {
        let size = file.size();
        Self { file, size }
    }

    /// Image size captured when the file was opened
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Fill `buf` from `offset`
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), DiscError> {
        self.file.seek(offset)?;
        let done = self.file.read(buf)?;
        if done != buf.len() {
            return Err(DiscError::ShortTransfer {
                done,
                wanted: buf.len(),
            });
        }
        Ok(())
    }

    /// Write all of `data` at `offset`
    pub fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), DiscError> {
        self.file.seek(offset)?;
        let done = self.file.write(data)?;
        if done != data.len() {
            return Err(DiscError::ShortTransfer {
                done,
                wanted: data.len(),
            });
        }
        Ok(())
    }

    pub fn into_inner(self) -> H {
        self.file
    }
}

/// The disc handed to the emulator
pub enum DiscImage<H: DiskFile> {
    /// Image file selected on the card
    Card(CardDisc<H>),
    /// Fallback image linked into the firmware
    Builtin(&'static [u8]),
}

impl<H: DiskFile> DiscImage<H> {
    pub fn size(&self) -> u64 {
        match self {
            Self::Card(card) => card.size(),
            Self::Builtin(data) => data.len() as u64,
        }
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), DiscError> {
        match self {
            Self::Card(card) => card.read_at(offset, buf),
            Self::Builtin(data) => {
                let start = usize::try_from(offset).map_err(|_| DiscError::OutOfRange)?;
                let end = start.checked_add(buf.len()).ok_or(DiscError::OutOfRange)?;
                let src = data.get(start..end).ok_or(DiscError::OutOfRange)?;
                buf.copy_from_slice(src);
                Ok(())
            }
        }
    }

    pub fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), DiscError> {
        match self {
            Self::Card(card) => card.write_at(offset, data),
            Self::Builtin(_) => Err(DiscError::ReadOnly),
        }
    }
}

/// Run the selector until the user picks an image or backs out
///
/// `idle` runs once per loop iteration before the key queue is polled; the
/// host pumps its USB host stack and HID driver there. Any outcome other than
/// a selected file falls back to `fallback`.
pub fn run_selector<F, K, I>(
    fs: &mut F,
    framebuffer: &mut [u8],
    keys: &mut K,
    config: SelectorConfig,
    fallback: &'static [u8],
    mut idle: I,
) -> DiscImage<F::File>
where
    F: FileSystem,
    K: KeySource,
    I: FnMut(),
{
    let mut selector = match DiskImageSelector::new(fs, framebuffer, config) {
        Ok(selector) => selector,
        Err(e) => {
            warn!("{}, using built-in disc", e);
            return DiscImage::Builtin(fallback);
        }
    };

    loop {
        idle();

        match selector.poll(keys) {
            Ok(SelectionResult::StillBrowsing) => {}
            Ok(SelectionResult::FileSelected(file)) => {
                let card = CardDisc::new(file);
                info!("mounting card image ({} bytes)", card.size());
                return DiscImage::Card(card);
            }
            Ok(SelectionResult::Cancelled) => {
                info!("no image selected, using built-in disc");
                return DiscImage::Builtin(fallback);
            }
            Err(e) => {
                warn!("{}, using built-in disc", e);
                return DiscImage::Builtin(fallback);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MemFile, MemFs};

    static BUILTIN: [u8; 16] = [0xAA; 16];

    fn card(contents: &[u8]) -> CardDisc<MemFile> {
        let mut fs = MemFs::new();
        fs.add_file_with("/disc.dsk", contents);
        CardDisc::new(fs.open_file("/disc.dsk").unwrap())
    }

    #[test]
    fn test_card_read_write() {
        let mut disc = card(&[0u8; 64]);
        assert_eq!(disc.size(), 64);

        disc.write_at(10, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 4];
        disc.read_at(9, &mut buf).unwrap();
        assert_eq!(buf, [0, 1, 2, 3]);
    }

    #[test]
    fn test_card_short_read() {
        let mut disc = card(&[0u8; 8]);
        let mut buf = [0u8; 4];
        assert_eq!(
            disc.read_at(6, &mut buf),
            Err(DiscError::ShortTransfer { done: 2, wanted: 4 })
        );
        assert_eq!(
            disc.write_at(7, &[9, 9]),
            Err(DiscError::ShortTransfer { done: 1, wanted: 2 })
        );
    }

    #[test]
    fn test_builtin_is_read_only() {
        let mut disc: DiscImage<MemFile> = DiscImage::Builtin(&BUILTIN);
        assert!(disc.is_read_only());
        assert_eq!(disc.size(), 16);

        let mut buf = [0u8; 4];
        disc.read_at(12, &mut buf).unwrap();
        assert_eq!(buf, [0xAA; 4]);
        assert_eq!(disc.read_at(13, &mut buf), Err(DiscError::OutOfRange));
        assert_eq!(disc.write_at(0, &[0]), Err(DiscError::ReadOnly));
    }
}
