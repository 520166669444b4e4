//! Navigation state machine
//!
//! Consumes navigation keys, keeps the [`BrowserState`] of the open folder and
//! the directory cursor in step, and redraws what changed:
//!
//! - MoveNext / MovePrevious cycle inside the current page and repaint only
//!   the two marker cells.
//! - PageLeft / PageRight cycle over pages, re-seek the cursor to the page
//!   start and repaint the whole screen.
//! - Confirm enters a folder, goes up through the ".." entry, or opens a file
//!   and finishes.
//! - Cancel finishes from anywhere.

use log::{debug, info, warn};

use crate::cursor::DirectoryCursor;
use crate::error::{FsError, SelectorError};
use crate::fs::FileSystem;
use crate::input::NavKey;
use crate::page::PageModel;
use crate::path::DirPath;
use crate::render::Renderer;

/// Result of feeding one key to the browser
#[derive(Debug)]
pub enum SelectionResult<H> {
    /// A file was confirmed and opened for read/write
    FileSelected(H),
    /// The user backed out, or a folder could not be opened
    Cancelled,
    /// Keep feeding keys
    StillBrowsing,
}

impl<H> SelectionResult<H> {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::StillBrowsing)
    }
}

/// Position inside the open folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserState {
    /// Folder being listed, empty at the root
    pub current_path: DirPath,
    /// Page shown
    pub current_page: usize,
    /// Selected slot within the page
    pub current_entry: usize,
    /// Children plus the synthetic ".." entry
    pub total_entries: usize,
    /// Always at least 1
    pub total_pages: usize,
}

impl BrowserState {
    fn new(current_path: DirPath, total_entries: usize, capacity: usize) -> Self {
        Self {
            current_path,
            current_page: 0,
            current_entry: 0,
            total_entries,
            total_pages: PageModel::new(total_entries, capacity).total_pages(),
        }
    }

    /// Logical listing offset of the selection
    pub fn logical_index(&self, capacity: usize) -> usize {
        PageModel::new(self.total_entries, capacity).logical_index(self.current_page, self.current_entry)
    }

    /// Selection is the synthetic ".." entry
    #[inline]
    pub fn on_parent_entry(&self) -> bool {
        self.current_page == 0 && self.current_entry == 0
    }
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A file handle was returned
    Selected,
    /// Cancel was pressed
    Cancelled,
    /// A folder failed to open while navigating
    Aborted,
    /// The confirmed file failed to open
    FileOpenFailed(FsError),
}

/// Browser state machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Browsing(BrowserState),
    Exiting(Outcome),
}

/// Key-driven folder browser
pub struct NavigationStateMachine<F: FileSystem> {
    state: NavState,
    cursor: DirectoryCursor<F>,
    capacity: usize,
}

impl<F: FileSystem> NavigationStateMachine<F> {
    /// Open `path` and draw its first page, sized to the renderer's page
    pub fn open(fs: &mut F, renderer: &mut Renderer<'_>, path: DirPath) -> Result<Self, FsError> {
        let capacity = renderer.config().page_capacity.max(1);
        let (browser, cursor) = open_folder(fs, path, capacity)?;
        let mut machine = Self {
            state: NavState::Browsing(browser),
            cursor,
            capacity,
        };
        machine.redraw_page(fs, renderer, &browser);
        Ok(machine)
    }

    #[inline]
    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Browser state, `None` once finished
    pub fn browser(&self) -> Option<&BrowserState> {
        match &self.state {
            NavState::Browsing(browser) => Some(browser),
            NavState::Exiting(_) => None,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, NavState::Exiting(_))
    }

    /// Directory handle is held open
    #[inline]
    pub fn has_open_dir(&self) -> bool {
        self.cursor.is_open()
    }

    #[inline]
    pub fn page_capacity(&self) -> usize {
        self.capacity
    }

    /// Close the directory handle if one is still open
    pub fn release(&mut self, fs: &mut F) {
        self.cursor.close(fs);
    }

    /// Apply one navigation key
    pub fn handle(
        &mut self,
        key: NavKey,
        fs: &mut F,
        renderer: &mut Renderer<'_>,
    ) -> Result<SelectionResult<F::File>, SelectorError> {
        let mut browser = match self.state {
            NavState::Browsing(browser) => browser,
            NavState::Exiting(_) => return Err(SelectorError::SessionFinished),
        };
        let model = PageModel::new(browser.total_entries, self.capacity);

        match key {
            NavKey::MoveNext | NavKey::MovePrevious => {
                let old = browser.current_entry;
                let new = if key == NavKey::MoveNext {
                    model.next_entry(browser.current_page, old)
                } else {
                    model.previous_entry(browser.current_page, old)
                };
                if new != old {
                    renderer.draw_marker(old, false);
                    renderer.draw_marker(new, true);
                }
                browser.current_entry = new;
                self.state = NavState::Browsing(browser);
                Ok(SelectionResult::StillBrowsing)
            }
            NavKey::PageLeft | NavKey::PageRight => {
                browser.current_page = if key == NavKey::PageRight {
                    model.next_page(browser.current_page)
                } else {
                    model.previous_page(browser.current_page)
                };
                browser.current_entry = 0;
                debug!("page {}/{}", browser.current_page + 1, browser.total_pages);

                self.state = NavState::Browsing(browser);
                self.redraw_page(fs, renderer, &browser);
                Ok(SelectionResult::StillBrowsing)
            }
            NavKey::Confirm => self.confirm(fs, renderer, browser),
            NavKey::Cancel => {
                self.cursor.close(fs);
                self.state = NavState::Exiting(Outcome::Cancelled);
                info!("selection cancelled in {}", browser.current_path);
                Ok(SelectionResult::Cancelled)
            }
        }
    }

    fn confirm(
        &mut self,
        fs: &mut F,
        renderer: &mut Renderer<'_>,
        browser: BrowserState,
    ) -> Result<SelectionResult<F::File>, SelectorError> {
        if browser.on_parent_entry() {
            if browser.current_path.is_root() {
                return Ok(SelectionResult::StillBrowsing);
            }
            self.cursor.close(fs);
            return Ok(self.enter(fs, renderer, browser.current_path.parent()));
        }

        let index = browser.logical_index(self.capacity);
        let entry = if self.cursor.seek_to_logical_index(fs, index) {
            self.cursor.advance(fs)
        } else {
            None
        };
        let Some(entry) = entry else {
            warn!("entry {} of {} vanished", index, browser.current_path);
            return Ok(SelectionResult::StillBrowsing);
        };

        // Build the path first so an overflow leaves the folder open
        let target = browser.current_path.join(entry.name_str())?;
        self.cursor.close(fs);

        if entry.is_dir {
            return Ok(self.enter(fs, renderer, target));
        }

        match fs.open_file(target.as_str()) {
            Ok(file) => {
                info!("selected {}", target);
                self.state = NavState::Exiting(Outcome::Selected);
                Ok(SelectionResult::FileSelected(file))
            }
            Err(e) => {
                warn!("cannot open {}: {}", target, e);
                self.state = NavState::Exiting(Outcome::FileOpenFailed(e));
                Err(SelectorError::FileOpen(e))
            }
        }
    }

    /// Replace the browser with a fresh one on `path`. The old handle must
    /// already be closed. A failure ends the session like Cancel.
    fn enter(&mut self, fs: &mut F, renderer: &mut Renderer<'_>, path: DirPath) -> SelectionResult<F::File> {
        match open_folder(fs, path, self.capacity) {
            Ok((browser, cursor)) => {
                self.cursor = cursor;
                self.state = NavState::Browsing(browser);
                self.redraw_page(fs, renderer, &browser);
                SelectionResult::StillBrowsing
            }
            Err(e) => {
                warn!("cannot open folder {}: {}", path, e);
                self.state = NavState::Exiting(Outcome::Aborted);
                SelectionResult::Cancelled
            }
        }
    }

    /// Seek to the first entry of the current page and repaint everything
    fn redraw_page(&mut self, fs: &mut F, renderer: &mut Renderer<'_>, browser: &BrowserState) {
        let model = PageModel::new(browser.total_entries, self.capacity);
        let count = model.entries_in_page(browser.current_page);

        renderer.clear();
        renderer.draw_header(&browser.current_path, browser.current_page, browser.total_pages);

        self.cursor
            .seek_to_logical_index(fs, model.logical_index(browser.current_page, 0));
        for slot in 0..count {
            match self.cursor.advance(fs) {
                Some(entry) => renderer.draw_entry(slot, &entry),
                None => break,
            }
        }

        renderer.draw_marker(browser.current_entry, true);
        renderer.draw_footer();
    }
}

fn open_folder<F: FileSystem>(
    fs: &mut F,
    path: DirPath,
    capacity: usize,
) -> Result<(BrowserState, DirectoryCursor<F>), FsError> {
    let mut cursor = DirectoryCursor::open(fs, &path)?;
    let total_entries = cursor.count_entries(fs);
    let browser = BrowserState::new(path, total_entries, capacity);
    debug!(
        "opened {} ({} entries, {} pages)",
        browser.current_path, browser.total_entries, browser.total_pages
    );
    Ok((browser, cursor))
}
