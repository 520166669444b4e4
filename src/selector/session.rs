//! Selection session
//!
//! [`DiskImageSelector`] owns everything one browsing session needs: the
//! filesystem borrow, the renderer over the framebuffer and the navigation
//! state. The caller's main loop pops key events and feeds them in one at a
//! time until a terminal [`SelectionResult`] comes back.

use log::info;

use crate::config::SelectorConfig;
use crate::error::SelectorError;
use crate::fs::FileSystem;
use crate::input::{KeyEvent, KeySource};
use crate::nav::{BrowserState, NavState, NavigationStateMachine, SelectionResult};
use crate::path::DirPath;
use crate::render::Renderer;

/// One disc image browsing session
pub struct DiskImageSelector<'a, F: FileSystem> {
    fs: &'a mut F,
    renderer: Renderer<'a>,
    config: SelectorConfig,
    nav: NavigationStateMachine<F>,
}

impl<'a, F: FileSystem> DiskImageSelector<'a, F> {
    /// Open the root folder and draw its first page
    ///
    /// Fails with [`SelectorError::RootUnavailable`] when the card cannot be
    /// listed; the caller should fall back to its built-in image.
    pub fn new(fs: &'a mut F, framebuffer: &'a mut [u8], config: SelectorConfig) -> Result<Self, SelectorError> {
        let mut renderer = Renderer::new(framebuffer, config)?;

        let nav = NavigationStateMachine::open(fs, &mut renderer, DirPath::root())
            .map_err(SelectorError::RootUnavailable)?;

        if let Some(browser) = nav.browser() {
            info!(
                "disc selector ready: {} entries on {} pages",
                browser.total_entries, browser.total_pages
            );
        }

        Ok(Self {
            fs,
            renderer,
            config,
            nav,
        })
    }

    /// Feed one key event
    ///
    /// Releases and unmapped keys are ignored. After a terminal result every
    /// call fails with [`SelectorError::SessionFinished`].
    pub fn handle_key(&mut self, event: KeyEvent) -> Result<SelectionResult<F::File>, SelectorError> {
        if self.nav.is_finished() {
            return Err(SelectorError::SessionFinished);
        }
        if !event.pressed {
            return Ok(SelectionResult::StillBrowsing);
        }
        let Some(key) = self.config.keymap.action(event.code) else {
            return Ok(SelectionResult::StillBrowsing);
        };

        self.nav.handle(key, self.fs, &mut self.renderer)
    }

    /// Pop at most one event from `keys` and handle it
    pub fn poll<K: KeySource>(&mut self, keys: &mut K) -> Result<SelectionResult<F::File>, SelectorError> {
        match keys.pop() {
            Some(event) => self.handle_key(event),
            None if self.nav.is_finished() => Err(SelectorError::SessionFinished),
            None => Ok(SelectionResult::StillBrowsing),
        }
    }

    #[inline]
    pub fn state(&self) -> &NavState {
        self.nav.state()
    }

    /// Browser state, `None` once finished
    #[inline]
    pub fn browser(&self) -> Option<&BrowserState> {
        self.nav.browser()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.nav.is_finished()
    }

    #[inline]
    pub fn has_open_dir(&self) -> bool {
        self.nav.has_open_dir()
    }

    #[inline]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer<'a> {
        &self.renderer
    }

    /// Current screen contents
    #[inline]
    pub fn framebuffer(&self) -> &[u8] {
        self.renderer.framebuffer()
    }
}

impl<F: FileSystem> Drop for DiskImageSelector<'_, F> {
    fn drop(&mut self) {
        self.nav.release(self.fs);
    }
}
