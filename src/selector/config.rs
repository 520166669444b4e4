//! Selector configuration
//!
//! Screen geometry, page sizing and the key bindings. Defaults match the
//! Mac Plus screen (512x342, 1 bpp) and Mac virtual key codes.

use crate::error::SelectorError;
use crate::font::{CHAR_WIDTH, ROW_PITCH};
use crate::input::NavKey;

/// Mac virtual key codes used by the default key map
pub mod keycode {
    pub const RETURN: u8 = 0x24;
    pub const ESCAPE: u8 = 0x35;
    pub const ENTER: u8 = 0x4C;
    pub const LEFT: u8 = 0x7B;
    pub const RIGHT: u8 = 0x7C;
    pub const DOWN: u8 = 0x7D;
    pub const UP: u8 = 0x7E;
}

/// 7-bit key codes bound to each navigation action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    pub next: u8,
    pub previous: u8,
    pub page_left: u8,
    pub page_right: u8,
    pub confirm: u8,
    pub confirm_alt: u8,
    pub cancel: u8,
}

impl KeyMap {
    /// Translate a key code into a navigation action
    pub fn action(&self, code: u8) -> Option<NavKey> {
        match code {
            c if c == self.next => Some(NavKey::MoveNext),
            c if c == self.previous => Some(NavKey::MovePrevious),
            c if c == self.page_left => Some(NavKey::PageLeft),
            c if c == self.page_right => Some(NavKey::PageRight),
            c if c == self.confirm || c == self.confirm_alt => Some(NavKey::Confirm),
            c if c == self.cancel => Some(NavKey::Cancel),
            _ => None,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next: keycode::DOWN,
            previous: keycode::UP,
            page_left: keycode::LEFT,
            page_right: keycode::RIGHT,
            confirm: keycode::RETURN,
            confirm_alt: keycode::ENTER,
            cancel: keycode::ESCAPE,
        }
    }
}

/// Configuration for selector creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Framebuffer width in pixels (multiple of 8)
    pub width: usize,
    /// Framebuffer height in pixels
    pub height: usize,
    /// Entries shown per page
    pub page_capacity: usize,
    /// Maximum characters of a name drawn per row
    pub name_columns: usize,
    /// Key bindings
    pub keymap: KeyMap,
}

impl SelectorConfig {
    /// Bytes per framebuffer line
    #[inline]
    pub const fn stride(&self) -> usize {
        self.width / CHAR_WIDTH
    }

    /// Glyph cells per text row
    #[inline]
    pub const fn text_columns(&self) -> usize {
        self.width / CHAR_WIDTH
    }

    /// Text rows that fit on screen (glyph plus one pixel gap)
    #[inline]
    pub const fn text_rows(&self) -> usize {
        self.height / ROW_PITCH
    }

    /// Framebuffer size in bytes
    #[inline]
    pub const fn framebuffer_len(&self) -> usize {
        self.stride() * self.height
    }

    /// Check that the geometry can hold a header, a full page and a footer
    pub fn validate(&self) -> Result<(), SelectorError> {
        if self.width == 0 || self.width % CHAR_WIDTH != 0 {
            return Err(SelectorError::InvalidConfig("width must be a non-zero multiple of 8"));
        }
        if self.page_capacity == 0 {
            return Err(SelectorError::InvalidConfig("page capacity must be at least 1"));
        }
        if self.page_capacity + 2 > self.text_rows() {
            return Err(SelectorError::InvalidConfig("page does not fit on screen"));
        }
        if self.name_columns == 0 || self.name_columns + 1 > self.text_columns() {
            return Err(SelectorError::InvalidConfig("name columns do not fit on screen"));
        }
        Ok(())
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 342,
            page_capacity: 36,
            name_columns: 30,
            keymap: KeyMap::default(),
        }
    }
}
