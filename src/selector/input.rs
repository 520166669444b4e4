//! Keyboard input
//!
//! The host keyboard driver pushes one 16-bit word per transition into a
//! queue: bit 15 is set on press, and the low byte carries the 7-bit key
//! code shifted left by one.

/// Press flag in a raw queue word
const PRESS_FLAG: u16 = 0x8000;

/// A single key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// 7-bit logical key code
    pub code: u8,
    /// True on press, false on release
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn press(code: u8) -> Self {
        Self { code: code & 0x7F, pressed: true }
    }

    pub const fn release(code: u8) -> Self {
        Self { code: code & 0x7F, pressed: false }
    }

    /// Decode a raw keyboard queue word
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            code: ((raw & 0xFF) >> 1) as u8,
            pressed: raw & PRESS_FLAG != 0,
        }
    }

    /// Encode back into the keyboard queue format
    pub const fn to_raw(self) -> u16 {
        let flag = if self.pressed { PRESS_FLAG } else { 0 };
        flag | ((self.code as u16 & 0x7F) << 1)
    }
}

/// Navigation actions understood by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    MoveNext,
    MovePrevious,
    PageLeft,
    PageRight,
    Confirm,
    Cancel,
}

/// Non-blocking key event queue
pub trait KeySource {
    /// Pop the oldest pending event, `None` if the queue is empty
    fn pop(&mut self) -> Option<KeyEvent>;
}
