#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching. `KeyEventKind` defaults to `Press` when the terminal
//! cannot distinguish kinds.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// A scheduled tick from the runtime.
    ///
    /// Fired when a one-shot delay scheduled with `Cmd::tick` elapses. The
    /// model's `update` receives the tick and can respond with state changes
    /// and a follow-up schedule.
    Tick,
}

impl Event {
    /// Convert a Crossterm event into a typeline [`Event`].
    ///
    /// Events without a typeline counterpart (mouse, focus, paste) map to
    /// `None`.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => Some(Self::Key(KeyEvent {
                code: KeyCode::from_crossterm(key.code)?,
                modifiers: Modifiers::from_crossterm(key.modifiers),
                kind: match key.kind {
                    cte::KeyEventKind::Press => KeyEventKind::Press,
                    cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    cte::KeyEventKind::Release => KeyEventKind::Release,
                },
            })),
            cte::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
}

impl KeyCode {
    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(code: cte::KeyCode) -> Option<Self> {
        match code {
            cte::KeyCode::Char(c) => Some(Self::Char(c)),
            cte::KeyCode::Enter => Some(Self::Enter),
            cte::KeyCode::Esc => Some(Self::Escape),
            cte::KeyCode::Backspace => Some(Self::Backspace),
            cte::KeyCode::Up => Some(Self::Up),
            cte::KeyCode::Down => Some(Self::Down),
            cte::KeyCode::Left => Some(Self::Left),
            cte::KeyCode::Right => Some(Self::Right),
            _ => None,
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held (repeat event).
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Modifiers {
    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(mods: cte::KeyModifiers) -> Self {
        let mut out = Self::NONE;
        if mods.contains(cte::KeyModifiers::SHIFT) {
            out |= Self::SHIFT;
        }
        if mods.contains(cte::KeyModifiers::ALT) {
            out |= Self::ALT;
        }
        if mods.contains(cte::KeyModifiers::CONTROL) {
            out |= Self::CTRL;
        }
        if mods.contains(cte::KeyModifiers::SUPER) {
            out |= Self::SUPER;
        }
        out
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
