#![forbid(unsafe_code)]

//! Style attributes applied to cells.

use crate::cell::PackedRgba;
use bitflags::bitflags;

bitflags! {
    /// Text style attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const REVERSE       = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
    }
}

/// A style that can be merged onto cells.
///
/// Each field is optional; unset fields leave the target cell untouched,
/// which is what lets styles layer (container style under text style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color override.
    pub fg: Option<PackedRgba>,
    /// Background color override.
    pub bg: Option<PackedRgba>,
    /// Attribute flags to add.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// Create an empty style.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags.
    #[must_use]
    pub fn attrs(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or(StyleFlags::empty()) | flags);
        self
    }

    /// Add the bold attribute.
    #[must_use]
    pub fn bold(self) -> Self {
        self.attrs(StyleFlags::BOLD)
    }

    /// Add the dim attribute.
    #[must_use]
    pub fn dim(self) -> Self {
        self.attrs(StyleFlags::DIM)
    }

    /// Add the italic attribute.
    #[must_use]
    pub fn italic(self) -> Self {
        self.attrs(StyleFlags::ITALIC)
    }

    /// Add the blink attribute.
    #[must_use]
    pub fn blink(self) -> Self {
        self.attrs(StyleFlags::BLINK)
    }

    /// Check whether the style sets nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Merge `other` over this style; `other`'s set fields win.
    #[must_use]
    pub fn patch(mut self, other: Style) -> Self {
        if other.fg.is_some() {
            self.fg = other.fg;
        }
        if other.bg.is_some() {
            self.bg = other.bg;
        }
        if let Some(flags) = other.attrs {
            self = self.attrs(flags);
        }
        self
    }
}
