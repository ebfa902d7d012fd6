#![forbid(unsafe_code)]

//! Horizontal rule (divider) widget.
//!
//! Draws a horizontal line across the available width, optionally with a
//! centered title inset.

use crate::{Widget, apply_style, draw_text_span};
use typeline_core::cell::Cell;
use typeline_core::frame::Frame;
use typeline_core::geometry::Rect;
use typeline_core::style::Style;
use unicode_width::UnicodeWidthStr;

/// A horizontal rule / divider.
///
/// Renders a single-row line, optionally with a title centered in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<'a> {
    /// Optional title text.
    title: Option<&'a str>,
    /// Style for the rule line characters.
    style: Style,
    /// Line character.
    line_char: char,
}

impl<'a> Default for Rule<'a> {
    fn default() -> Self {
        Self {
            title: None,
            style: Style::default(),
            line_char: '─',
        }
    }
}

impl<'a> Rule<'a> {
    /// Create a new rule with default settings (plain line, no title).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title text.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the style for the rule line.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the line character.
    #[must_use]
    pub fn line_char(mut self, c: char) -> Self {
        self.line_char = c;
        self
    }

    fn fill(&self, frame: &mut Frame, y: u16, start: u16, end: u16) {
        for x in start..end {
            let mut cell = Cell::from_char(self.line_char);
            apply_style(&mut cell, self.style);
            frame.buffer.set(x, y, cell);
        }
    }
}

impl Widget for Rule<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Rule",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }

        let y = area.y;
        match self.title {
            None | Some("") => self.fill(frame, y, area.x, area.right()),
            Some(title) => {
                let title_width = UnicodeWidthStr::width(title) as u16;

                // Need a padding space either side of the title; fall back
                // to a plain line when the area is too narrow.
                if area.width < title_width.saturating_add(4) {
                    self.fill(frame, y, area.x, area.right());
                    return;
                }

                let lead = (area.width - title_width - 2) / 2;
                let title_x = area.x + lead + 1;
                self.fill(frame, y, area.x, area.x + lead);
                let after = draw_text_span(
                    &mut frame.buffer,
                    title_x,
                    y,
                    title,
                    self.style,
                    area.right(),
                );
                self.fill(frame, y, after + 1, area.right());
            }
        }
    }
}
