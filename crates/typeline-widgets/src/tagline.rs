#![forbid(unsafe_code)]

//! Animated hero tagline widget.
//!
//! Provides a [`Tagline`] widget that renders a title, a divider, a fixed
//! lead-in, and an animated phrase with a blinking caret, plus a
//! [`TaglineState`] that drives the repeating type/pause/delete cycle over
//! a fixed list of [`Entry`] phrases.
//!
//! The animation is a three-phase state machine advanced one transition per
//! scheduled tick:
//!
//! - `Typing`: one grapheme of the active phrase is appended per tick until
//!   the phrase is complete, then the machine enters `Paused`.
//! - `Paused`: a single long hold; the next tick begins `Deleting`.
//! - `Deleting`: one grapheme is removed per tick until the text is empty,
//!   then the machine advances to the next phrase (wrapping) and types again.
//!
//! The cycle is infinite. [`TaglineState::delay`] reports how long to wait
//! before the next tick, so a driver does
//! `state.tick(); Cmd::tick(state.delay())` and nothing else.
//!
//! # Example
//!
//! ```rust
//! use typeline_widgets::tagline::{Entry, Phase, TaglineState};
//!
//! let entries = vec![Entry::new("Tranquil", "🌿"), Entry::new("Graceful", "🪔")];
//! let mut state = TaglineState::new(entries).unwrap();
//! assert_eq!(state.visible(), "");
//! assert_eq!(state.phase(), Phase::Typing);
//!
//! state.tick();
//! assert_eq!(state.visible(), "T");
//! ```

use crate::rule::Rule;
use crate::{StatefulWidget, Widget, draw_text_span, set_style_area};
use std::time::Duration;
use typeline_core::frame::Frame;
use typeline_core::geometry::Rect;
use typeline_core::style::Style;
use unicode_segmentation::UnicodeSegmentation;

/// One phrase in the animated rotation: a word plus a trailing decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    text: String,
    decoration: String,
}

impl Entry {
    /// Create an entry from a word and a trailing decoration glyph.
    pub fn new(text: impl Into<String>, decoration: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            decoration: decoration.into(),
        }
    }

    /// The phrase word.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The trailing decoration.
    pub fn decoration(&self) -> &str {
        &self.decoration
    }

    /// The string the animation types out: text, a space, then the
    /// decoration. Derived on demand; an entry with no decoration yields
    /// the bare text (and an entirely empty entry the empty string).
    pub fn full_text(&self) -> String {
        if self.decoration.is_empty() {
            self.text.clone()
        } else {
            format!("{} {}", self.text, self.decoration)
        }
    }
}

/// The animator's current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Appending one grapheme per tick.
    #[default]
    Typing,
    /// Holding the complete phrase on screen.
    Paused,
    /// Removing one grapheme per tick.
    Deleting,
}

/// The three tunable delays of the animation. Everything else is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaglineTimings {
    /// Delay between ticks while typing.
    pub type_delay: Duration,
    /// Delay between ticks while deleting.
    pub delete_delay: Duration,
    /// How long the completed phrase holds before deletion begins.
    pub pause_delay: Duration,
}

impl Default for TaglineTimings {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(50),
            pause_delay: Duration::from_millis(2000),
        }
    }
}

/// Constructor error for [`TaglineState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaglineError {
    /// The entry list was empty; the animation needs at least one phrase.
    EmptyEntries,
}

impl std::fmt::Display for TaglineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEntries => write!(f, "tagline needs at least one entry"),
        }
    }
}

impl std::error::Error for TaglineError {}

/// The default rotation: five Bhutan-themed phrases.
pub fn default_entries() -> Vec<Entry> {
    vec![
        Entry::new("Tranquil", "🌿"),
        Entry::new("Graceful", "🪔"),
        Entry::new("Majestic", "🌄"),
        Entry::new("Sacred", "🙏"),
        Entry::new("Untamed", "🐉"),
    ]
}

/// Animation state for a [`Tagline`] widget.
///
/// Owns the immutable entry list and the mutable animation fields. The only
/// mutator is [`tick`](Self::tick); drivers must not write fields between
/// ticks, and each tick expects exactly one scheduled successor (see
/// [`delay`](Self::delay)).
#[derive(Debug, Clone)]
pub struct TaglineState {
    entries: Vec<Entry>,
    timings: TaglineTimings,
    active: usize,
    visible: String,
    phase: Phase,
}

impl TaglineState {
    /// Create an animator over `entries` with default timings.
    ///
    /// Fails fast on an empty list rather than looping over nothing.
    pub fn new(entries: Vec<Entry>) -> Result<Self, TaglineError> {
        Self::with_timings(entries, TaglineTimings::default())
    }

    /// Create an animator with explicit timings.
    pub fn with_timings(
        entries: Vec<Entry>,
        timings: TaglineTimings,
    ) -> Result<Self, TaglineError> {
        if entries.is_empty() {
            return Err(TaglineError::EmptyEntries);
        }
        Ok(Self {
            entries,
            timings,
            active: 0,
            visible: String::new(),
            phase: Phase::Typing,
        })
    }

    /// The entry rotation.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The configured timings.
    pub fn timings(&self) -> TaglineTimings {
        self.timings
    }

    /// Index of the entry currently being typed or deleted.
    pub fn active(&self) -> usize {
        self.active
    }

    /// The currently visible prefix of the active phrase.
    pub fn visible(&self) -> &str {
        &self.visible
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The complete string of the active entry.
    pub fn full_text(&self) -> String {
        self.entries[self.active].full_text()
    }

    /// Advance the state machine by one transition.
    ///
    /// Exactly one of: append a grapheme, enter the pause, begin deleting,
    /// remove a grapheme, or wrap to the next entry.
    pub fn tick(&mut self) {
        match self.phase {
            Phase::Typing => {
                let full = self.full_text();
                if self.visible == full {
                    self.phase = Phase::Paused;
                } else if let Some(next) = full[self.visible.len()..].graphemes(true).next() {
                    // `visible` is always a prefix of `full`, so the byte
                    // offset lands on a grapheme boundary.
                    self.visible.push_str(next);
                }
            }
            Phase::Paused => {
                self.phase = Phase::Deleting;
            }
            Phase::Deleting => {
                if self.visible.is_empty() {
                    self.active = (self.active + 1) % self.entries.len();
                    self.phase = Phase::Typing;
                } else if let Some((offset, _)) = self.visible.grapheme_indices(true).last() {
                    self.visible.truncate(offset);
                }
            }
        }
    }

    /// How long to wait before the next tick.
    ///
    /// A function of the phase the last transition landed in, so the driver
    /// schedules exactly one successor per tick and the pause is a single
    /// long delay rather than many polls.
    pub fn delay(&self) -> Duration {
        match self.phase {
            Phase::Typing => self.timings.type_delay,
            Phase::Paused => self.timings.pause_delay,
            Phase::Deleting => self.timings.delete_delay,
        }
    }
}

impl Default for TaglineState {
    fn default() -> Self {
        Self::new(default_entries()).expect("default entries are non-empty")
    }
}

/// Caret glyph rendered after the visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaretStyle {
    /// Vertical bar caret (|).
    #[default]
    Bar,
    /// Block caret (█).
    Block,
    /// Underline caret (_).
    Underline,
    /// Custom character caret.
    Custom(char),
}

impl CaretStyle {
    /// The character to display for this caret style.
    pub fn glyph(&self) -> char {
        match self {
            Self::Bar => '|',
            Self::Block => '█',
            Self::Underline => '_',
            Self::Custom(c) => *c,
        }
    }
}

/// The fixed lead-in rendered before the animated phrase.
pub const DEFAULT_LEAD_IN: &str = "Where Every Journey Is";

/// The animated hero tagline widget.
///
/// Renders up to three rows: an optional title, a divider, and the tagline
/// line (`lead-in` + animated text + caret). The caret blinks via the
/// terminal blink attribute, so blinking costs no ticks.
#[derive(Debug, Clone)]
pub struct Tagline<'a> {
    title: Option<&'a str>,
    lead_in: &'a str,
    divider: bool,
    style: Style,
    title_style: Style,
    lead_style: Style,
    accent_style: Style,
    caret: CaretStyle,
    caret_style: Option<Style>,
}

impl<'a> Default for Tagline<'a> {
    fn default() -> Self {
        Self {
            title: None,
            lead_in: DEFAULT_LEAD_IN,
            divider: true,
            style: Style::default(),
            title_style: Style::new().bold(),
            lead_style: Style::default(),
            accent_style: Style::new().bold(),
            caret: CaretStyle::default(),
            caret_style: None,
        }
    }
}

impl<'a> Tagline<'a> {
    /// Create a tagline widget with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title rendered above the divider.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the lead-in text rendered before the animated phrase.
    #[must_use]
    pub fn lead_in(mut self, lead_in: &'a str) -> Self {
        self.lead_in = lead_in;
        self
    }

    /// Show or hide the divider row.
    #[must_use]
    pub fn divider(mut self, divider: bool) -> Self {
        self.divider = divider;
        self
    }

    /// Set a style merged over the widget's whole area before drawing.
    ///
    /// Purely cosmetic; has no effect on the animation.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the title style.
    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Set the lead-in style.
    #[must_use]
    pub fn lead_style(mut self, style: Style) -> Self {
        self.lead_style = style;
        self
    }

    /// Set the style of the animated text.
    #[must_use]
    pub fn accent_style(mut self, style: Style) -> Self {
        self.accent_style = style;
        self
    }

    /// Set the caret glyph.
    #[must_use]
    pub fn caret(mut self, caret: CaretStyle) -> Self {
        self.caret = caret;
        self
    }

    /// Set the caret style. Defaults to the accent style; the blink
    /// attribute is always added.
    #[must_use]
    pub fn caret_style(mut self, style: Style) -> Self {
        self.caret_style = Some(style);
        self
    }
}

impl<'a> StatefulWidget for Tagline<'a> {
    type State = TaglineState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Tagline",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }

        set_style_area(&mut frame.buffer, area, self.style);

        let mut row = 0;
        if let Some(title) = self.title {
            let line = area.row(row);
            if line.is_empty() {
                return;
            }
            draw_text_span(
                &mut frame.buffer,
                line.x,
                line.y,
                title,
                self.title_style,
                line.right(),
            );
            row += 1;
        }

        if self.divider {
            let line = area.row(row);
            if line.is_empty() {
                return;
            }
            Rule::new().style(self.lead_style).render(line, frame);
            row += 1;
        }

        let line = area.row(row);
        if line.is_empty() {
            return;
        }

        let mut x = line.x;
        if !self.lead_in.is_empty() {
            x = draw_text_span(
                &mut frame.buffer,
                x,
                line.y,
                self.lead_in,
                self.lead_style,
                line.right(),
            );
            if x < line.right() {
                x = draw_text_span(&mut frame.buffer, x, line.y, " ", self.lead_style, line.right());
            }
        }

        x = draw_text_span(
            &mut frame.buffer,
            x,
            line.y,
            state.visible(),
            self.accent_style,
            line.right(),
        );

        let caret_style = self.caret_style.unwrap_or(self.accent_style).blink();
        let mut caret_buf = [0u8; 4];
        draw_text_span(
            &mut frame.buffer,
            x,
            line.y,
            self.caret.glyph().encode_utf8(&mut caret_buf),
            caret_style,
            line.right(),
        );
    }
}

impl<'a> Widget for Tagline<'a> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let mut state = TaglineState::default();
        StatefulWidget::render(self, area, frame, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeline_core::cell::PackedRgba;
    use typeline_core::style::StyleFlags;

    fn two_entries() -> Vec<Entry> {
        vec![Entry::new("Tranquil", "🌿"), Entry::new("Graceful", "🪔")]
    }

    fn state() -> TaglineState {
        TaglineState::new(two_entries()).expect("non-empty entries")
    }

    /// Grapheme count of the active entry's full text.
    fn units(state: &TaglineState) -> usize {
        state.full_text().graphemes(true).count()
    }

    // --- Entry tests ---

    #[test]
    fn full_text_joins_with_single_space() {
        let entry = Entry::new("Tranquil", "🌿");
        assert_eq!(entry.full_text(), "Tranquil 🌿");
    }

    #[test]
    fn full_text_without_decoration_is_bare_text() {
        assert_eq!(Entry::new("Serene", "").full_text(), "Serene");
    }

    #[test]
    fn full_text_of_blank_entry_is_empty() {
        assert_eq!(Entry::new("", "").full_text(), "");
    }

    // --- Construction tests ---

    #[test]
    fn new_starts_typing_first_entry() {
        let state = state();
        assert_eq!(state.active(), 0);
        assert_eq!(state.visible(), "");
        assert_eq!(state.phase(), Phase::Typing);
    }

    #[test]
    fn empty_entry_list_is_rejected() {
        assert_eq!(
            TaglineState::new(vec![]).unwrap_err(),
            TaglineError::EmptyEntries
        );
    }

    #[test]
    fn error_displays_reason() {
        assert_eq!(
            TaglineError::EmptyEntries.to_string(),
            "tagline needs at least one entry"
        );
    }

    #[test]
    fn default_rotation_has_five_entries() {
        assert_eq!(default_entries().len(), 5);
        assert_eq!(TaglineState::default().entries().len(), 5);
    }

    #[test]
    fn default_timings() {
        let t = TaglineTimings::default();
        assert_eq!(t.type_delay, Duration::from_millis(100));
        assert_eq!(t.delete_delay, Duration::from_millis(50));
        assert_eq!(t.pause_delay, Duration::from_millis(2000));
    }

    // --- Typing ---

    #[test]
    fn typing_appends_one_grapheme_per_tick() {
        let mut state = state();
        let full = state.full_text();
        let n = units(&state);

        for i in 1..=n {
            state.tick();
            assert_eq!(state.phase(), Phase::Typing);
            assert!(full.starts_with(state.visible()));
            assert_eq!(state.visible().graphemes(true).count(), i);
        }
        assert_eq!(state.visible(), full);
    }

    #[test]
    fn decoration_is_a_single_typing_step() {
        let mut state = state();
        let n = units(&state);
        // "Tranquil" (8) + space + leaf emoji.
        assert_eq!(n, 10);
        for _ in 0..n - 1 {
            state.tick();
        }
        assert_eq!(state.visible(), "Tranquil ");
        state.tick();
        assert_eq!(state.visible(), "Tranquil 🌿");
    }

    #[test]
    fn completed_phrase_enters_pause_on_next_tick() {
        let mut state = state();
        let n = units(&state);
        for _ in 0..n {
            state.tick();
        }
        assert_eq!(state.phase(), Phase::Typing);
        state.tick();
        assert_eq!(state.phase(), Phase::Paused);
        assert_eq!(state.visible(), state.full_text());
    }

    #[test]
    fn blank_phrase_pauses_immediately() {
        let mut state = TaglineState::new(vec![Entry::new("", "")]).unwrap();
        state.tick();
        assert_eq!(state.phase(), Phase::Paused);
        assert_eq!(state.visible(), "");
    }

    // --- Pausing ---

    #[test]
    fn pause_tick_begins_deleting() {
        let mut state = state();
        for _ in 0..units(&state) + 1 {
            state.tick();
        }
        assert_eq!(state.phase(), Phase::Paused);
        state.tick();
        assert_eq!(state.phase(), Phase::Deleting);
        // Deletion itself starts on the following tick.
        assert_eq!(state.visible(), state.full_text());
    }

    // --- Deleting ---

    #[test]
    fn deleting_removes_one_grapheme_per_tick() {
        let mut state = state();
        let n = units(&state);
        for _ in 0..n + 2 {
            state.tick();
        }
        assert_eq!(state.phase(), Phase::Deleting);

        for i in (0..n).rev() {
            state.tick();
            assert_eq!(state.visible().graphemes(true).count(), i);
            assert!(state.full_text().starts_with(state.visible()));
        }
        assert_eq!(state.visible(), "");
        assert_eq!(state.phase(), Phase::Deleting);
    }

    #[test]
    fn empty_text_wraps_to_next_entry() {
        let mut state = state();
        let n = units(&state);
        for _ in 0..(2 * n + 2) {
            state.tick();
        }
        assert_eq!(state.visible(), "");
        state.tick();
        assert_eq!(state.active(), 1);
        assert_eq!(state.phase(), Phase::Typing);
        assert_eq!(state.visible(), "");
    }

    // --- Cycle closure ---

    /// Ticks for one complete type + pause + delete cycle of the active
    /// entry: n appends, pause entry, pause exit, n removals, wrap.
    fn cycle_ticks(state: &TaglineState) -> usize {
        2 * units(state) + 3
    }

    #[test]
    fn full_rotation_returns_to_start() {
        let mut state = state();
        for _ in 0..state.entries().len() {
            let ticks = cycle_ticks(&state);
            for _ in 0..ticks {
                state.tick();
            }
        }
        assert_eq!(state.active(), 0);
        assert_eq!(state.visible(), "");
        assert_eq!(state.phase(), Phase::Typing);
    }

    #[test]
    fn rotation_is_infinite_not_one_shot() {
        let mut state = state();
        let per_rotation: usize = {
            let mut probe = state.clone();
            let mut total = 0;
            for _ in 0..probe.entries().len() {
                let t = cycle_ticks(&probe);
                for _ in 0..t {
                    probe.tick();
                }
                total += t;
            }
            total
        };

        for _ in 0..3 * per_rotation {
            state.tick();
        }
        assert_eq!(state.active(), 0);
        assert_eq!(state.phase(), Phase::Typing);
    }

    // --- Determinism ---

    #[test]
    fn snapshot_sequence_is_deterministic() {
        fn run() -> Vec<(String, Phase)> {
            let mut state = state();
            (0..100)
                .map(|_| {
                    state.tick();
                    (state.visible().to_string(), state.phase())
                })
                .collect()
        }
        assert_eq!(run(), run());
    }

    // --- Delays ---

    #[test]
    fn delay_follows_phase() {
        let mut state = state();
        let t = state.timings();

        assert_eq!(state.delay(), t.type_delay);

        for _ in 0..units(&state) + 1 {
            state.tick();
        }
        assert_eq!(state.phase(), Phase::Paused);
        assert_eq!(state.delay(), t.pause_delay);

        state.tick();
        assert_eq!(state.phase(), Phase::Deleting);
        assert_eq!(state.delay(), t.delete_delay);
    }

    #[test]
    fn custom_timings_are_reported() {
        let timings = TaglineTimings {
            type_delay: Duration::from_millis(10),
            delete_delay: Duration::from_millis(5),
            pause_delay: Duration::from_millis(200),
        };
        let state = TaglineState::with_timings(two_entries(), timings).unwrap();
        assert_eq!(state.delay(), Duration::from_millis(10));
        assert_eq!(state.timings(), timings);
    }

    // --- Widget rendering ---

    fn render_rows(widget: &Tagline, state: &mut TaglineState, width: u16, height: u16) -> Vec<String> {
        let mut frame = Frame::new(width, height);
        StatefulWidget::render(widget, Rect::new(0, 0, width, height), &mut frame, state);
        (0..height).map(|y| frame.buffer.row_text(y)).collect()
    }

    #[test]
    fn renders_lead_in_text_and_caret() {
        let mut state = state();
        for _ in 0..3 {
            state.tick();
        }
        let rows = render_rows(&Tagline::new().divider(false), &mut state, 40, 1);
        assert_eq!(rows[0], "Where Every Journey Is Tra|");
    }

    #[test]
    fn renders_title_divider_and_tagline_rows() {
        let mut state = state();
        state.tick();
        let rows = render_rows(&Tagline::new().title("Bhutan"), &mut state, 30, 3);
        assert_eq!(rows[0], "Bhutan");
        assert!(rows[1].starts_with("──────"));
        assert_eq!(rows[2], "Where Every Journey Is T|");
    }

    #[test]
    fn caret_cell_blinks() {
        let mut state = state();
        state.tick();
        let mut frame = Frame::new(40, 1);
        let widget = Tagline::new().divider(false);
        StatefulWidget::render(&widget, Rect::new(0, 0, 40, 1), &mut frame, &mut state);

        // "Where Every Journey Is " is 23 columns, then "T", caret at 24.
        let caret = frame.buffer.get(24, 0).expect("caret cell");
        assert_eq!(caret.content.as_char(), Some('|'));
        assert!(caret.attrs.contains(StyleFlags::BLINK));
    }

    #[test]
    fn custom_caret_glyph() {
        let mut state = state();
        let widget = Tagline::new()
            .divider(false)
            .caret(CaretStyle::Custom('▌'));
        let rows = render_rows(&widget, &mut state, 40, 1);
        assert!(rows[0].ends_with('▌'));
    }

    #[test]
    fn container_style_washes_area() {
        let mut state = state();
        let widget = Tagline::new()
            .divider(false)
            .lead_in("Hi")
            .style(Style::new().bg(PackedRgba::rgb(30, 30, 60)));
        let mut frame = Frame::new(10, 1);
        StatefulWidget::render(&widget, Rect::new(0, 0, 10, 1), &mut frame, &mut state);

        // Cells past the text keep the container wash.
        assert_eq!(frame.buffer.get(9, 0).unwrap().bg, PackedRgba::rgb(30, 30, 60));
        assert!(frame.buffer.get(9, 0).unwrap().is_empty());
    }

    #[test]
    fn accent_style_applies_to_animated_text_only() {
        let mut state = state();
        state.tick();
        let accent = PackedRgba::rgb(255, 200, 0);
        let widget = Tagline::new()
            .divider(false)
            .accent_style(Style::new().fg(accent));
        let mut frame = Frame::new(40, 1);
        StatefulWidget::render(&widget, Rect::new(0, 0, 40, 1), &mut frame, &mut state);

        // Lead-in keeps the default foreground; the typed "T" is accented.
        assert_ne!(frame.buffer.get(0, 0).unwrap().fg, accent);
        assert_eq!(frame.buffer.get(23, 0).unwrap().fg, accent);
    }

    #[test]
    fn zero_area_render_is_safe() {
        let mut state = state();
        let mut frame = Frame::new(1, 1);
        StatefulWidget::render(
            &Tagline::new(),
            Rect::new(0, 0, 0, 0),
            &mut frame,
            &mut state,
        );
    }

    #[test]
    fn narrow_area_clips_without_panic() {
        let mut state = state();
        for _ in 0..12 {
            state.tick();
        }
        let rows = render_rows(&Tagline::new().divider(false), &mut state, 8, 1);
        assert_eq!(rows[0], "Where Ev");
    }

    #[test]
    fn stateless_render_shows_empty_animation() {
        let mut frame = Frame::new(40, 1);
        Widget::render(
            &Tagline::new().divider(false),
            Rect::new(0, 0, 40, 1),
            &mut frame,
        );
        assert_eq!(frame.buffer.row_text(0), "Where Every Journey Is |");
    }
}
