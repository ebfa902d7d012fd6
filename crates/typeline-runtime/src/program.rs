#![forbid(unsafe_code)]

//! Program runtime: the update/view loop and its command type.
//!
//! The runtime separates state (Model) from rendering (view) and provides a
//! command pattern for side effects. The only scheduled side effect is
//! [`Cmd::Tick`]: a **one-shot** delayed callback. The pending deadline is a
//! single explicitly owned handle on the event loop: scheduling a new tick
//! replaces the previous one, firing consumes it, and quitting clears it, so
//! at most one tick is ever in flight and none survives teardown.
//!
//! # Example
//!
//! ```ignore
//! use typeline_runtime::{Cmd, Model};
//! use typeline_core::{Event, Frame};
//! use std::time::Duration;
//!
//! struct Blink { on: bool }
//!
//! enum Msg { Tick, Quit, Noop }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Tick => Msg::Tick,
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             _ => Msg::Noop,
//!         }
//!     }
//! }
//!
//! impl Model for Blink {
//!     type Message = Msg;
//!
//!     fn init(&mut self) -> Cmd<Msg> {
//!         Cmd::tick(Duration::from_millis(500))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Tick => {
//!                 self.on = !self.on;
//!                 Cmd::tick(Duration::from_millis(500))
//!             }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Noop => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut typeline_core::Frame) {
//!         // draw
//!     }
//! }
//! ```

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{cursor, event as cte, execute, queue, style as ct_style, terminal};
use typeline_core::cell::PackedRgba;
use typeline_core::event::Event;
use typeline_core::frame::Frame;
use typeline_core::style::StyleFlags;

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state. Must be
    /// convertible from runtime events (keys, resizes, ticks).
    type Message: From<Event>;

    /// Initialize the model with startup commands.
    ///
    /// Called once when the program starts. Return a command to kick off
    /// initial work, typically the first `Cmd::tick`.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns a command for
    /// any side effect that should follow.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);
}

/// Commands represent side effects to be executed by the runtime.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the program. Cancels any pending tick.
    Quit,
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Send a message back to the model.
    Msg(M),
    /// Schedule a one-shot tick after a duration, replacing any pending tick.
    Tick(Duration),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Tick(d) => f.debug_tuple("Tick").field(d).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a one-shot tick command.
    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }

    /// Create a batch of commands.
    pub fn batch(cmds: Vec<Self>) -> Self {
        if cmds.is_empty() {
            Self::None
        } else if cmds.len() == 1 {
            cmds.into_iter()
                .next()
                .expect("non-empty vec has at least one element")
        } else {
            Self::Batch(cmds)
        }
    }

    /// Count the number of atomic commands in this command.
    ///
    /// Returns 0 for None, 1 for atomic commands, and recurses for Batch.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}

/// Fallback poll timeout when no tick is pending, so resizes and input stay
/// responsive without busy-waiting.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Terminal program driver.
///
/// Owns the model, the terminal session (raw mode + alternate screen), and
/// the single pending tick deadline.
pub struct Program<M: Model> {
    model: M,
}

impl<M: Model> Program<M> {
    /// Create a program around a model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Run the program until the model returns [`Cmd::Quit`].
    ///
    /// Enters raw mode and the alternate screen for the duration of the run
    /// and restores the terminal on the way out, including on error.
    pub fn run(mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("program started");

        let result = self.event_loop(&mut stdout);

        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        #[cfg(feature = "tracing")]
        tracing::debug!("program stopped");

        result
    }

    fn event_loop(&mut self, stdout: &mut Stdout) -> io::Result<()> {
        let mut running = true;
        // The one owned timer handle: at most one tick pending at any time.
        let mut pending_tick: Option<Instant> = None;

        let init_cmd = self.model.init();
        Self::execute_cmd(&mut self.model, init_cmd, &mut running, &mut pending_tick);

        while running {
            self.draw(stdout)?;

            let timeout = match pending_tick {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => IDLE_POLL,
            };

            if cte::poll(timeout)? {
                let raw = cte::read()?;
                if let Some(event) = Event::from_crossterm(raw) {
                    let cmd = self.model.update(M::Message::from(event));
                    Self::execute_cmd(&mut self.model, cmd, &mut running, &mut pending_tick);
                }
            }

            if let Some(deadline) = pending_tick
                && Instant::now() >= deadline
            {
                // Firing consumes the handle; update may schedule a successor.
                pending_tick = None;
                let cmd = self.model.update(M::Message::from(Event::Tick));
                Self::execute_cmd(&mut self.model, cmd, &mut running, &mut pending_tick);
            }
        }

        Ok(())
    }

    fn execute_cmd(
        model: &mut M,
        cmd: Cmd<M::Message>,
        running: &mut bool,
        pending_tick: &mut Option<Instant>,
    ) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                *running = false;
                *pending_tick = None;
            }
            Cmd::Msg(m) => {
                let next = model.update(m);
                Self::execute_cmd(model, next, running, pending_tick);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    if !*running {
                        break;
                    }
                    Self::execute_cmd(model, c, running, pending_tick);
                }
            }
            Cmd::Tick(duration) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(delay_ms = duration.as_millis() as u64, "tick scheduled");
                *pending_tick = Some(Instant::now() + duration);
            }
        }
    }

    fn draw(&self, stdout: &mut Stdout) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        present(stdout, &frame)
    }
}

/// Write a frame to the terminal as a full repaint.
///
/// Emits style changes only when they differ from the previous cell, which
/// keeps the escape-sequence volume reasonable for a diff-less presenter.
fn present(stdout: &mut Stdout, frame: &Frame) -> io::Result<()> {
    let buf = &frame.buffer;
    let mut last: Option<(PackedRgba, PackedRgba, StyleFlags)> = None;

    for y in 0..buf.height() {
        queue!(stdout, cursor::MoveTo(0, y))?;
        for x in 0..buf.width() {
            let Some(cell) = buf.get(x, y) else { break };
            if cell.is_continuation() {
                continue;
            }

            let key = (cell.fg, cell.bg, cell.attrs);
            if last != Some(key) {
                queue!(stdout, ct_style::SetAttribute(ct_style::Attribute::Reset))?;
                queue!(stdout, ct_style::SetForegroundColor(to_color(cell.fg)))?;
                queue!(stdout, ct_style::SetBackgroundColor(bg_color(cell.bg)))?;
                for attr in attributes(cell.attrs) {
                    queue!(stdout, ct_style::SetAttribute(attr))?;
                }
                last = Some(key);
            }

            let ch = cell.content.as_char().unwrap_or(' ');
            queue!(stdout, ct_style::Print(ch))?;
        }
    }

    queue!(stdout, ct_style::ResetColor)?;
    stdout.flush()
}

fn to_color(color: PackedRgba) -> ct_style::Color {
    ct_style::Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    }
}

fn bg_color(color: PackedRgba) -> ct_style::Color {
    if color.is_transparent() {
        ct_style::Color::Reset
    } else {
        to_color(color)
    }
}

fn attributes(flags: StyleFlags) -> Vec<ct_style::Attribute> {
    let mut out = Vec::new();
    if flags.contains(StyleFlags::BOLD) {
        out.push(ct_style::Attribute::Bold);
    }
    if flags.contains(StyleFlags::DIM) {
        out.push(ct_style::Attribute::Dim);
    }
    if flags.contains(StyleFlags::ITALIC) {
        out.push(ct_style::Attribute::Italic);
    }
    if flags.contains(StyleFlags::UNDERLINE) {
        out.push(ct_style::Attribute::Underlined);
    }
    if flags.contains(StyleFlags::BLINK) {
        out.push(ct_style::Attribute::SlowBlink);
    }
    if flags.contains(StyleFlags::REVERSE) {
        out.push(ct_style::Attribute::Reverse);
    }
    if flags.contains(StyleFlags::STRIKETHROUGH) {
        out.push(ct_style::Attribute::CrossedOut);
    }
    out
}
