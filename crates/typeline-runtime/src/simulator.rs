#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] without a real terminal, on a virtual
//! clock. Events can be injected, messages sent directly, simulated time
//! advanced (firing scheduled ticks at their exact deadlines), and frames
//! captured for snapshot assertions.
//!
//! # Example
//!
//! ```ignore
//! let mut sim = ProgramSimulator::new(Blink { on: false });
//! sim.init();
//! sim.advance(Duration::from_millis(500)); // fires the scheduled tick
//! assert!(sim.model().on);
//! ```

use crate::program::{Cmd, Model};
use std::time::Duration;
use typeline_core::buffer::Buffer;
use typeline_core::event::Event;
use typeline_core::frame::Frame;

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message sent to the model (payload not stored, just noted).
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// One-shot tick scheduled with this delay.
    Tick(Duration),
}

/// Deterministic simulator for [`Model`] testing.
///
/// Mirrors the terminal runtime's scheduling semantics exactly: a single
/// owned pending-tick deadline, replaced on every [`Cmd::Tick`], consumed
/// when it fires, and cleared by [`Cmd::Quit`].
pub struct ProgramSimulator<M: Model> {
    /// The application model.
    model: M,
    /// Virtual clock, starting at zero.
    now: Duration,
    /// Deadline of the single pending tick, on the virtual clock.
    pending_tick: Option<Duration>,
    /// Captured frame buffers.
    frames: Vec<Buffer>,
    /// Record of all executed commands.
    command_log: Vec<CmdRecord>,
    /// Whether the simulated program is still running.
    running: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            now: Duration::ZERO,
            pending_tick: None,
            frames: Vec::new(),
            command_log: Vec::new(),
            running: true,
        }
    }

    /// Initialize the model by calling `Model::init()` and executing the
    /// returned command.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Send a specific message to the model.
    ///
    /// Ignored after the program has quit.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Inject a runtime event into the model.
    pub fn inject_event(&mut self, event: Event) {
        self.send(M::Message::from(event));
    }

    /// Inject a sequence of runtime events into the model.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            self.inject_event(event.clone());
        }
    }

    /// Advance the virtual clock by `dt`, firing scheduled ticks.
    ///
    /// Ticks fire at their exact deadlines: the clock jumps to each due
    /// deadline in turn, the tick handle is consumed, and `Event::Tick` is
    /// dispatched, so a chain of reschedules plays out deterministically
    /// within a single `advance` call. After quit, remaining time passes
    /// without any dispatch.
    pub fn advance(&mut self, dt: Duration) {
        let target = self.now + dt;
        while self.running {
            match self.pending_tick {
                Some(deadline) if deadline <= target => {
                    self.now = deadline;
                    self.pending_tick = None;
                    let cmd = self.model.update(M::Message::from(Event::Tick));
                    self.execute_cmd(cmd);
                }
                _ => break,
            }
        }
        self.now = target;
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live scheduled callbacks (0 or 1 by construction).
    pub fn pending_timers(&self) -> usize {
        usize::from(self.pending_tick.is_some())
    }

    /// Remaining delay until the pending tick, if one is scheduled.
    pub fn pending_tick_in(&self) -> Option<Duration> {
        self.pending_tick
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    /// Capture the current frame at the given dimensions.
    ///
    /// Calls `Model::view()` into a fresh buffer and stores the result.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame.buffer);
        self.frames.last().expect("frame just pushed")
    }

    /// Get all captured frame buffers.
    pub fn frames(&self) -> &[Buffer] {
        &self.frames
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Check if the simulated program is still running.
    ///
    /// Returns `false` after a `Cmd::Quit` has been executed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    /// Execute a command without IO.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                // Teardown cancels the pending callback; nothing may fire
                // after this point.
                self.pending_tick = None;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(delay) => {
                // Replace, don't accumulate: the previous pending tick (if
                // any) is forgotten, never left to fire alongside this one.
                self.pending_tick = Some(self.now + delay);
                self.command_log.push(CmdRecord::Tick(delay));
            }
        }
    }
}
