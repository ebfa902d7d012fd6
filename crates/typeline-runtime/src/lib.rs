#![forbid(unsafe_code)]

//! Elm-style runtime for typeline programs.
//!
//! A [`Model`] owns application state; the runtime delivers [`Event`]s as
//! messages, executes the [`Cmd`]s returned from `update`, and redraws via
//! `view`. Delayed work is expressed with [`Cmd::Tick`]: a one-shot
//! scheduled callback whose pending deadline is owned by the runtime and
//! replaced on every reschedule.
//!
//! [`Event`]: typeline_core::Event

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model, Program};
pub use simulator::{CmdRecord, ProgramSimulator};
