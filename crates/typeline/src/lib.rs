#![forbid(unsafe_code)]

//! typeline public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use typeline_core::buffer::Buffer;
pub use typeline_core::cell::{Cell, CellContent, PackedRgba};
pub use typeline_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use typeline_core::frame::Frame;
pub use typeline_core::geometry::Rect;
pub use typeline_core::style::{Style, StyleFlags};

// --- Runtime re-exports ----------------------------------------------------

pub use typeline_runtime::{Cmd, CmdRecord, Model, Program, ProgramSimulator};

// --- Widget re-exports -----------------------------------------------------

pub use typeline_widgets::rule::Rule;
pub use typeline_widgets::tagline::{
    CaretStyle, DEFAULT_LEAD_IN, Entry, Phase, Tagline, TaglineError, TaglineState,
    TaglineTimings, default_entries,
};
pub use typeline_widgets::{StatefulWidget, Widget};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for typeline apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Invalid tagline configuration.
    Tagline(TaglineError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Tagline(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TaglineError> for Error {
    fn from(err: TaglineError) -> Self {
        Self::Tagline(err)
    }
}

/// Standard result type for typeline APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cmd, Entry, Error, Event, Frame, KeyCode, KeyEvent, Model, Phase, Program, Rect, Result,
        StatefulWidget, Style, Tagline, TaglineState, Widget,
    };

    pub use crate::{core, runtime, widgets};
}

pub use typeline_core as core;
pub use typeline_runtime as runtime;
pub use typeline_widgets as widgets;
