#![forbid(unsafe_code)]

//! Core primitives for typeline: geometry, input events, and the cell-grid
//! render surface widgets draw into.

pub mod buffer;
pub mod cell;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod style;

pub use buffer::Buffer;
pub use cell::{Cell, CellContent, PackedRgba};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use frame::Frame;
pub use geometry::Rect;
pub use style::{Style, StyleFlags};
