//! Panel drivers

pub mod terminal;

pub use terminal::{pad_line, TerminalPanel};
