//! Configuration types
//!
//! Board-agnostic configuration structures for the station.

pub mod types;

pub use types::*;
