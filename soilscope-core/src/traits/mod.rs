//! Hardware abstraction traits
//!
//! These traits define the interface between the telemetry pipeline
//! and board-specific sensor and display implementations.

pub mod panel;
pub mod sensor;

pub use panel::{PanelError, TextPanel};
pub use sensor::{ClimateSample, ClimateSensor, MoistureSensor, SensorError};
