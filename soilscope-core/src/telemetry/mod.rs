//! Telemetry values and the channel that carries them
//!
//! The sampling loop is the only writer and the rendering loop the only
//! reader. Readings are copied in and out, never shared.

pub mod channel;
pub mod reading;

pub use channel::{Consumer, Publisher, TelemetryChannel};
pub use reading::{Reading, SENTINEL};
