//! Embassy async tasks
//!
//! The two loops run independently and meet only at the telemetry channel.

pub mod rendering;
pub mod sampling;

pub use rendering::rendering_task;
pub use sampling::sampling_task;
