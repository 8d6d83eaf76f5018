//! Sampling loop
//!
//! Acquires one reading per cycle and publishes it without blocking.

pub mod sampler;

pub use sampler::{CycleReport, PublishStatus, SampleReport, Sampler, CLIMATE_FAULT_WARN_THRESHOLD};
