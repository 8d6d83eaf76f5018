//! Board-agnostic core logic for the SoilScope plant monitor
//!
//! This crate contains the telemetry pipeline and everything it needs that
//! does not depend on a specific board:
//!
//! - Sensor and panel adapter traits
//! - `Reading` and the bounded telemetry channel between the two loops
//! - The sampling loop (sensor acquisition, drop-on-full publishing)
//! - The rendering loop (skip-on-empty consume, fixed-capacity text screen)
//! - Configuration type definitions
//!
//! Neither loop ever blocks the other: the sampler drops a reading when the
//! channel is full, and the renderer leaves the panel untouched when the
//! channel is empty.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod render;
pub mod sampling;
pub mod telemetry;
pub mod traits;
