//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in soilscope-core:
//!
//! - Climate probes (DHT11, DHT22) bit-banged over one GPIO
//! - Capacitive soil moisture probe on an ADC channel
//! - SSD1306 OLED as a 16x8 text panel

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod sensor;
