//! Station configuration
//!
//! Settings come from station.toml, validated and turned into constants by
//! build.rs. They are checked once more at startup so a bad value falls
//! back to the defaults instead of running the loops with it.

use defmt::*;

use soilscope_core::config::{
    ClimateProbeKind, MoistureConfig, PanelConfig, StationConfig, TelemetryConfig,
};

include!(concat!(env!("OUT_DIR"), "/station_config.rs"));

/// Station configuration to run with
pub fn station() -> StationConfig {
    match STATION.validate() {
        Ok(()) => STATION,
        Err(e) => {
            warn!("Invalid station config ({}), using defaults", e);
            StationConfig::default()
        }
    }
}
