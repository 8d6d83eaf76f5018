//! Reading snapshot produced once per sampling cycle

use crate::traits::ClimateSample;

/// Value shown for a field that has never been read successfully
pub const SENTINEL: i32 = -1;

/// Temperature, humidity and moisture captured in one sampling cycle
///
/// Missing values are `None` rather than a magic number, so a genuine
/// -1°C reading stays distinguishable from "no data yet". The sentinel
/// only appears at the presentation boundary via the `*_or_sentinel`
/// accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    climate: Option<ClimateSample>,
    moisture: Option<u16>,
}

impl Default for Reading {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Reading {
    /// Reading with no valid field
    pub const EMPTY: Self = Self {
        climate: None,
        moisture: None,
    };

    /// Build a reading from one cycle's values
    pub const fn new(climate: Option<ClimateSample>, moisture: Option<u16>) -> Self {
        Self { climate, moisture }
    }

    /// Temperature in degrees Celsius, if the probe has ever answered
    pub fn temperature(&self) -> Option<f32> {
        self.climate.map(|c| c.temperature_c)
    }

    /// Relative humidity in percent, if the probe has ever answered
    pub fn humidity(&self) -> Option<f32> {
        self.climate.map(|c| c.humidity_pct)
    }

    /// Raw moisture in ADC units, if the probe has ever been read
    pub fn moisture(&self) -> Option<u16> {
        self.moisture
    }

    /// Temperature, or the sentinel if missing
    pub fn temperature_or_sentinel(&self) -> f32 {
        self.temperature().unwrap_or(SENTINEL as f32)
    }

    /// Humidity, or the sentinel if missing
    pub fn humidity_or_sentinel(&self) -> f32 {
        self.humidity().unwrap_or(SENTINEL as f32)
    }

    /// Moisture, or the sentinel if missing
    pub fn moisture_or_sentinel(&self) -> i32 {
        self.moisture.map(i32::from).unwrap_or(SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reading_uses_sentinel() {
        let reading = Reading::EMPTY;
        assert_eq!(reading.temperature(), None);
        assert_eq!(reading.temperature_or_sentinel(), -1.0);
        assert_eq!(reading.humidity_or_sentinel(), -1.0);
        assert_eq!(reading.moisture_or_sentinel(), -1);
    }

    #[test]
    fn test_negative_temperature_is_not_sentinel() {
        let climate = ClimateSample {
            temperature_c: -1.0,
            humidity_pct: 80.0,
        };
        let reading = Reading::new(Some(climate), Some(512));

        // A real -1°C must still count as valid
        assert_eq!(reading.temperature(), Some(-1.0));
        assert_eq!(reading.temperature_or_sentinel(), -1.0);
        assert_eq!(reading.humidity(), Some(80.0));
    }

    #[test]
    fn test_climate_fields_travel_together() {
        let reading = Reading::new(None, Some(300));
        assert_eq!(reading.temperature(), None);
        assert_eq!(reading.humidity(), None);
        assert_eq!(reading.moisture(), Some(300));
    }
}
