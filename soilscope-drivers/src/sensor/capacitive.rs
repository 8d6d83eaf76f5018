//! Capacitive soil moisture probe
//!
//! The probe outputs an analog voltage that falls as the soil gets wetter.
//! We report the raw ADC value; no calibration is applied.

use soilscope_core::traits::{MoistureSensor, SensorError};

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read one conversion (12-bit on RP2040, 0-4095)
    fn read(&mut self) -> Result<u16, SensorError>;
}

/// Capacitive moisture probe (v1.2 style)
///
/// Optionally discards a few conversions before the reported one to let the
/// sample-and-hold settle after the channel is selected.
pub struct CapacitiveProbe<ADC> {
    adc: ADC,
    settle_reads: u8,
}

impl<ADC: AdcReader> CapacitiveProbe<ADC> {
    /// Create a probe that reports the first conversion
    pub fn new(adc: ADC) -> Self {
        Self::with_settle_reads(adc, 0)
    }

    /// Create a probe that discards `settle_reads` conversions first
    pub fn with_settle_reads(adc: ADC, settle_reads: u8) -> Self {
        Self { adc, settle_reads }
    }
}

impl<ADC: AdcReader> MoistureSensor for CapacitiveProbe<ADC> {
    fn read_moisture(&mut self) -> Result<u16, SensorError> {
        for _ in 0..self.settle_reads {
            self.adc.read()?;
        }
        self.adc.read()
    }
}
