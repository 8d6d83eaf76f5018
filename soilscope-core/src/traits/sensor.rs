//! Climate probe and soil moisture sensor traits

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer the start request
    NoResponse,
    /// Sensor stopped toggling the line mid-frame
    Timeout,
    /// Frame received but checksum did not match
    Checksum,
    /// ADC conversion error
    ConversionError,
    /// Underlying pin or bus reported an error
    Bus,
}

/// One temperature/humidity measurement
///
/// Both values come from the same probe transaction, so they are always
/// valid or invalid together.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateSample {
    /// Air temperature in degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
}

/// Trait for combined temperature/humidity probes (DHT11, DHT22, ...)
pub trait ClimateSensor {
    /// Perform one measurement
    ///
    /// Takes `&mut self` because the probe owns its data line.
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError>;
}

/// Trait for soil moisture probes
pub trait MoistureSensor {
    /// Read the raw moisture value in ADC units
    ///
    /// No calibration is applied; the value is whatever the converter
    /// produced.
    fn read_moisture(&mut self) -> Result<u16, SensorError>;
}
