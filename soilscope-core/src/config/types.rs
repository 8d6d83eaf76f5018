//! Configuration type definitions
//!
//! The firmware fills these from `station.toml` at build time. Values are
//! checked again at startup with [`StationConfig::validate`].

/// Default number of in-flight readings between the two loops
pub const DEFAULT_CHANNEL_CAPACITY: usize = 10;

/// Largest channel capacity accepted from the station config
pub const MAX_CHANNEL_CAPACITY: usize = 64;

/// Shortest allowed loop period (ms)
pub const MIN_PERIOD_MS: u32 = 100;

/// Longest allowed loop period (ms)
pub const MAX_PERIOD_MS: u32 = 60_000;

/// Most discarded ADC reads allowed before the reported one
pub const MAX_SETTLE_READS: u8 = 8;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sampling period outside MIN_PERIOD_MS..=MAX_PERIOD_MS
    SamplingPeriod(u32),
    /// Rendering period outside MIN_PERIOD_MS..=MAX_PERIOD_MS
    RenderPeriod(u32),
    /// Panel address is not a 7-bit I2C address
    PanelAddress(u8),
    /// Too many settle reads
    SettleReads(u8),
}

/// Climate probe model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClimateProbeKind {
    /// DHT11: 1°C / 1% resolution, 0-50°C
    #[default]
    Dht11,
    /// DHT22 / AM2302: 0.1 resolution, signed temperature
    Dht22,
}

/// Cadence of the two loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryConfig {
    /// Time between sampling cycles (ms)
    pub sampling_period_ms: u32,
    /// Time between rendering cycles (ms)
    pub render_period_ms: u32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TelemetryConfig {
    /// Both loops at 500 ms
    pub const DEFAULT: Self = Self {
        sampling_period_ms: 500,
        render_period_ms: 500,
    };

    /// Check both periods are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !period_in_range(self.sampling_period_ms) {
            return Err(ConfigError::SamplingPeriod(self.sampling_period_ms));
        }
        if !period_in_range(self.render_period_ms) {
            return Err(ConfigError::RenderPeriod(self.render_period_ms));
        }
        Ok(())
    }
}

fn period_in_range(period_ms: u32) -> bool {
    (MIN_PERIOD_MS..=MAX_PERIOD_MS).contains(&period_ms)
}

/// OLED panel bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// 7-bit I2C address (0x3C or 0x3D on most SSD1306 boards)
    pub i2c_address: u8,
    /// I2C clock (Hz)
    pub i2c_frequency_hz: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PanelConfig {
    pub const DEFAULT: Self = Self {
        i2c_address: 0x3C,
        i2c_frequency_hz: 400_000,
    };
}

/// Soil moisture probe settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoistureConfig {
    /// ADC reads discarded before the reported one
    pub settle_reads: u8,
}

/// Complete station configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StationConfig {
    pub telemetry: TelemetryConfig,
    pub panel: PanelConfig,
    pub moisture: MoistureConfig,
    pub climate_probe: ClimateProbeKind,
}

impl StationConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.telemetry.validate()?;

        if self.panel.i2c_address > 0x7F {
            return Err(ConfigError::PanelAddress(self.panel.i2c_address));
        }

        if self.moisture.settle_reads > MAX_SETTLE_READS {
            return Err(ConfigError::SettleReads(self.moisture.settle_reads));
        }

        Ok(())
    }
}
