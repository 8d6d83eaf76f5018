//! Board wiring for a Raspberry Pi Pico
//!
//! | Signal            | Pin    |
//! |-------------------|--------|
//! | DHT data          | GPIO4  |
//! | Moisture probe    | GPIO26 (ADC0) |
//! | OLED SDA (I2C0)   | GPIO16 |
//! | OLED SCL (I2C0)   | GPIO17 |
//!
//! The DHT line needs a pull-up; most breakout boards carry one.

use embassy_rp::adc::{self, Adc, Blocking};
use embassy_rp::gpio::OutputOpenDrain;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use ssd1306::prelude::I2CInterface;

use soilscope_core::traits::SensorError;
use soilscope_drivers::display::TerminalPanel;
use soilscope_drivers::sensor::{AdcReader, CapacitiveProbe, Dht};

/// Climate probe on the DHT data pin
pub type ClimateProbe = Dht<OutputOpenDrain<'static>, Delay>;

/// Capacitive probe on ADC0
pub type MoistureProbe = CapacitiveProbe<RpAdc>;

/// SSD1306 on I2C0
pub type Panel = TerminalPanel<I2CInterface<I2c<'static, I2C0, i2c::Blocking>>>;

/// One-shot reads of a single ADC channel
pub struct RpAdc {
    adc: Adc<'static, Blocking>,
    channel: adc::Channel<'static>,
}

impl RpAdc {
    pub fn new(adc: Adc<'static, Blocking>, channel: adc::Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for RpAdc {
    fn read(&mut self) -> Result<u16, SensorError> {
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SensorError::ConversionError)
    }
}
