//! SoilScope - Plant Monitor Firmware
//!
//! Main firmware binary for an RP2040 plant monitor. A DHT climate probe
//! and a capacitive soil moisture probe are sampled by one task; the
//! readings are shown on an SSD1306 OLED by another.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Level, OutputOpenDrain, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::Delay;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use {defmt_rtt as _, panic_probe as _};

use soilscope_core::config::ClimateProbeKind;
use soilscope_core::sampling::Sampler;
use soilscope_drivers::display::TerminalPanel;
use soilscope_drivers::sensor::{CapacitiveProbe, Dht, DhtVariant};

use crate::board::RpAdc;

mod board;
mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SoilScope firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let station = config::station();
    info!(
        "Station config: sampling={}ms, rendering={}ms, channel={}",
        station.telemetry.sampling_period_ms,
        station.telemetry.render_period_ms,
        config::CHANNEL_CAPACITY
    );

    // Climate probe: open-drain data line on GPIO4
    let variant = match station.climate_probe {
        ClimateProbeKind::Dht11 => DhtVariant::Dht11,
        ClimateProbeKind::Dht22 => DhtVariant::Dht22,
    };
    let dht_pin = OutputOpenDrain::new(p.PIN_4, Level::High);
    let climate = Dht::new(dht_pin, Delay, variant);
    info!("Climate probe initialized ({})", variant);

    // Moisture probe: ADC0 on GPIO26
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let moisture_channel = adc::Channel::new_pin(p.PIN_26, Pull::None);
    let moisture = CapacitiveProbe::with_settle_reads(
        RpAdc::new(adc, moisture_channel),
        station.moisture.settle_reads,
    );
    info!("Moisture probe initialized");

    // Panel: SSD1306 on I2C0 (SDA GPIO16, SCL GPIO17)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = station.panel.i2c_frequency_hz;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c_config);
    let interface = I2CDisplayInterface::new_custom_address(i2c, station.panel.i2c_address);
    let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_terminal_mode();
    let mut panel = TerminalPanel::new(display);
    if let Err(e) = panel.init() {
        error!("Panel init failed: {}", e);
        defmt::panic!("No display at {=u8:#x}", station.panel.i2c_address);
    }
    info!("Panel initialized");

    let (publisher, consumer) = channels::init();
    let sampler = Sampler::new(climate, moisture);

    spawner
        .spawn(tasks::sampling_task(
            sampler,
            publisher,
            station.telemetry.sampling_period_ms,
        ))
        .unwrap();
    spawner
        .spawn(tasks::rendering_task(
            panel,
            consumer,
            station.telemetry.render_period_ms,
        ))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
