//! DHT11 / DHT22 single-wire climate probe
//!
//! The probe shares one open-drain line with the host. A read is:
//!
//! 1. Host pulls the line low (18ms for DHT11, 1ms for DHT22), then releases
//! 2. Probe answers low ~80us, high ~80us
//! 3. Probe sends 40 bits, each a ~50us low followed by a high pulse
//!    of ~26us (bit 0) or ~70us (bit 1)
//!
//! The 40 bits are humidity (2 bytes), temperature (2 bytes), checksum.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use soilscope_core::traits::{ClimateSample, ClimateSensor, SensorError};

/// Upper bound for any single level while waiting on the probe
const LEVEL_TIMEOUT_US: u32 = 100;

/// Sample point after a data bit's rising edge
const BIT_SAMPLE_DELAY_US: u32 = 35;

const FRAME_LEN: usize = 5;

/// Probe variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DhtVariant {
    #[default]
    Dht11,
    Dht22,
}

impl DhtVariant {
    /// Length of the host start pulse
    pub const fn start_pulse_ms(&self) -> u32 {
        match self {
            DhtVariant::Dht11 => 18,
            DhtVariant::Dht22 => 1,
        }
    }
}

/// DHT read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DhtError {
    /// Probe did not answer the start pulse
    NoResponse,
    /// A data bit never arrived
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// GPIO error
    Bus,
}

impl From<DhtError> for SensorError {
    fn from(err: DhtError) -> Self {
        match err {
            DhtError::NoResponse => SensorError::NoResponse,
            DhtError::Timeout => SensorError::Timeout,
            DhtError::Checksum => SensorError::Checksum,
            DhtError::Bus => SensorError::Bus,
        }
    }
}

/// Decode a raw 5-byte frame
pub fn decode_frame(
    frame: [u8; FRAME_LEN],
    variant: DhtVariant,
) -> Result<ClimateSample, DhtError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(DhtError::Checksum);
    }

    let (humidity_pct, temperature_c) = match variant {
        DhtVariant::Dht11 => {
            // Integral + tenths; bit 7 of the temperature decimal is the sign
            let humidity = frame[0] as f32 + frame[1] as f32 * 0.1;
            let magnitude = frame[2] as f32 + (frame[3] & 0x7F) as f32 * 0.1;
            let temperature = if frame[3] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            (humidity, temperature)
        }
        DhtVariant::Dht22 => {
            // Big-endian tenths; bit 15 of the temperature is the sign
            let humidity = u16::from_be_bytes([frame[0], frame[1]]) as f32 / 10.0;
            let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]) as f32 / 10.0;
            let temperature = if frame[2] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            (humidity, temperature)
        }
    };

    Ok(ClimateSample {
        temperature_c,
        humidity_pct,
    })
}

/// Bit-banged DHT driver
///
/// `P` must be an open-drain pin with a pull-up: `set_high` releases the
/// line and `is_high` reads it back.
pub struct Dht<P, D> {
    pin: P,
    delay: D,
    variant: DhtVariant,
    /// Start pulse already issued through `begin`
    started: bool,
}

impl<P, D> Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a driver
    ///
    /// The line must start released (high).
    pub fn new(pin: P, delay: D, variant: DhtVariant) -> Self {
        Self {
            pin,
            delay,
            variant,
            started: false,
        }
    }

    /// Probe variant
    pub fn variant(&self) -> DhtVariant {
        self.variant
    }

    /// Pull the line low to start a transaction
    ///
    /// The caller then waits at least `variant().start_pulse_ms()`, e.g. with
    /// an async timer, and the next `read_frame` skips its blocking start
    /// pulse.
    pub fn begin(&mut self) -> Result<(), DhtError> {
        self.pin.set_low().map_err(|_| DhtError::Bus)?;
        self.started = true;
        Ok(())
    }

    /// Run one transaction and return the raw frame
    pub fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], DhtError> {
        // Start signal, unless `begin` already pulled the line low
        if !core::mem::take(&mut self.started) {
            self.pin.set_low().map_err(|_| DhtError::Bus)?;
            self.delay.delay_ms(self.variant.start_pulse_ms());
        }
        self.pin.set_high().map_err(|_| DhtError::Bus)?;

        // Response: high (host release) -> low -> high -> low (first bit)
        self.wait_for(false).map_err(|_| DhtError::NoResponse)?;
        self.wait_for(true).map_err(|_| DhtError::NoResponse)?;
        self.wait_for(false).map_err(|_| DhtError::NoResponse)?;

        let mut frame = [0u8; FRAME_LEN];
        for byte in frame.iter_mut() {
            for _ in 0..8 {
                self.wait_for(true)?;
                self.delay.delay_us(BIT_SAMPLE_DELAY_US);
                let bit = self.pin.is_high().map_err(|_| DhtError::Bus)?;
                *byte = (*byte << 1) | bit as u8;
                if bit {
                    self.wait_for(false)?;
                }
            }
        }

        Ok(frame)
    }

    /// Busy-wait until the line reaches `high`, in 1us steps
    fn wait_for(&mut self, high: bool) -> Result<(), DhtError> {
        for _ in 0..LEVEL_TIMEOUT_US {
            if self.pin.is_high().map_err(|_| DhtError::Bus)? == high {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(DhtError::Timeout)
    }
}

impl<P, D> ClimateSensor for Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError> {
        let frame = self.read_frame()?;
        Ok(decode_frame(frame, self.variant)?)
    }
}
