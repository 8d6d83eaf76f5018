//! Sampler implementation
//!
//! Owns both probes and the last-known values. A failed probe read never
//! fails the cycle: the previous value (or "missing" if there never was
//! one) is carried into the new reading instead.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::telemetry::{Publisher, Reading};
use crate::traits::{ClimateSample, ClimateSensor, MoistureSensor, SensorError};

/// Consecutive climate faults after which the caller should warn
pub const CLIMATE_FAULT_WARN_THRESHOLD: u32 = 5;

/// Result of publishing a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishStatus {
    /// Reading was queued for the renderer
    Published,
    /// Channel was full, reading discarded
    Dropped,
}

/// Outcome of one acquisition
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReport {
    /// Reading assembled this cycle
    pub reading: Reading,
    /// Climate probe error, if the read failed
    pub climate_fault: Option<SensorError>,
    /// Moisture probe error, if the read failed
    pub moisture_fault: Option<SensorError>,
}

/// Outcome of one full sampling cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// What was sampled
    pub sample: SampleReport,
    /// What happened when publishing it
    pub status: PublishStatus,
}

/// Sampling loop state
///
/// Generic over the probe drivers so the loop can be exercised on the host
/// with scripted sensors.
pub struct Sampler<C, S> {
    climate_sensor: C,
    moisture_sensor: S,
    /// Last successful climate measurement
    climate: Option<ClimateSample>,
    /// Last successful moisture value
    moisture: Option<u16>,
    published: u32,
    dropped: u32,
    climate_faults: u32,
}

impl<C, S> Sampler<C, S>
where
    C: ClimateSensor,
    S: MoistureSensor,
{
    /// Create a sampler with no known values yet
    pub fn new(climate_sensor: C, moisture_sensor: S) -> Self {
        Self {
            climate_sensor,
            moisture_sensor,
            climate: None,
            moisture: None,
            published: 0,
            dropped: 0,
            climate_faults: 0,
        }
    }

    /// Read both probes and assemble a reading
    pub fn sample(&mut self) -> SampleReport {
        let climate_fault = match self.climate_sensor.read_climate() {
            Ok(sample) => {
                self.climate = Some(sample);
                self.climate_faults = 0;
                None
            }
            Err(e) => {
                self.climate_faults = self.climate_faults.saturating_add(1);
                Some(e)
            }
        };

        let moisture_fault = match self.moisture_sensor.read_moisture() {
            Ok(raw) => {
                self.moisture = Some(raw);
                None
            }
            Err(e) => Some(e),
        };

        SampleReport {
            reading: Reading::new(self.climate, self.moisture),
            climate_fault,
            moisture_fault,
        }
    }

    /// Sample, then try to publish without blocking
    ///
    /// A full channel drops the reading; the renderer catches up with a
    /// later one.
    pub fn cycle<M: RawMutex, const N: usize>(
        &mut self,
        publisher: &Publisher<'_, M, N>,
    ) -> CycleReport {
        let sample = self.sample();

        let status = if publisher.try_publish(sample.reading) {
            self.published = self.published.wrapping_add(1);
            PublishStatus::Published
        } else {
            self.dropped = self.dropped.wrapping_add(1);
            PublishStatus::Dropped
        };

        CycleReport { sample, status }
    }

    /// Number of readings handed to the channel
    pub fn published_count(&self) -> u32 {
        self.published
    }

    /// Number of readings dropped on a full channel
    pub fn dropped_count(&self) -> u32 {
        self.dropped
    }

    /// Number of climate reads that failed in a row
    pub fn consecutive_climate_faults(&self) -> u32 {
        self.climate_faults
    }

    /// Check if the climate probe has been failing long enough to report
    pub fn climate_degraded(&self) -> bool {
        self.climate_faults >= CLIMATE_FAULT_WARN_THRESHOLD
    }

    /// Direct access to the climate probe driver
    pub fn climate_sensor_mut(&mut self) -> &mut C {
        &mut self.climate_sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::TelemetryChannel;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use std::collections::VecDeque;

    /// Climate probe that replays a script of results
    struct ScriptedClimate(VecDeque<Result<ClimateSample, SensorError>>);

    impl ClimateSensor for ScriptedClimate {
        fn read_climate(&mut self) -> Result<ClimateSample, SensorError> {
            self.0.pop_front().unwrap_or(Err(SensorError::NoResponse))
        }
    }

    /// Moisture probe that counts up from a base value
    struct CountingMoisture(u16);

    impl MoistureSensor for CountingMoisture {
        fn read_moisture(&mut self) -> Result<u16, SensorError> {
            let value = self.0;
            self.0 += 10;
            Ok(value)
        }
    }

    struct FailingMoisture;

    impl MoistureSensor for FailingMoisture {
        fn read_moisture(&mut self) -> Result<u16, SensorError> {
            Err(SensorError::ConversionError)
        }
    }

    /// Moisture probe that replays a script of results
    struct ScriptedMoisture(VecDeque<Result<u16, SensorError>>);

    impl MoistureSensor for ScriptedMoisture {
        fn read_moisture(&mut self) -> Result<u16, SensorError> {
            self.0.pop_front().unwrap_or(Err(SensorError::ConversionError))
        }
    }

    fn climate(t: f32, h: f32) -> ClimateSample {
        ClimateSample {
            temperature_c: t,
            humidity_pct: h,
        }
    }

    #[test]
    fn test_successful_sample() {
        let script = VecDeque::from([Ok(climate(20.4, 55.2))]);
        let mut sampler = Sampler::new(ScriptedClimate(script), CountingMoisture(300));

        let report = sampler.sample();
        assert_eq!(report.climate_fault, None);
        assert_eq!(report.moisture_fault, None);
        assert_eq!(report.reading.temperature(), Some(20.4));
        assert_eq!(report.reading.humidity(), Some(55.2));
        assert_eq!(report.reading.moisture(), Some(300));
    }

    #[test]
    fn test_first_climate_failure_publishes_sentinel() {
        let script = VecDeque::from([Err(SensorError::Timeout)]);
        let mut sampler = Sampler::new(ScriptedClimate(script), CountingMoisture(412));

        let report = sampler.sample();
        assert_eq!(report.climate_fault, Some(SensorError::Timeout));
        assert_eq!(report.reading.temperature_or_sentinel(), -1.0);
        assert_eq!(report.reading.humidity_or_sentinel(), -1.0);
        // Moisture still reflects the current ADC value
        assert_eq!(report.reading.moisture(), Some(412));
    }

    #[test]
    fn test_climate_failure_keeps_last_known() {
        let script = VecDeque::from([Ok(climate(18.0, 60.0)), Err(SensorError::Checksum)]);
        let mut sampler = Sampler::new(ScriptedClimate(script), CountingMoisture(100));

        sampler.sample();
        let report = sampler.sample();

        assert_eq!(report.climate_fault, Some(SensorError::Checksum));
        assert_eq!(report.reading.temperature(), Some(18.0));
        assert_eq!(report.reading.humidity(), Some(60.0));
        assert_eq!(report.reading.moisture(), Some(110));
    }

    #[test]
    fn test_moisture_failure_keeps_missing() {
        let script = VecDeque::from([Ok(climate(22.0, 40.0))]);
        let mut sampler = Sampler::new(ScriptedClimate(script), FailingMoisture);

        let report = sampler.sample();
        assert_eq!(report.moisture_fault, Some(SensorError::ConversionError));
        assert_eq!(report.reading.moisture(), None);
        assert_eq!(report.reading.temperature(), Some(22.0));
    }

    #[test]
    fn test_moisture_failure_keeps_last_known() {
        let climate_script = VecDeque::from([Ok(climate(22.0, 40.0)), Ok(climate(22.5, 41.0))]);
        let moisture_script = VecDeque::from([Ok(1875), Err(SensorError::ConversionError)]);
        let mut sampler = Sampler::new(
            ScriptedClimate(climate_script),
            ScriptedMoisture(moisture_script),
        );

        let first = sampler.sample();
        assert_eq!(first.reading.moisture(), Some(1875));

        let second = sampler.sample();
        assert_eq!(second.moisture_fault, Some(SensorError::ConversionError));
        assert_eq!(second.reading.moisture(), Some(1875));
        assert_eq!(second.reading.temperature(), Some(22.5));
    }

    #[test]
    fn test_climate_sensor_mut_reaches_driver() {
        let mut sampler = Sampler::new(ScriptedClimate(VecDeque::new()), CountingMoisture(0));
        sampler
            .climate_sensor_mut()
            .0
            .push_back(Ok(climate(19.0, 45.0)));

        let report = sampler.sample();
        assert_eq!(report.reading.temperature(), Some(19.0));
    }

    #[test]
    fn test_fault_counter_resets_on_success() {
        let script = VecDeque::from([
            Err(SensorError::Timeout),
            Err(SensorError::Timeout),
            Ok(climate(20.0, 50.0)),
        ]);
        let mut sampler = Sampler::new(ScriptedClimate(script), CountingMoisture(0));

        sampler.sample();
        sampler.sample();
        assert_eq!(sampler.consecutive_climate_faults(), 2);

        sampler.sample();
        assert_eq!(sampler.consecutive_climate_faults(), 0);
    }

    #[test]
    fn test_degraded_after_threshold() {
        // Empty script: every read fails
        let mut sampler = Sampler::new(ScriptedClimate(VecDeque::new()), CountingMoisture(0));

        for _ in 0..CLIMATE_FAULT_WARN_THRESHOLD - 1 {
            sampler.sample();
        }
        assert!(!sampler.climate_degraded());

        sampler.sample();
        assert!(sampler.climate_degraded());
    }

    #[test]
    fn test_cycle_drops_when_full() {
        let channel: TelemetryChannel<NoopRawMutex, 1> = TelemetryChannel::new();
        let publisher = channel.publisher();
        let script = VecDeque::from([Ok(climate(20.0, 50.0)), Ok(climate(21.0, 51.0))]);
        let mut sampler = Sampler::new(ScriptedClimate(script), CountingMoisture(300));

        let first = sampler.cycle(&publisher);
        let second = sampler.cycle(&publisher);

        assert_eq!(first.status, PublishStatus::Published);
        assert_eq!(second.status, PublishStatus::Dropped);
        assert_eq!(sampler.published_count(), 1);
        assert_eq!(sampler.dropped_count(), 1);

        // The queued reading is the first one, untouched
        assert_eq!(channel.try_consume(), Some(first.sample.reading));
        assert_eq!(channel.try_consume(), None);
    }
}
