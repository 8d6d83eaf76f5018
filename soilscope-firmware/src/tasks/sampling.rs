//! Sampling task
//!
//! Reads the climate and moisture probes every period and publishes the
//! result without waiting for the renderer. The DHT start pulse is timed
//! with an async timer so the executor keeps running the renderer.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use soilscope_core::sampling::{PublishStatus, Sampler, CLIMATE_FAULT_WARN_THRESHOLD};

use crate::board::{ClimateProbe, MoistureProbe};
use crate::channels::StationPublisher;

#[embassy_executor::task]
pub async fn sampling_task(
    mut sampler: Sampler<ClimateProbe, MoistureProbe>,
    publisher: StationPublisher,
    period_ms: u32,
) {
    info!("Sampling task started ({}ms period)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));

    loop {
        let probe = sampler.climate_sensor_mut();
        let start_pulse_ms = probe.variant().start_pulse_ms();
        match probe.begin() {
            Ok(()) => Timer::after_millis(start_pulse_ms as u64).await,
            Err(e) => warn!("Climate probe start failed: {}", e),
        }

        let was_degraded = sampler.climate_degraded();
        let report = sampler.cycle(&publisher);

        if let Some(e) = report.sample.climate_fault {
            warn!("Climate probe read failed: {}", e);
            if sampler.consecutive_climate_faults() == CLIMATE_FAULT_WARN_THRESHOLD {
                warn!(
                    "Climate probe failed {} reads in a row, showing last known values",
                    CLIMATE_FAULT_WARN_THRESHOLD
                );
            }
        } else if was_degraded {
            info!("Climate probe recovered");
        }

        if let Some(e) = report.sample.moisture_fault {
            warn!("Moisture probe read failed: {}", e);
        }

        match report.status {
            PublishStatus::Published => {
                info!(
                    "Sample #{}: {}",
                    sampler.published_count(),
                    report.sample.reading
                );
            }
            PublishStatus::Dropped => {
                trace!(
                    "Channel full, reading dropped ({} total)",
                    sampler.dropped_count()
                );
            }
        }

        ticker.next().await;
    }
}
