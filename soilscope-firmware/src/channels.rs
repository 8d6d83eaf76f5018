//! Inter-task communication
//!
//! One telemetry channel carries readings from the sampling task to the
//! rendering task. It is created once in `main`; each task owns one end.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;

use soilscope_core::telemetry::{Consumer, Publisher, TelemetryChannel};

use crate::config::CHANNEL_CAPACITY;

/// Sampling -> rendering readings
pub type StationChannel = TelemetryChannel<CriticalSectionRawMutex, CHANNEL_CAPACITY>;

/// Sampling task end
pub type StationPublisher = Publisher<'static, CriticalSectionRawMutex, CHANNEL_CAPACITY>;

/// Rendering task end
pub type StationConsumer = Consumer<'static, CriticalSectionRawMutex, CHANNEL_CAPACITY>;

static TELEMETRY: StaticCell<StationChannel> = StaticCell::new();

/// Create the channel and split it into its two ends
///
/// Panics if called twice.
pub fn init() -> (StationPublisher, StationConsumer) {
    let channel: &'static StationChannel = TELEMETRY.init(TelemetryChannel::new());
    (channel.publisher(), channel.consumer())
}
