//! Rendering task
//!
//! Takes at most one reading per period and redraws the panel with it.
//! With nothing queued the panel keeps its current contents.

use defmt::*;
use embassy_time::{Duration, Ticker};

use soilscope_core::render::{RenderOutcome, Renderer};

use crate::board::Panel;
use crate::channels::StationConsumer;

#[embassy_executor::task]
pub async fn rendering_task(mut panel: Panel, consumer: StationConsumer, period_ms: u32) {
    info!("Rendering task started ({}ms period)", period_ms);

    let mut renderer = Renderer::new();
    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));

    loop {
        match renderer.cycle(&consumer, &mut panel) {
            RenderOutcome::Drawn(reading) => {
                info!("Frame {}: {}", renderer.frame_count(), reading);
            }
            RenderOutcome::Skipped(e) => {
                warn!(
                    "Redraw skipped: {}, panel still shows {}",
                    e,
                    renderer.last_drawn()
                );
            }
            RenderOutcome::Idle => {
                trace!("No new reading");
            }
        }

        ticker.next().await;
    }
}
