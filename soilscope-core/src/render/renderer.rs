//! Renderer implementation
//!
//! One cycle = one non-blocking consume. An empty channel leaves the panel
//! exactly as it is, so the display keeps showing the last reading that
//! rendered successfully.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::screen::{RenderError, Screen};
use crate::telemetry::{Consumer, Reading};
use crate::traits::TextPanel;

/// Outcome of one rendering cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// Nothing pending, panel untouched
    Idle,
    /// Reading drawn on every row
    Drawn(Reading),
    /// Reading consumed but the redraw was abandoned
    Skipped(RenderError),
}

/// Rendering loop state
pub struct Renderer {
    screen: Screen,
    last_drawn: Option<Reading>,
    frames: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer that has not drawn anything yet
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
            last_drawn: None,
            frames: 0,
        }
    }

    /// Consume at most one reading and draw it
    pub fn cycle<M, const N: usize, P>(
        &mut self,
        consumer: &Consumer<'_, M, N>,
        panel: &mut P,
    ) -> RenderOutcome
    where
        M: RawMutex,
        P: TextPanel,
    {
        match consumer.try_consume() {
            Some(reading) => self.render(&reading, panel),
            None => RenderOutcome::Idle,
        }
    }

    /// Draw a reading on the panel
    ///
    /// The screen is composed completely before the first panel write, so
    /// a formatting error never leaves a half-updated panel.
    pub fn render<P: TextPanel>(&mut self, reading: &Reading, panel: &mut P) -> RenderOutcome {
        if let Err(e) = self.screen.compose(reading) {
            return RenderOutcome::Skipped(e);
        }

        if let Err(e) = self.flush(panel) {
            return RenderOutcome::Skipped(e);
        }

        self.last_drawn = Some(*reading);
        self.frames = self.frames.wrapping_add(1);
        RenderOutcome::Drawn(*reading)
    }

    fn flush<P: TextPanel>(&self, panel: &mut P) -> Result<(), RenderError> {
        for (row, text) in self.screen.rows() {
            panel.display_line(row, text)?;
        }
        Ok(())
    }

    /// Last reading that reached the panel
    pub fn last_drawn(&self) -> Option<Reading> {
        self.last_drawn
    }

    /// Number of completed redraws
    pub fn frame_count(&self) -> u32 {
        self.frames
    }
}
