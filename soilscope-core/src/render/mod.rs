//! Rendering loop
//!
//! Builds the text screen for a reading and pushes it to the panel.
//!
//! The panel is a 128x64 OLED driven with an 8x8 font, giving 8 rows of
//! 16 characters. Readings occupy rows 0, 2 and 4; every other row is
//! blank.

pub mod renderer;
pub mod screen;

pub use renderer::{RenderOutcome, Renderer};
pub use screen::{
    round_half_away, RenderError, Screen, HUMIDITY_ROW, MOISTURE_ROW, PANEL_COLS, PANEL_ROWS,
    TEMPERATURE_ROW,
};
