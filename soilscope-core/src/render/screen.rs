//! Screen buffer
//!
//! Fixed-capacity text lines reused every cycle, so formatting a reading
//! never allocates.

use core::fmt::Write;

use heapless::String;

use crate::telemetry::Reading;
use crate::traits::PanelError;

/// Number of text rows on the panel
pub const PANEL_ROWS: usize = 8;

/// Number of text columns on the panel
pub const PANEL_COLS: usize = 16;

/// Row showing the temperature
pub const TEMPERATURE_ROW: u8 = 0;

/// Row showing the raw moisture value
pub const MOISTURE_ROW: u8 = 2;

/// Row showing the humidity
pub const HUMIDITY_ROW: u8 = 4;

/// Errors that abort a single redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Formatted text did not fit in the row
    LineOverflow { row: u8 },
    /// Panel rejected a line
    Panel(PanelError),
}

impl From<PanelError> for RenderError {
    fn from(e: PanelError) -> Self {
        RenderError::Panel(e)
    }
}

/// Round to the nearest integer, halves away from zero
///
/// `2.5 -> 3`, `-2.5 -> -3`, `2.4 -> 2`. Out-of-range values saturate.
///
/// The offset is added in `f64`; in `f32` the sum `0.49999997 + 0.5`
/// rounds up to `1.0`.
pub fn round_half_away(value: f32) -> i32 {
    let v = value as f64;
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

/// Text screen for the monitor panel
pub struct Screen {
    lines: [String<PANEL_COLS>; PANEL_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Lay out a reading
    ///
    /// Every row is rewritten. On error the screen is left blank.
    pub fn compose(&mut self, reading: &Reading) -> Result<(), RenderError> {
        self.clear();
        let result = self.layout(reading);
        if result.is_err() {
            self.clear();
        }
        result
    }

    fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    fn layout(&mut self, reading: &Reading) -> Result<(), RenderError> {
        let temperature = round_half_away(reading.temperature_or_sentinel());
        let humidity = round_half_away(reading.humidity_or_sentinel());
        let moisture = reading.moisture_or_sentinel();

        self.write_row(TEMPERATURE_ROW, format_args!("Temp:   {}C", temperature))?;
        self.write_row(MOISTURE_ROW, format_args!("Moisture:   {}", moisture))?;
        self.write_row(HUMIDITY_ROW, format_args!("Humidity: {}%", humidity))?;

        Ok(())
    }

    fn write_row(&mut self, row: u8, args: core::fmt::Arguments<'_>) -> Result<(), RenderError> {
        self.lines[row as usize]
            .write_fmt(args)
            .map_err(|_| RenderError::LineOverflow { row })
    }

    /// Get the content of a row (empty for blank or out-of-range rows)
    pub fn line(&self, row: u8) -> &str {
        self.lines
            .get(row as usize)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Iterate over `(row, text)` for every row
    pub fn rows(&self) -> impl Iterator<Item = (u8, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(row, line)| (row as u8, line.as_str()))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
