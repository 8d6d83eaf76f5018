//! Text panel trait for the monitor display

/// Errors that can occur while writing to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Communication error with the panel controller
    Communication,
    /// Row outside the panel
    InvalidRow,
}

/// Trait for fixed-width text panels
///
/// The panel is addressed by row only; each call replaces the whole row,
/// so implementations pad `text` to the panel width.
pub trait TextPanel {
    /// Write one line of text
    ///
    /// - `row`: Row number (0-7 on a 128x64 panel with an 8x8 font)
    /// - `text`: ASCII text, at most one panel width
    fn display_line(&mut self, row: u8, text: &str) -> Result<(), PanelError>;
}
