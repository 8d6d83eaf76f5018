//! SSD1306 128x64 OLED in character mode
//!
//! The controller's terminal mode draws a built-in 8x8 font, giving
//! 16 columns by 8 rows. Each row write pads to the full width so stale
//! characters from a longer previous line are overwritten.

use core::fmt::Write;

use display_interface::WriteOnlyDataCommand;
use heapless::String;
use ssd1306::mode::{DisplayConfig, TerminalMode};
use ssd1306::size::DisplaySize128x64;
use ssd1306::Ssd1306;

use soilscope_core::render::{PANEL_COLS, PANEL_ROWS};
use soilscope_core::traits::{PanelError, TextPanel};

/// Pad (or truncate) `text` to exactly one panel width
pub fn pad_line(text: &str) -> String<PANEL_COLS> {
    let mut line = String::new();
    for c in text.chars().take(PANEL_COLS) {
        // Font only covers ASCII
        let c = if c.is_ascii() { c } else { '?' };
        let _ = line.push(c);
    }
    while line.len() < PANEL_COLS {
        let _ = line.push(' ');
    }
    line
}

/// SSD1306 text panel
pub struct TerminalPanel<DI> {
    display: Ssd1306<DI, DisplaySize128x64, TerminalMode>,
}

impl<DI: WriteOnlyDataCommand> TerminalPanel<DI> {
    pub fn new(display: Ssd1306<DI, DisplaySize128x64, TerminalMode>) -> Self {
        Self { display }
    }

    /// Initialize the controller and blank the screen
    pub fn init(&mut self) -> Result<(), PanelError> {
        self.display.init().map_err(|_| PanelError::Communication)?;
        self.display.clear().map_err(|_| PanelError::Communication)
    }
}

impl<DI: WriteOnlyDataCommand> TextPanel for TerminalPanel<DI> {
    fn display_line(&mut self, row: u8, text: &str) -> Result<(), PanelError> {
        if row as usize >= PANEL_ROWS {
            return Err(PanelError::InvalidRow);
        }

        self.display
            .set_position(0, row)
            .map_err(|_| PanelError::Communication)?;
        self.display
            .write_str(&pad_line(text))
            .map_err(|_| PanelError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use display_interface::{DataFormat, DisplayError};
    use ssd1306::rotation::DisplayRotation;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct BusLog {
        commands: usize,
        data: usize,
        fail: bool,
    }

    /// Display interface that counts bytes instead of driving a bus
    struct LoggingInterface(Rc<RefCell<BusLog>>);

    fn byte_count(format: &DataFormat<'_>) -> usize {
        match format {
            DataFormat::U8(bytes) => bytes.len(),
            _ => 1,
        }
    }

    impl WriteOnlyDataCommand for LoggingInterface {
        fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
            let mut log = self.0.borrow_mut();
            if log.fail {
                return Err(DisplayError::BusWriteError);
            }
            log.commands += byte_count(&cmd);
            Ok(())
        }

        fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
            let mut log = self.0.borrow_mut();
            if log.fail {
                return Err(DisplayError::BusWriteError);
            }
            log.data += byte_count(&buf);
            Ok(())
        }
    }

    fn panel(log: &Rc<RefCell<BusLog>>) -> TerminalPanel<LoggingInterface> {
        let display = Ssd1306::new(
            LoggingInterface(log.clone()),
            DisplaySize128x64,
            DisplayRotation::Rotate0,
        )
        .into_terminal_mode();
        TerminalPanel::new(display)
    }

    #[test]
    fn test_init_and_write_line() {
        let log = Rc::new(RefCell::new(BusLog::default()));
        let mut panel = panel(&log);

        panel.init().unwrap();
        assert!(log.borrow().commands > 0);

        let data_before = log.borrow().data;
        panel.display_line(2, "Moisture:   300").unwrap();
        assert!(log.borrow().data > data_before);
    }

    #[test]
    fn test_row_out_of_range_writes_nothing() {
        let log = Rc::new(RefCell::new(BusLog::default()));
        let mut panel = panel(&log);
        panel.init().unwrap();

        let commands = log.borrow().commands;
        let data = log.borrow().data;
        assert_eq!(
            panel.display_line(PANEL_ROWS as u8, "x"),
            Err(PanelError::InvalidRow)
        );
        assert_eq!(log.borrow().commands, commands);
        assert_eq!(log.borrow().data, data);
    }

    #[test]
    fn test_bus_failure_is_communication_error() {
        let log = Rc::new(RefCell::new(BusLog {
            fail: true,
            ..Default::default()
        }));
        let mut panel = panel(&log);
        assert_eq!(panel.init(), Err(PanelError::Communication));
    }

    #[test]
    fn test_pad_short_line() {
        let line = pad_line("Temp:   21C");
        assert_eq!(line.len(), PANEL_COLS);
        assert_eq!(line.as_str(), "Temp:   21C     ");
    }

    #[test]
    fn test_pad_blank_line() {
        assert_eq!(pad_line("").as_str(), "                ");
    }

    #[test]
    fn test_pad_exact_width() {
        assert_eq!(pad_line("Moisture:   4095").as_str(), "Moisture:   4095");
    }

    #[test]
    fn test_pad_truncates_long_line() {
        assert_eq!(pad_line("Humidity: 1000000%").as_str(), "Humidity: 100000");
    }

    #[test]
    fn test_pad_replaces_non_ascii() {
        assert_eq!(pad_line("21\u{b0}C").as_str(), "21?C            ");
    }
}
