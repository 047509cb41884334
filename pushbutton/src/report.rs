//! Text lines sent over the serial transport.
//!
//! Each [`Report`] renders into one fixed-capacity line. The exact text is
//! what the receiving gateway parses, so the formats below are frozen:
//!
//! ```text
//! Button: 3
//! Button_hold: 1
//! Button_hold_duration: 1520\r\n
//! Battery: 5.87\r\n
//! Temperature: 23.44\r\n
//! Orientation: 1\r\n
//! ```
//!
//! Click and hold counters go out without a line terminator, as they always
//! have on this device.

use core::fmt::{self, Write};

use heapless::String;

use crate::dice::Face;

/// Capacity of a rendered line in bytes.
pub const LINE_CAPACITY: usize = 48;

/// One rendered line.
pub type Line = String<LINE_CAPACITY>;

/// Something worth telling the gateway about.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Total number of clicks so far
    Button(u16),
    /// Total number of holds so far
    ButtonHold(u16),
    /// Length of the hold that just ended, in milliseconds
    ButtonHoldDuration(u32),
    /// Battery pack voltage in volts
    Battery(f32),
    /// Temperature in °C
    Temperature(f32),
    /// Newly confirmed orientation
    Orientation(Face),
}

impl Report {
    /// Renders the report as a line ready for the UART.
    ///
    /// Fails only if the text does not fit into [`LINE_CAPACITY`] bytes,
    /// which takes an absurd float value.
    pub fn to_line(&self) -> Result<Line, fmt::Error> {
        let mut line = Line::new();
        write!(&mut line, "{self}")?;
        Ok(line)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button(count) => write!(f, "Button: {count}"),
            Self::ButtonHold(count) => write!(f, "Button_hold: {count}"),
            Self::ButtonHoldDuration(ms) => write!(f, "Button_hold_duration: {ms}\r\n"),
            Self::Battery(volts) => write!(f, "Battery: {volts:.2}\r\n"),
            Self::Temperature(celsius) => write!(f, "Temperature: {celsius:.2}\r\n"),
            Self::Orientation(face) => write!(f, "Orientation: {}\r\n", face.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_formats() {
        assert_eq!(Report::Button(3).to_line().unwrap().as_str(), "Button: 3");
        assert_eq!(
            Report::ButtonHold(65535).to_line().unwrap().as_str(),
            "Button_hold: 65535"
        );
        assert_eq!(
            Report::ButtonHoldDuration(1520).to_line().unwrap().as_str(),
            "Button_hold_duration: 1520\r\n"
        );
        assert_eq!(
            Report::Battery(5.8749).to_line().unwrap().as_str(),
            "Battery: 5.87\r\n"
        );
        assert_eq!(
            Report::Temperature(-4.5).to_line().unwrap().as_str(),
            "Temperature: -4.50\r\n"
        );
        assert_eq!(
            Report::Orientation(Face::Bottom).to_line().unwrap().as_str(),
            "Orientation: 6\r\n"
        );
    }

    #[test]
    fn test_longest_integer_line_fits() {
        let line = Report::ButtonHoldDuration(u32::MAX).to_line().unwrap();
        assert_eq!(line.as_str(), "Button_hold_duration: 4294967295\r\n");
    }

    #[test]
    fn test_oversized_float_is_an_error() {
        assert!(Report::Temperature(1.0e35).to_line().is_err());
    }
}
