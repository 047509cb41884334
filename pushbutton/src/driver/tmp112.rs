//! TMP112 digital thermometer.
//!
//! The sensor sits in shutdown mode and is woken for one-shot conversions,
//! which keeps its supply current in the sub-microamp range between reads.
//!
//! # Measurement Sequence
//!
//! 1. [`Tmp112::start_conversion`] - triggers a one-shot conversion
//! 2. wait [`CONVERSION_TIME`]
//! 3. [`Tmp112::read_celsius`] - reads the result

use embassy_time::Duration;
use embedded_hal::i2c::I2c;

use super::Error;

/// Worst-case one-shot conversion time.
pub const CONVERSION_TIME: Duration = Duration::from_millis(35);

const TEMPERATURE: u8 = 0x00;
const CONFIGURATION: u8 = 0x01;

/// Configuration byte 1: shutdown mode (resolution bits read as 1).
const CONFIG_SHUTDOWN: u8 = 0x61;
/// Configuration byte 1: shutdown mode plus one-shot trigger.
const CONFIG_ONE_SHOT: u8 = 0xE1;
/// Configuration byte 2: power-on default (4 Hz, normal mode).
const CONFIG_BYTE2: u8 = 0xA0;

const CELSIUS_PER_DIGIT: f32 = 0.0625;

pub struct Tmp112<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Tmp112<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Puts the sensor into shutdown mode.
    pub fn init(&mut self) -> Result<(), Error<I::Error>> {
        self.write_configuration(CONFIG_SHUTDOWN)
    }

    /// Triggers one conversion; the sensor returns to shutdown afterwards.
    pub fn start_conversion(&mut self) -> Result<(), Error<I::Error>> {
        self.write_configuration(CONFIG_ONE_SHOT)
    }

    /// Reads the last converted temperature.
    pub fn read_celsius(&mut self) -> Result<f32, Error<I::Error>> {
        let mut raw = [0u8; 2];
        self.i2c.write_read(self.address, &[TEMPERATURE], &mut raw)?;

        // 12-bit two's complement, left-justified
        let counts = i16::from_be_bytes(raw) >> 4;
        let celsius = f32::from(counts) * CELSIUS_PER_DIGIT;

        #[cfg(feature = "defmt")]
        defmt::trace!("TMP112: {} C", celsius);

        Ok(celsius)
    }

    pub fn release(self) -> I {
        self.i2c
    }

    fn write_configuration(&mut self, byte1: u8) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(self.address, &[CONFIGURATION, byte1, CONFIG_BYTE2])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::FakeBus;

    const ADDRESS: u8 = 0x49;

    #[test]
    fn test_one_shot_sequence() {
        let bus = FakeBus::with_responses(&[&[0x19, 0x00]]);
        let mut sensor = Tmp112::new(bus, ADDRESS);
        sensor.init().unwrap();
        sensor.start_conversion().unwrap();
        assert_eq!(sensor.read_celsius().unwrap(), 25.0);

        assert_eq!(
            sensor.release().writes,
            [
                (ADDRESS, vec![0x01, 0x61, 0xA0]),
                (ADDRESS, vec![0x01, 0xE1, 0xA0]),
                (ADDRESS, vec![0x00]),
            ]
        );
    }

    #[test]
    fn test_negative_and_fractional_values() {
        let bus = FakeBus::with_responses(&[&[0xE7, 0x00], &[0x00, 0x10], &[0xFF, 0xF0]]);
        let mut sensor = Tmp112::new(bus, ADDRESS);
        assert_eq!(sensor.read_celsius().unwrap(), -25.0);
        assert_eq!(sensor.read_celsius().unwrap(), 0.0625);
        assert_eq!(sensor.read_celsius().unwrap(), -0.0625);
    }

    #[test]
    fn test_missing_sensor() {
        let bus = FakeBus {
            nack: true,
            ..Default::default()
        };
        let mut sensor = Tmp112::new(bus, ADDRESS);
        assert!(matches!(sensor.start_conversion(), Err(Error::Bus(_))));
    }
}
