//! LIS2DH12 3-axis accelerometer.
//!
//! Runs in normal (10-bit) mode at 10 Hz with a ±2 g range. Block data
//! update is on so a read never mixes the high and low byte of two
//! different samples.

use embedded_hal::i2c::I2c;

use super::Error;
use crate::dice::Sample;

/// Expected `WHO_AM_I` value.
pub const DEVICE_ID: u8 = 0x33;

const WHO_AM_I: u8 = 0x0F;
const CTRL_REG1: u8 = 0x20;
const CTRL_REG4: u8 = 0x23;
const OUT_X_L: u8 = 0x28;

/// Register address flag enabling auto-increment on multi-byte reads.
const AUTO_INCREMENT: u8 = 0x80;

/// ODR = 10 Hz, normal mode, X/Y/Z enabled.
const CTRL_REG1_10HZ_XYZ: u8 = 0x27;
/// BDU on, ±2 g, high resolution off.
const CTRL_REG4_BDU_2G: u8 = 0x80;

/// Sensitivity in normal mode at ±2 g.
const G_PER_DIGIT: f32 = 0.004;

pub struct Lis2dh12<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Lis2dh12<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Verifies the device ID and starts continuous measurement.
    pub fn init(&mut self) -> Result<(), Error<I::Error>> {
        let id = self.who_am_i()?;
        if id != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("LIS2DH12: unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Error::InvalidDevice(id));
        }

        self.write_register(CTRL_REG4, CTRL_REG4_BDU_2G)?;
        self.write_register(CTRL_REG1, CTRL_REG1_10HZ_XYZ)?;
        Ok(())
    }

    pub fn who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        let mut id = [0u8];
        self.i2c.write_read(self.address, &[WHO_AM_I], &mut id)?;
        Ok(id[0])
    }

    /// Reads the latest sample in units of g.
    pub fn read_g(&mut self) -> Result<Sample, Error<I::Error>> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.address, &[OUT_X_L | AUTO_INCREMENT], &mut raw)?;

        let sample = Sample::new(
            to_g(raw[0], raw[1]),
            to_g(raw[2], raw[3]),
            to_g(raw[4], raw[5]),
        );

        #[cfg(feature = "defmt")]
        defmt::trace!("LIS2DH12: {}", sample);

        Ok(sample)
    }

    /// Gives the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }
}

/// Left-justified 10-bit output to g.
fn to_g(low: u8, high: u8) -> f32 {
    let counts = i16::from_le_bytes([low, high]) >> 6;
    f32::from(counts) * G_PER_DIGIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::FakeBus;
    use embedded_hal::i2c::ErrorKind;

    const ADDRESS: u8 = 0x19;

    #[test]
    fn test_init_configures_device() {
        let bus = FakeBus::with_responses(&[&[DEVICE_ID]]);
        let mut sensor = Lis2dh12::new(bus, ADDRESS);
        sensor.init().unwrap();

        let bus = sensor.release();
        assert_eq!(
            bus.writes,
            [
                (ADDRESS, vec![WHO_AM_I]),
                (ADDRESS, vec![CTRL_REG4, 0x80]),
                (ADDRESS, vec![CTRL_REG1, 0x27]),
            ]
        );
    }

    #[test]
    fn test_init_rejects_wrong_device() {
        let bus = FakeBus::with_responses(&[&[0x6A]]);
        let mut sensor = Lis2dh12::new(bus, ADDRESS);
        assert_eq!(sensor.init(), Err(Error::InvalidDevice(0x6A)));
        // Nothing configured on a foreign device
        assert_eq!(sensor.release().writes.len(), 1);
    }

    #[test]
    fn test_read_converts_to_g() {
        // x = -1 g, y = 0 g, z = +1 g (250 counts << 6)
        let bus = FakeBus::with_responses(&[&[0x80, 0xC1, 0x00, 0x00, 0x80, 0x3E]]);
        let mut sensor = Lis2dh12::new(bus, ADDRESS);
        let sample = sensor.read_g().unwrap();

        assert!((sample.x + 1.0).abs() < 1e-6);
        assert_eq!(sample.y, 0.0);
        assert!((sample.z - 1.0).abs() < 1e-6);
        assert_eq!(sensor.release().writes, [(ADDRESS, vec![0xA8])]);
    }

    #[test]
    fn test_bus_error_is_propagated() {
        let bus = FakeBus {
            nack: true,
            ..Default::default()
        };
        let mut sensor = Lis2dh12::new(bus, ADDRESS);
        assert!(matches!(
            sensor.read_g(),
            Err(Error::Bus(ErrorKind::NoAcknowledge(_)))
        ));
    }
}
