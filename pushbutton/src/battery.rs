//! Battery voltage conversion.
//!
//! The pack voltage reaches the ADC through a resistive divider. ADC counts
//! are relative to VDDA, which itself is not known precisely, so every
//! measurement also samples the internal reference (VREFINT) and scales by
//! its factory calibration value.

/// VDDA at which the factory VREFINT calibration value was taken (STM32L0).
pub const VREFINT_CAL_VOLTS: f32 = 3.0;

/// Full-scale count of the 12-bit ADC.
pub const ADC_FULL_SCALE: f32 = 4095.0;

/// Divider ratio of the battery module sense network.
pub const DEFAULT_DIVIDER_RATIO: f32 = 3.0;

/// Converts raw ADC readings into pack voltage.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryGauge {
    divider_ratio: f32,
    vrefint_cal: u16,
}

impl BatteryGauge {
    /// # Arguments
    ///
    /// * `divider_ratio` - Pack voltage divided by the voltage at the ADC pin
    /// * `vrefint_cal` - Factory VREFINT reading at [`VREFINT_CAL_VOLTS`]
    pub fn new(divider_ratio: f32, vrefint_cal: u16) -> Self {
        Self {
            divider_ratio,
            vrefint_cal,
        }
    }

    /// Actual VDDA derived from a VREFINT reading.
    pub fn vdda(&self, vrefint_raw: u16) -> Option<f32> {
        if vrefint_raw == 0 {
            return None;
        }
        Some(VREFINT_CAL_VOLTS * f32::from(self.vrefint_cal) / f32::from(vrefint_raw))
    }

    /// Pack voltage from a battery channel reading and a VREFINT reading
    /// taken right after it.
    ///
    /// Returns `None` if VREFINT read as zero (ADC not running).
    pub fn voltage(&self, battery_raw: u16, vrefint_raw: u16) -> Option<f32> {
        let vdda = self.vdda(vrefint_raw)?;
        Some(f32::from(battery_raw) / ADC_FULL_SCALE * vdda * self.divider_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_vdda_from_reference() {
        let gauge = BatteryGauge::new(DEFAULT_DIVIDER_RATIO, 1672);
        assert!(close(gauge.vdda(1672).unwrap(), 3.0));
        // Lower supply means the reference reads higher
        assert!(close(gauge.vdda(1520).unwrap(), 3.3));
    }

    #[test]
    fn test_pack_voltage() {
        let gauge = BatteryGauge::new(3.0, 1672);
        // Half scale at VDDA = 3.0 V is 1.5 V at the pin, 4.5 V at the pack
        let volts = gauge.voltage(2048, 1672).unwrap();
        assert!((volts - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_zero_reference_is_rejected() {
        let gauge = BatteryGauge::new(3.0, 1672);
        assert_eq!(gauge.voltage(2048, 0), None);
    }
}
