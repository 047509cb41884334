//! Battery monitoring module.
//!
//! The pack voltage is measured through a resistive divider on PA0. The
//! divider is only powered (PB1 high) for the duration of a measurement so
//! it does not drain the pack between readings.
//!
//! # Measurement
//!
//! Each reading samples the battery channel and the internal reference
//! (VREFINT). VREFINT against its factory calibration gives the actual VDDA,
//! which turns the battery counts into volts; see
//! [`pushbutton::battery::BatteryGauge`].

use embassy_stm32::adc::{Adc, AnyAdcChannel, SampleTime, Vref};
use embassy_stm32::gpio::Output;
use embassy_stm32::peripherals::ADC1;
use embassy_time::Timer;
use pushbutton::Report;
use pushbutton::battery::{BatteryGauge, DEFAULT_DIVIDER_RATIO};
use pushbutton::config::BATTERY_UPDATE_INTERVAL;

use crate::uart;

/// Address of the factory VREFINT calibration value (STM32L0 system memory).
const VREFINT_CAL_ADDR: *const u16 = 0x1FF8_0078 as *const u16;

/// Settling time of the divider after it is switched on.
const DIVIDER_SETTLE_MS: u64 = 5;

/// Controller for battery voltage measurement.
pub struct BatteryMonitor {
    adc: Adc<'static, ADC1>,
    /// Divided pack voltage (PA0)
    sense: AnyAdcChannel<ADC1>,
    /// Active-high divider enable (PB1)
    sense_en: Output<'static>,
    vref: Vref,
    gauge: BatteryGauge,
}

impl BatteryMonitor {
    /// Creates a new BatteryMonitor.
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC1 driver
    /// * `sense` - ADC channel of the divider output (PA0)
    /// * `sense_en` - Divider enable output (PB1), initialized low
    pub fn new(mut adc: Adc<'static, ADC1>, sense: AnyAdcChannel<ADC1>, sense_en: Output<'static>) -> Self {
        adc.set_sample_time(SampleTime::CYCLES160_5);
        let vref = adc.enable_vref();

        // SAFETY: the calibration value is a read-only factory constant in
        // system memory, valid for the whole lifetime of the device.
        let vrefint_cal = unsafe { core::ptr::read_volatile(VREFINT_CAL_ADDR) };

        Self {
            adc,
            sense,
            sense_en,
            vref,
            gauge: BatteryGauge::new(DEFAULT_DIVIDER_RATIO, vrefint_cal),
        }
    }

    /// Measures the pack voltage in volts.
    ///
    /// Returns `None` if the reference channel read as zero.
    pub async fn measure(&mut self) -> Option<f32> {
        self.sense_en.set_high();
        Timer::after_millis(DIVIDER_SETTLE_MS).await;

        let battery_raw = self.adc.read(&mut self.sense).await;
        let vrefint_raw = self.adc.read(&mut self.vref).await;

        self.sense_en.set_low();

        self.gauge.voltage(battery_raw, vrefint_raw)
    }
}

/// Async task reporting the battery voltage.
///
/// Measures right after boot and then once per
/// [`BATTERY_UPDATE_INTERVAL`]. Runs continuously in the background.
///
/// # Arguments
///
/// * `battery` - BatteryMonitor instance (takes ownership)
#[embassy_executor::task]
pub async fn battery_task(mut battery: BatteryMonitor) {
    loop {
        match battery.measure().await {
            Some(voltage) => uart::publish(Report::Battery(voltage)),
            None => {
                #[cfg(feature = "debug-mode")]
                defmt::warn!("Battery measurement failed");
            }
        }

        Timer::after(BATTERY_UPDATE_INTERVAL).await;
    }
}
