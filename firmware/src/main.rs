//! Firmware for a battery-powered wireless push-button.
//!
//! # Overview
//!
//! The push-button reports everything that happens to it as short text
//! lines over a serial link to the radio gateway:
//! - Clicks, holds and hold durations of the button
//! - Resting orientation (which face points up) from the LIS2DH12
//! - Temperature from the TMP112, every 15 minutes or on a 0.2 °C change
//! - Battery voltage, once per hour
//!
//! # Hardware
//!
//! - **MCU**: STM32L083CZ (Cortex-M0+, ultra-low-power)
//! - **Sensors**: TMP112 thermometer, LIS2DH12 accelerometer on I2C2
//! - **Battery**: 4x AAA pack, sensed through a switchable divider
//! - **RTC**: 32.768 kHz crystal for timekeeping
//!
//! # Service Mode
//!
//! For the first 15 minutes after power-up both sensors are sampled every
//! second so an installer can see the device respond. A one-shot task then
//! drops sampling to every 10 seconds.
//!
//! # Low Power Operation
//!
//! - MSI oscillator at 2.097 MHz (enough for 115200 baud)
//! - Embassy executor sleeps (WFE) whenever every task is waiting
//! - The button task wakes on the EXTI edge only and scans just while pressed
//!
//! # Module Organization
//!
//! - [`hardware`] - Pin mappings and peripheral initialization
//! - [`button`] - Button debouncing task
//! - [`sensors`] - Thermometer and accelerometer sampling task
//! - [`battery`] - Battery measurement task
//! - [`led`] - Status LED pulses
//! - [`uart`] - Report queue and serial writer task

#![no_std]
#![no_main]

mod battery;
mod button;
mod hardware;
mod led;
mod sensors;
mod uart;

use embassy_executor::Spawner;
use embassy_stm32::{
    Config,
    rcc::{LsConfig, LseConfig, mux::ClockMux},
    time::Hertz,
};
use embassy_time::Timer;
use pushbutton::config::{LED_PULSE_BOOT, SERVICE_MODE_DURATION};
use pushbutton::service_mode::ServiceMode;
use {defmt_rtt as _, panic_probe as _};

use battery::battery_task;
use button::button_task;
use hardware::Peripherals;
use led::led_task;
use sensors::sensor_task;
use uart::uart_task;

/// Sampling mode shared by the sensor task and the service mode timer.
static SERVICE_MODE: ServiceMode = ServiceMode::new();

/// Creates a low-power clock configuration for STM32L083.
///
/// # Clock Settings
///
/// - **MSI**: 2.097 MHz
/// - **System clock**: MSI (no PLL)
/// - **LSE**: 32.768 kHz external crystal for RTC
/// - **Voltage scale**: Range 1
///
/// MSI is kept at 2.097 MHz rather than the lowest range so USART2 can
/// still produce 115200 baud.
///
/// # Returns
///
/// Configured RCC settings for embassy-stm32 initialization
fn create_low_power_config() -> embassy_stm32::rcc::Config {
    embassy_stm32::rcc::Config {
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE2M),
        hsi: false,
        hse: None,
        pll: None,
        sys: embassy_stm32::rcc::Sysclk::MSI,
        ahb_pre: embassy_stm32::rcc::AHBPrescaler::DIV1,
        apb1_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        apb2_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        ls: LsConfig {
            rtc: embassy_stm32::rcc::RtcClockSource::LSE,
            lsi: false,
            lse: Some(LseConfig {
                frequency: Hertz::hz(32768),
                mode: embassy_stm32::rcc::LseMode::Oscillator(embassy_stm32::rcc::LseDrive::Low),
            }),
        },
        voltage_scale: embassy_stm32::rcc::VoltageScale::RANGE1,
        mux: ClockMux::default(),
    }
}

/// One-shot task ending service mode.
///
/// Sleeps for [`SERVICE_MODE_DURATION`], switches the sensors to the normal
/// sampling interval and returns.
#[embassy_executor::task]
async fn service_mode_task(service_mode: &'static ServiceMode) {
    Timer::after(SERVICE_MODE_DURATION).await;

    if service_mode.exit() {
        #[cfg(feature = "debug-mode")]
        defmt::info!("Service mode finished, switching to normal sampling");
    }
}

/// Main entry point for push-button firmware.
///
/// # Initialization Sequence
///
/// 1. Configure clocks for low power operation
/// 2. Initialize STM32 peripherals
/// 3. Spawn the UART and LED tasks so reports have somewhere to go
/// 4. Spawn button, sensor and battery tasks
/// 5. Arm the service mode timer
/// 6. Pulse the LED to signal readiness
///
/// # Spawned Tasks
///
/// - **uart_task**: Writes queued reports to USART2
/// - **led_task**: Drives LED pulses
/// - **button_task**: Debounces the button and reports clicks/holds
/// - **sensor_task**: Samples temperature and orientation
/// - **battery_task**: Measures the battery once per hour
/// - **service_mode_task**: Ends service mode after 15 minutes
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut config = Config::default();
    config.rcc = create_low_power_config();

    let p = embassy_stm32::init(config);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Push-button firmware starting...");

    // Wait 3 seconds after boot to allow debugger connection.
    #[cfg(feature = "debug-mode")]
    {
        defmt::info!("Waiting 3 seconds for debugger connection...");
        Timer::after_secs(3).await;
    }

    #[cfg(feature = "debug-mode")]
    defmt::info!("Initializing peripherals...");

    let peripherals = Peripherals::new(p);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Spawning tasks...");

    spawner.spawn(uart_task(peripherals.uart)).unwrap();
    spawner.spawn(led_task(peripherals.led)).unwrap();
    spawner.spawn(button_task(peripherals.button)).unwrap();
    spawner
        .spawn(sensor_task(peripherals.sensors, &SERVICE_MODE))
        .unwrap();
    spawner.spawn(battery_task(peripherals.battery)).unwrap();
    spawner.spawn(service_mode_task(&SERVICE_MODE)).unwrap();

    led::pulse(LED_PULSE_BOOT);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Initialization done, service mode active");
}
