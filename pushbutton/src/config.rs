//! Compile-time configuration.
//!
//! Timing values follow the behaviour of the deployed device: fast sampling
//! for the first 15 minutes ("service mode"), slow sampling afterwards.

use embassy_time::Duration;

/// How long the device stays in service mode after boot.
pub const SERVICE_MODE_DURATION: Duration = Duration::from_secs(15 * 60);

/// Sensor sampling interval while in service mode.
pub const SERVICE_SAMPLING_INTERVAL: Duration = Duration::from_secs(1);

/// Sensor sampling interval after service mode has ended.
pub const NORMAL_SAMPLING_INTERVAL: Duration = Duration::from_secs(10);

/// Battery measurement interval.
pub const BATTERY_UPDATE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Maximum time between two published temperatures.
pub const TEMPERATURE_PUB_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Temperature change (°C) that triggers an early publish.
pub const TEMPERATURE_PUB_DIFFERENCE: f32 = 0.2;

/// Minimum dominant-axis magnitude (g) for a sample to count as a face.
pub const DICE_THRESHOLD: f32 = 0.75;

/// Largest axis magnitude (g) a sample may carry and still be classified.
/// Matches the ±2 g full scale the accelerometer runs at.
pub const DICE_MAX_MAGNITUDE: f32 = 2.0;

/// Button pin scan period while the button is being tracked.
pub const BUTTON_SCAN_INTERVAL: Duration = Duration::from_millis(20);

/// A level change must persist this long to be accepted.
pub const BUTTON_DEBOUNCE_TIME: Duration = Duration::from_millis(20);

/// Presses shorter than this count as clicks.
pub const BUTTON_CLICK_TIMEOUT: Duration = Duration::from_millis(500);

/// Presses longer than this fire a hold event.
pub const BUTTON_HOLD_TIME: Duration = Duration::from_millis(1000);

/// LED pulse on a click.
pub const LED_PULSE_CLICK: Duration = Duration::from_millis(100);

/// LED pulse on a hold.
pub const LED_PULSE_HOLD: Duration = Duration::from_millis(250);

/// LED pulse once initialization has finished.
pub const LED_PULSE_BOOT: Duration = Duration::from_millis(2000);

/// I2C address of the TMP112 thermometer.
pub const TMP112_ADDRESS: u8 = 0x49;

/// I2C address of the LIS2DH12 accelerometer (SA0 high).
pub const LIS2DH12_ADDRESS: u8 = 0x19;

/// Serial transport baud rate.
pub const UART_BAUDRATE: u32 = 115_200;
