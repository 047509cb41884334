//! Thermometer and accelerometer sampling.
//!
//! Both sensors share I2C2, so one task owns the bus and samples them back
//! to back on each tick. The tick length depends on service mode: 1 s while
//! it lasts, 10 s afterwards.

use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Blocking;
use embassy_time::{Instant, Timer};
use pushbutton::config::{LIS2DH12_ADDRESS, TMP112_ADDRESS};
use pushbutton::driver::{self, Lis2dh12, Tmp112, tmp112};
use pushbutton::orientation::OrientationReporter;
use pushbutton::service_mode::ServiceMode;
use pushbutton::temperature::TemperatureReporter;

use crate::uart;

type Bus = I2c<'static, Blocking>;
type SensorError = driver::Error<i2c::Error>;

/// Owner of the sensor bus.
pub struct SensorBoard {
    i2c: Bus,
}

impl SensorBoard {
    pub fn new(i2c: Bus) -> Self {
        Self { i2c }
    }

    pub fn thermometer(&mut self) -> Tmp112<&mut Bus> {
        Tmp112::new(&mut self.i2c, TMP112_ADDRESS)
    }

    pub fn accelerometer(&mut self) -> Lis2dh12<&mut Bus> {
        Lis2dh12::new(&mut self.i2c, LIS2DH12_ADDRESS)
    }

    /// Puts the thermometer in shutdown and starts the accelerometer.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.thermometer().init()?;
        self.accelerometer().init()
    }

    async fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.thermometer().start_conversion()?;
        Timer::after(tmp112::CONVERSION_TIME).await;
        self.thermometer().read_celsius()
    }
}

/// Async task sampling both sensors and publishing what changed.
///
/// Owns the orientation classifier; nothing else touches it.
///
/// # Arguments
///
/// * `board` - SensorBoard instance (takes ownership)
/// * `service_mode` - Shared flag selecting the sampling interval
#[embassy_executor::task]
pub async fn sensor_task(mut board: SensorBoard, service_mode: &'static ServiceMode) {
    let mut temperature = TemperatureReporter::default();
    let mut orientation = OrientationReporter::default();
    let mut initialized = false;

    loop {
        // Retried every tick until both sensors answer. No reads before that,
        // an unconfigured sensor returns power-on defaults.
        if !initialized {
            match board.init() {
                Ok(()) => initialized = true,
                Err(_e) => {
                    #[cfg(feature = "debug-mode")]
                    defmt::warn!("Sensor init failed: {}", _e);
                    Timer::after(service_mode.sampling_interval()).await;
                    continue;
                }
            }
        }

        match board.read_temperature().await {
            Ok(celsius) => {
                if let Some(report) = temperature.update(celsius, Instant::now()) {
                    uart::publish(report);
                }
            }
            Err(_e) => {
                #[cfg(feature = "debug-mode")]
                defmt::warn!("Thermometer read failed: {}", _e);
            }
        }

        match board.accelerometer().read_g() {
            Ok(sample) => {
                if let Some(report) = orientation.update(sample) {
                    uart::publish(report);
                }
            }
            Err(_e) => {
                #[cfg(feature = "debug-mode")]
                defmt::warn!("Accelerometer read failed: {}", _e);
            }
        }

        Timer::after(service_mode.sampling_interval()).await;
    }
}
