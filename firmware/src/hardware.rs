//! Hardware abstraction and peripheral initialization.
//!
//! This module defines the pin mappings and peripheral initialization
//! for the push-button core board.
//!
//! # Pin Assignments
//!
//! ## User Interface
//! - **PA8**: BUTTON - Push button to VDD, internal pull-down (high = pressed)
//! - **PH1**: LED - Status LED, active high
//!
//! ## Sensor Bus (I2C2, 100 kHz)
//! - **PB10**: SCL
//! - **PB11**: SDA
//! - TMP112 thermometer at 0x49
//! - LIS2DH12 accelerometer at 0x19
//!
//! ## Battery Sense
//! - **PA0**: VBAT_SENSE - Divided pack voltage (ADC_IN0)
//! - **PB1**: VBAT_SENSE_EN - Enables the divider, active high
//!
//! ## Serial Transport (USART2, 115200 8N1)
//! - **PA2**: TX (DMA1 channel 4)
//!
//! ## Low Power & RTC
//! - **PC14**: OSC32_IN - 32.768 kHz crystal input
//! - **PC15**: OSC32_OUT - 32.768 kHz crystal output
//!
//! ## Debug (SWD)
//! - **PA13**: SWDIO
//! - **PA14**: SWCLK

use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Async;
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, DataBits, Parity, StopBits, UartTx};
use embassy_stm32::{bind_interrupts, peripherals};
use pushbutton::config::UART_BAUDRATE;

use crate::battery::BatteryMonitor;
use crate::led::StatusLed;
use crate::sensors::SensorBoard;

bind_interrupts!(struct Irqs {
    ADC1_COMP => embassy_stm32::adc::InterruptHandler<peripherals::ADC1>;
});

/// Top-level peripheral container for the push-button.
///
/// Owns all hardware controllers and provides initialization
/// from STM32 peripheral singleton.
pub struct Peripherals {
    /// Status LED
    pub led: StatusLed,
    /// Push button with edge detection
    pub button: ExtiInput<'static>,
    /// Thermometer and accelerometer on the shared I2C bus
    pub sensors: SensorBoard,
    /// Battery voltage measurement
    pub battery: BatteryMonitor,
    /// Serial transport towards the gateway
    pub uart: UartTx<'static, Async>,
}

impl Peripherals {
    /// Initializes all peripherals from STM32 peripheral singleton.
    ///
    /// # Initial GPIO States
    ///
    /// - PH1 (LED): Low (off)
    /// - PB1 (VBAT_SENSE_EN): Low (divider off)
    ///
    /// # Arguments
    ///
    /// * `p` - STM32 peripheral singleton from embassy_stm32::init()
    ///
    /// # Panics
    ///
    /// If the UART rejects its configuration, which only happens when the
    /// clock tree cannot produce the baud rate.
    pub fn new(p: embassy_stm32::Peripherals) -> Self {
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = Hertz::khz(100);

        let mut uart_config = usart::Config::default();
        uart_config.baudrate = UART_BAUDRATE;
        uart_config.data_bits = DataBits::DataBits8;
        uart_config.parity = Parity::ParityNone;
        uart_config.stop_bits = StopBits::STOP1;

        Self {
            led: StatusLed::new(Output::new(p.PH1, Level::Low, Speed::Low)),
            button: ExtiInput::new(p.PA8, p.EXTI8, Pull::Down),
            sensors: SensorBoard::new(I2c::new_blocking(p.I2C2, p.PB10, p.PB11, i2c_config)),
            battery: BatteryMonitor::new(
                Adc::new(p.ADC1, Irqs),
                p.PA0.degrade_adc(),
                Output::new(p.PB1, Level::Low, Speed::Low),
            ),
            uart: defmt::unwrap!(UartTx::new(p.USART2, p.PA2, p.DMA1_CH4, uart_config)),
        }
    }
}
