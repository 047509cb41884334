//! Status LED module.
//!
//! The LED only ever shows pulses: a long one when the firmware has booted,
//! a short one per click and a medium one per hold. Any task can request a
//! pulse through [`pulse`]; the LED task owns the pin.
//!
//! A pulse requested while another one is still lit restarts the timer with
//! the new length, so quick clicks merge into one longer flash.

use embassy_futures::select::{Either, select};
use embassy_stm32::gpio::Output;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Timer};

/// Active-high status LED.
pub struct StatusLed {
    pin: Output<'static>,
}

impl StatusLed {
    /// Creates a new StatusLed.
    ///
    /// # Arguments
    ///
    /// * `pin` - LED GPIO, initialized low
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }

    pub fn on(&mut self) {
        self.pin.set_high();
    }

    pub fn off(&mut self) {
        self.pin.set_low();
    }
}

/// Pending pulse request, carrying the pulse length.
static LED_PULSE: Signal<CriticalSectionRawMutex, Duration> = Signal::new();

/// Requests an LED pulse of the given length.
pub fn pulse(duration: Duration) {
    LED_PULSE.signal(duration);
}

/// Async task driving the status LED.
///
/// Waits for pulse requests and keeps the LED lit until the latest requested
/// pulse has run out.
///
/// # Arguments
///
/// * `led` - StatusLed instance (takes ownership)
#[embassy_executor::task]
pub async fn led_task(mut led: StatusLed) {
    loop {
        let mut length = LED_PULSE.wait().await;
        led.on();

        loop {
            match select(Timer::after(length), LED_PULSE.wait()).await {
                Either::First(()) => break,
                Either::Second(restart) => length = restart,
            }
        }

        led.off();
    }
}
