//! Push button handling.
//!
//! The task sleeps on the EXTI line until the button goes high, then scans
//! the pin every [`BUTTON_SCAN_INTERVAL`] until the debouncer reports it idle
//! again. While nobody touches the button the MCU stays asleep.

use embassy_stm32::exti::ExtiInput;
use embassy_time::{Instant, Timer};
use pushbutton::button::{ButtonDetector, ButtonReporter};
use pushbutton::config::BUTTON_SCAN_INTERVAL;

use crate::{led, uart};

/// Async task turning button presses into reports and LED pulses.
///
/// # Arguments
///
/// * `button` - Button input with EXTI (takes ownership)
#[embassy_executor::task]
pub async fn button_task(mut button: ExtiInput<'static>) {
    let mut detector = ButtonDetector::default();
    let mut reporter = ButtonReporter::new();

    loop {
        button.wait_for_high().await;

        loop {
            let now = Instant::now();
            for event in detector.scan(button.is_high(), now) {
                #[cfg(feature = "debug-mode")]
                defmt::debug!("Button event: {}", event);

                let action = reporter.handle(event, now);
                if let Some(report) = action.report {
                    uart::publish(report);
                }
                if let Some(length) = action.led_pulse {
                    led::pulse(length);
                }
            }

            if detector.is_idle() {
                break;
            }
            Timer::after(BUTTON_SCAN_INTERVAL).await;
        }
    }
}
