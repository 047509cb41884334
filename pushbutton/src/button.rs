//! Button debouncing and event reporting.
//!
//! [`ButtonDetector`] turns periodic samples of the pin level into
//! [`ButtonEvent`]s. [`ButtonReporter`] counts those events and decides what
//! to report and how long to pulse the LED.
//!
//! # Event Timeline
//!
//! ```text
//! level   ___/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾\___
//!            |debounce|      hold time   |debounce|
//! events        Press            Hold         Release
//! ```
//!
//! A release before the click timeout, with no hold in between, is followed
//! by a `Click`.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::config::{
    BUTTON_CLICK_TIMEOUT, BUTTON_DEBOUNCE_TIME, BUTTON_HOLD_TIME, LED_PULSE_CLICK, LED_PULSE_HOLD,
};
use crate::report::Report;

/// Debounced button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Press,
    Release,
    Click,
    Hold,
}

/// Events produced by a single scan. A release can be followed by a click.
pub type ButtonEvents = Vec<ButtonEvent, 2>;

/// Button timing parameters.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    pub debounce: Duration,
    pub click_timeout: Duration,
    pub hold_time: Duration,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce: BUTTON_DEBOUNCE_TIME,
            click_timeout: BUTTON_CLICK_TIMEOUT,
            hold_time: BUTTON_HOLD_TIME,
        }
    }
}

/// Debouncer and event generator for one button.
#[derive(Debug)]
pub struct ButtonDetector {
    timing: ButtonTiming,
    /// Debounced level (true = pressed)
    pressed: bool,
    /// When the raw level first differed from the debounced one
    change_since: Option<Instant>,
    /// When the current press was accepted
    pressed_at: Option<Instant>,
    hold_fired: bool,
}

impl ButtonDetector {
    pub fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            pressed: false,
            change_since: None,
            pressed_at: None,
            hold_fired: false,
        }
    }

    /// Processes one sample of the pin level.
    ///
    /// # Arguments
    ///
    /// * `level_pressed` - Raw pin level, already mapped so `true` means pressed
    /// * `now` - Time of the sample
    ///
    /// # Returns
    ///
    /// Events triggered by this sample, in order
    pub fn scan(&mut self, level_pressed: bool, now: Instant) -> ButtonEvents {
        let mut events = ButtonEvents::new();

        if level_pressed == self.pressed {
            self.change_since = None;
        } else {
            match self.change_since {
                None => self.change_since = Some(now),
                Some(since) if now.saturating_duration_since(since) >= self.timing.debounce => {
                    self.change_since = None;
                    self.pressed = level_pressed;
                    if level_pressed {
                        self.on_press(now, &mut events);
                    } else {
                        self.on_release(now, &mut events);
                    }
                    return events;
                }
                Some(_) => {}
            }
        }

        if self.pressed && !self.hold_fired {
            if let Some(pressed_at) = self.pressed_at {
                if now.saturating_duration_since(pressed_at) >= self.timing.hold_time {
                    self.hold_fired = true;
                    let _ = events.push(ButtonEvent::Hold);
                }
            }
        }

        events
    }

    /// True when the button is released and no level change is pending.
    ///
    /// The caller can stop scanning and wait for the next edge.
    pub fn is_idle(&self) -> bool {
        !self.pressed && self.change_since.is_none()
    }

    fn on_press(&mut self, now: Instant, events: &mut ButtonEvents) {
        self.pressed_at = Some(now);
        self.hold_fired = false;
        let _ = events.push(ButtonEvent::Press);
    }

    fn on_release(&mut self, now: Instant, events: &mut ButtonEvents) {
        let _ = events.push(ButtonEvent::Release);
        if let Some(pressed_at) = self.pressed_at.take() {
            let held = now.saturating_duration_since(pressed_at);
            if !self.hold_fired && held < self.timing.click_timeout {
                let _ = events.push(ButtonEvent::Click);
            }
        }
    }
}

impl Default for ButtonDetector {
    fn default() -> Self {
        Self::new(ButtonTiming::default())
    }
}

/// What to do in response to a button event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonAction {
    /// Line to send, if any
    pub report: Option<Report>,
    /// LED pulse length, if any
    pub led_pulse: Option<Duration>,
}

/// Click/hold counters and hold-duration tracking.
#[derive(Debug, Default)]
pub struct ButtonReporter {
    click_count: u16,
    hold_count: u16,
    hold_event: bool,
    press_started: Option<Instant>,
}

impl ButtonReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one button event.
    pub fn handle(&mut self, event: ButtonEvent, now: Instant) -> ButtonAction {
        match event {
            ButtonEvent::Click => {
                self.click_count = self.click_count.wrapping_add(1);
                ButtonAction {
                    report: Some(Report::Button(self.click_count)),
                    led_pulse: Some(LED_PULSE_CLICK),
                }
            }
            ButtonEvent::Hold => {
                self.hold_count = self.hold_count.wrapping_add(1);
                self.hold_event = true;
                ButtonAction {
                    report: Some(Report::ButtonHold(self.hold_count)),
                    led_pulse: Some(LED_PULSE_HOLD),
                }
            }
            ButtonEvent::Press => {
                self.hold_event = false;
                self.press_started = Some(now);
                ButtonAction::default()
            }
            ButtonEvent::Release => {
                let started = self.press_started.take();
                match started {
                    Some(started) if self.hold_event => {
                        let held = now.saturating_duration_since(started).as_millis();
                        let held = u32::try_from(held).unwrap_or(u32::MAX);
                        ButtonAction {
                            report: Some(Report::ButtonHoldDuration(held)),
                            led_pulse: None,
                        }
                    }
                    _ => ButtonAction::default(),
                }
            }
        }
    }
}
