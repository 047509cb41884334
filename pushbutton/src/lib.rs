//! Application logic for the battery-powered wireless push-button.
//!
//! # Overview
//!
//! The device reports what happens to it as short text lines over a serial
//! transport:
//! - button clicks, holds and hold durations
//! - resting orientation ("dice face") from an accelerometer
//! - temperature, on a schedule or when it changes noticeably
//! - battery voltage, once per hour
//!
//! This crate holds everything that does not touch MCU peripherals directly,
//! so it builds and tests on the host. The `firmware` crate wires it to the
//! embassy executor and the STM32 HAL.
//!
//! # Module Organization
//!
//! - [`dice`] - Orientation classifier turning gravity samples into faces
//! - [`button`] - Button debouncing and event reporting
//! - [`orientation`] - Face transition reporting on top of [`dice`]
//! - [`temperature`] - Temperature publish policy
//! - [`battery`] - Battery voltage conversion
//! - [`service_mode`] - Fast sampling window after boot
//! - [`report`] - Text lines sent over the serial transport
//! - [`driver`] - I2C drivers for the LIS2DH12 and TMP112
//! - [`config`] - Timing constants and device addresses

#![cfg_attr(not(test), no_std)]

pub mod battery;
pub mod button;
pub mod config;
pub mod dice;
pub mod driver;
pub mod orientation;
pub mod report;
pub mod service_mode;
pub mod temperature;

pub use dice::{Calibration, CalibrationError, ConfigError, Dice, Face, Sample};
pub use report::Report;
