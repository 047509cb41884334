//! Service mode: fast sampling for a while after boot.
//!
//! Right after power-up the device samples its sensors every second so an
//! installer can check it works. A one-shot timer ends service mode, after
//! which sampling drops to the normal, battery-friendly interval.

use embassy_time::Duration;
use portable_atomic::{AtomicBool, Ordering};

use crate::config::{NORMAL_SAMPLING_INTERVAL, SERVICE_SAMPLING_INTERVAL};

/// Shared service mode flag.
///
/// Meant to live in a `static`: the sampling task reads it on every tick and
/// the one-shot task clears it once.
pub struct ServiceMode {
    active: AtomicBool,
    service_interval: Duration,
    normal_interval: Duration,
}

impl ServiceMode {
    /// Creates the flag in service mode with the default intervals.
    pub const fn new() -> Self {
        Self::with_intervals(SERVICE_SAMPLING_INTERVAL, NORMAL_SAMPLING_INTERVAL)
    }

    pub const fn with_intervals(service_interval: Duration, normal_interval: Duration) -> Self {
        Self {
            active: AtomicBool::new(true),
            service_interval,
            normal_interval,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Leaves service mode.
    ///
    /// Returns `true` only for the call that actually ended it.
    pub fn exit(&self) -> bool {
        self.active.swap(false, Ordering::Relaxed)
    }

    /// Sensor sampling interval for the current mode.
    pub fn sampling_interval(&self) -> Duration {
        if self.is_active() {
            self.service_interval
        } else {
            self.normal_interval
        }
    }
}

impl Default for ServiceMode {
    fn default() -> Self {
        Self::new()
    }
}
