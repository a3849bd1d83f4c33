//! Time adapters.
//!
//! - [`ThreadDelay`]: blocking [`DelayNs`] backed by `std::thread::sleep`.
//!   On ESP-IDF the std sleep yields to FreeRTOS, so other tasks (the
//!   status LED) keep running while the command loop waits.
//! - [`Uptime`]: monotonic time since boot.
//!   - **`target_os = "espidf"`**: wraps `esp_timer_get_time()`.
//!   - **`not(target_os = "espidf")`**: uses `std::time::Instant`.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Sleeping delay usable from any thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Monotonic uptime clock.
pub struct Uptime {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

impl Uptime {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot.
    #[cfg(target_os = "espidf")]
    pub fn millis(&self) -> u64 {
        // SAFETY: esp_timer is started by the IDF before app_main.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since this clock was created.
    #[cfg(not(target_os = "espidf"))]
    pub fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
