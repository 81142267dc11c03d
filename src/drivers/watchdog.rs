//! Task Watchdog Timer (TWDT) driver.
//!
//! The acquisition loop spends up to `serial_timeout_ms` (3 s) busy-
//! polling the UART each cycle, so the TWDT timeout must sit well above
//! that; the main loop feeds the watchdog once per iteration and a wedge
//! anywhere in the cycle resets the device.

/// TWDT timeout. Must exceed one full worst-case cycle (3 s serial
/// timeout plus processing) with margin.
const TWDT_TIMEOUT_MS: u32 = 10_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new() -> Self {
        use esp_idf_svc::sys::*;

        // SAFETY: reconfigure/add run once from the main task at boot.
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms: TWDT_TIMEOUT_MS,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            if esp_task_wdt_reconfigure(&cfg) != ESP_OK {
                log::warn!("TWDT reconfigure failed (may already be configured)");
            }

            let subscribed = esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK;
            if subscribed {
                log::info!("Watchdog: subscribed ({} ms, panic on trigger)", TWDT_TIMEOUT_MS);
            } else {
                log::warn!("Watchdog: failed to subscribe");
            }

            Self { subscribed }
        }
    }

    /// Feed the watchdog. Must be called at least once per timeout window.
    pub fn feed(&self) {
        if self.subscribed {
            // SAFETY: task subscribed in new().
            unsafe {
                esp_idf_svc::sys::esp_task_wdt_reset();
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Watchdog {
    pub fn new() -> Self {
        log::info!("Watchdog(sim): no-op, nominal timeout {} ms", TWDT_TIMEOUT_MS);
        Self {}
    }

    pub fn feed(&self) {}
}
