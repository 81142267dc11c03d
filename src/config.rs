//! System configuration parameters
//!
//! All tunable parameters for the AQIMon system. The firmware runs from
//! these defaults at boot; persistence is deliberately out of scope.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Serial link ---
    /// Maximum wait for the 2-byte sync header (milliseconds)
    pub serial_timeout_ms: u32,

    // --- Health / escalation ---
    /// Sustained-fault duration before escalation is permitted (milliseconds)
    pub fault_grace_ms: u32,

    // --- Timing ---
    /// Control loop interval — one acquire/decode/report cycle (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Cloud property sync interval (seconds)
    pub cloud_sync_interval_secs: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Serial link
            serial_timeout_ms: 3000,

            // Health
            fault_grace_ms: 30_000,

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            cloud_sync_interval_secs: 5,    // property update period
            telemetry_interval_secs: 60,    // 1/min
        }
    }
}
