//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! The display driver and cloud adapters implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::health::HealthState;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Report(r) => {
                info!(
                    "READ  | PM1.0={} PM2.5={} PM10={} µg/m³ | sub25={} sub10={} | \
                     AQI={} | avg2.5={:.1}",
                    r.reading.pm1_0,
                    r.reading.pm2_5,
                    r.reading.pm10,
                    r.aqi.sub_pm25,
                    r.aqi.sub_pm10,
                    r.aqi.aqi,
                    r.pm2_5_avg,
                );
            }
            AppEvent::CycleFault { kind, health } => match health {
                HealthState::Faulting { since_ms } => {
                    warn!("FAULT | {kind} | faulting since t={since_ms}ms");
                }
                HealthState::Healthy => {
                    warn!("FAULT | {kind}");
                }
            },
            AppEvent::EscalationRequested { faulting_ms } => {
                warn!("FAULT | escalation requested after {faulting_ms}ms of faults");
            }
            AppEvent::Started => {
                info!("START | acquisition loop running");
            }
        }
    }
}
