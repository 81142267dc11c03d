//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the frame reader, the AQI conversion, and the
//! health monitor, and orchestrates one acquisition cycle per tick.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with a synthetic byte stream and a fake clock.
//!
//! ```text
//!  SerialPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!   Clock     ──▶ │       AppService       │
//!                 │ Frame · AQI · Health   │ ──▶ take_escalation()
//!                 └────────────────────────┘
//! ```
//!
//! Data flows strictly one way: reader → decoder → converter → sinks.
//! The health monitor observes acquisition outcomes only.

use heapless::HistoryBuffer;
use log::info;

use crate::aqi;
use crate::config::SystemConfig;
use crate::frame::{self, FrameReader};
use crate::health::{HealthMonitor, HealthState};

use super::events::{AppEvent, SensorReport};
use super::ports::{Clock, EventSink, SerialPort};

/// PM2.5 samples retained for the rolling average (one per cycle).
const PM_HISTORY_LEN: usize = 60;

/// Outcome of one control cycle, for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Report,
    Fault,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    reader: FrameReader,
    health: HealthMonitor,
    /// Recent PM2.5 samples for the telemetry rolling mean.
    pm_history: HistoryBuffer<u16, PM_HISTORY_LEN>,
    cycle_count: u64,
    /// Set when the health monitor escalates; cleared by `take_escalation`.
    escalation_pending: bool,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            reader: FrameReader::new(config.serial_timeout_ms),
            health: HealthMonitor::new(config),
            pm_history: HistoryBuffer::new(),
            cycle_count: 0,
            escalation_pending: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup to the sinks.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: acquire → decode → convert → report.
    ///
    /// Every cycle emits exactly one outcome event. Faults additionally
    /// feed the health monitor, and a sustained episode raises one
    /// `EscalationRequested` which is also latched for
    /// [`take_escalation`](Self::take_escalation).
    pub fn tick(
        &mut self,
        serial: &mut impl SerialPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.cycle_count += 1;

        let frame = match self.reader.acquire(serial, clock) {
            Ok(frame) => frame,
            Err(kind) => {
                let now_ms = clock.now_ms();
                let escalate = self.health.record_fault(kind, now_ms);
                sink.emit(&AppEvent::CycleFault {
                    kind,
                    health: self.health.state(),
                });
                if escalate {
                    self.escalation_pending = true;
                    let faulting_ms = match self.health.state() {
                        HealthState::Faulting { since_ms } => now_ms.saturating_sub(since_ms),
                        HealthState::Healthy => 0,
                    };
                    sink.emit(&AppEvent::EscalationRequested { faulting_ms });
                }
                return CycleOutcome::Fault;
            }
        };

        let reading = frame::decode(&frame);
        let aqi = aqi::compute(&reading);
        self.health.record_success();

        self.pm_history.write(reading.pm2_5);
        sink.emit(&AppEvent::Report(SensorReport {
            reading,
            aqi,
            pm2_5_avg: self.pm2_5_avg(),
        }));
        CycleOutcome::Report
    }

    // ── Queries ───────────────────────────────────────────────

    /// Consume a pending escalation decision (supervisor hand-off).
    /// Returns `true` at most once per fault episode.
    pub fn take_escalation(&mut self) -> bool {
        core::mem::take(&mut self.escalation_pending)
    }

    /// Current link-health state.
    pub fn health(&self) -> HealthState {
        self.health.state()
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Rolling mean of the recent PM2.5 samples (0.0 before any reading).
    pub fn pm2_5_avg(&self) -> f32 {
        let samples = self.pm_history.as_slice();
        if samples.is_empty() {
            return 0.0;
        }
        let sum: u32 = samples.iter().map(|&v| u32::from(v)).sum();
        sum as f32 / samples.len() as f32
    }
}
