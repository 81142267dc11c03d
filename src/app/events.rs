//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port — exactly one outcome event
//! per cycle, never silently swallowed. Adapters on the other side decide
//! what to do with them: log to serial, cache for cloud property sync,
//! drive a display.

use crate::aqi::AqiResult;
use crate::error::FrameError;
use crate::frame::Reading;
use crate::health::HealthState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A cycle completed with a valid reading.
    Report(SensorReport),

    /// A cycle faulted. Carries the health state *after* the fault was
    /// recorded, so consumers can tell a first hiccup from a sustained
    /// outage.
    CycleFault {
        kind: FrameError,
        health: HealthState,
    },

    /// The grace period elapsed mid-episode; the supervisor should
    /// hard-restart the device. Fired at most once per fault episode.
    EscalationRequested {
        /// How long the episode had been running when escalation fired.
        faulting_ms: u64,
    },

    /// The application service has started.
    Started,
}

/// One successful cycle's worth of data, raw and derived.
#[derive(Debug, Clone, Copy)]
pub struct SensorReport {
    /// Raw concentrations decoded from the frame.
    pub reading: Reading,
    /// Derived sub-indices and combined AQI.
    pub aqi: AqiResult,
    /// Rolling PM2.5 mean over the recent history window (µg/m³).
    pub pm2_5_avg: f32,
}
