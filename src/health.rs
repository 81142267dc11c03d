//! Link-health supervisor.
//!
//! The monitor observes every cycle outcome and tracks exactly two
//! states:
//!
//! 1. `Healthy` — the last cycle produced a valid reading.
//! 2. `Faulting { since_ms }` — at least one cycle has faulted and no
//!    reading has arrived since; `since_ms` marks the episode start.
//!
//! Once a fault episode has lasted the configured grace period, the
//! monitor requests escalation — **once per episode**. The supervisor
//! (main loop) decides what escalation means (a hard restart on the
//! target). A single good reading ends the episode, clears the latch,
//! and a later episode must accumulate the full grace period again.
//! The debounce exists so transient serial noise never restarts the
//! device.

use log::{error, info, warn};

use crate::config::SystemConfig;
use crate::error::FrameError;
use crate::timing::Deadline;

/// Current link-health state. Never persisted across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// Last cycle completed with a valid reading.
    Healthy,
    /// Consecutive faults since the given monotonic timestamp.
    Faulting { since_ms: u64 },
}

impl HealthState {
    pub fn in_error(&self) -> bool {
        matches!(self, Self::Faulting { .. })
    }
}

/// Tracks consecutive-fault state and applies the escalation grace period.
pub struct HealthMonitor {
    state: HealthState,
    grace_ms: u32,
    /// Escalation deadline for the current episode; set on the first fault.
    grace_deadline: Option<Deadline>,
    /// True once escalation has fired for the current episode.
    escalated: bool,
}

impl HealthMonitor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: HealthState::Healthy,
            grace_ms: config.fault_grace_ms,
            grace_deadline: None,
            escalated: false,
        }
    }

    /// Record a faulting cycle.
    ///
    /// Returns `true` exactly once per episode, on the first faulting
    /// cycle at which the grace period has elapsed.
    pub fn record_fault(&mut self, kind: FrameError, now_ms: u64) -> bool {
        match self.state {
            HealthState::Healthy => {
                warn!("health: fault episode started ({kind})");
                self.state = HealthState::Faulting { since_ms: now_ms };
                self.grace_deadline = Some(Deadline::after(now_ms, self.grace_ms));
                false
            }
            HealthState::Faulting { since_ms } => {
                let expired = self
                    .grace_deadline
                    .is_some_and(|d| d.expired(now_ms));
                if expired && !self.escalated {
                    self.escalated = true;
                    error!(
                        "health: faults sustained for {} ms (since {}), escalating",
                        now_ms.saturating_sub(since_ms),
                        since_ms
                    );
                    return true;
                }
                false
            }
        }
    }

    /// Record a cycle that produced a valid reading.
    /// Ends any fault episode immediately and re-arms escalation.
    pub fn record_success(&mut self) {
        if self.state.in_error() {
            info!("health: fault episode cleared");
        }
        self.state = HealthState::Healthy;
        self.grace_deadline = None;
        self.escalated = false;
    }

    /// Current health state.
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// True while a fault episode is in progress.
    pub fn in_error(&self) -> bool {
        self.state.in_error()
    }
}
