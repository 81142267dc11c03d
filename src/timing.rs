//! Deadline helper for wall-clock timeouts.
//!
//! Both time bounds in the system (the serial read timeout and the fault
//! grace period) are "deadline computed once, expiry checked against a
//! monotonically increasing tick" — never inline arithmetic on a
//! free-running counter, which is where rollover bugs live.
//!
//! Timestamps are monotonic milliseconds from a [`Clock`](crate::app::ports::Clock)
//! port; u64 millis do not wrap within the lifetime of the hardware.

/// A point in monotonic time after which something has expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at_ms: u64,
}

impl Deadline {
    /// Compute a deadline `timeout_ms` from `now_ms`.
    pub fn after(now_ms: u64, timeout_ms: u32) -> Self {
        Self {
            expires_at_ms: now_ms.saturating_add(u64::from(timeout_ms)),
        }
    }

    /// True once the clock has reached or passed the deadline.
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Milliseconds left before expiry (0 if already expired).
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms)
    }
}
