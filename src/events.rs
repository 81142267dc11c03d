//! Event queue for the control loop.
//!
//! Events are produced by the loop's own pacing counters (control,
//! cloud-sync and telemetry ticks) and by software (escalation requests
//! from the health supervisor), and consumed by the same loop one at a
//! time in FIFO order.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Pacing counters  │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Software         │────▶│  (lock-free) │     │  (consumer)  │
//! └──────────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Producer and consumer both run on the single main task today; the
//! lock-free SPSC shape is kept so a timer-callback producer can be
//! wired in without reworking the storage.

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 16;

/// System event types, ordered by rough priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Health supervisor requested a hard restart (highest priority).
    EscalationRequested = 0,

    /// Sensor acquisition cycle tick (1 Hz).
    ControlTick = 10,

    /// Cloud property sync timer fired (5 s period).
    CloudSyncTick = 20,
    /// Telemetry report timer fired.
    TelemetryTick = 21,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// Atomic head/tail indices enforce the single-producer /
// single-consumer discipline; the buffer lives in a static so a future
// timer-callback producer can reach it without captures.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: push_event and pop_event both run on the single main task, so
// the buffer is never accessed concurrently; the atomics above keep the
// SPSC discipline intact should a second (producer) context appear.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; see buffer invariant above.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; see buffer invariant above.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::EscalationRequested),
        10 => Some(Event::ControlTick),
        20 => Some(Event::CloudSyncTick),
        21 => Some(Event::TelemetryTick),
        _ => None,
    }
}
