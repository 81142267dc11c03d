//! Mock hardware adapters for integration tests.
//!
//! Records every emitted event so tests can assert on the full outcome
//! history without touching a real UART or the wall clock.

use std::cell::Cell;
use std::collections::VecDeque;

use aqimon::app::events::AppEvent;
use aqimon::app::ports::{Clock, EventSink, SerialPort};
use aqimon::frame::BODY_LEN;

// ── MockSerial ────────────────────────────────────────────────

/// In-memory serial link fed by the test.
pub struct MockSerial {
    rx: VecDeque<u8>,
    /// Count of `drain` calls, to verify each cycle starts fresh.
    pub drains: usize,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            drains: 0,
        }
    }

    /// Queue raw bytes on the link.
    pub fn push(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Queue one complete, well-formed frame with the given PM values.
    pub fn push_frame(&mut self, pm1_0: u16, pm2_5: u16, pm10: u16) {
        let mut body = [0u8; BODY_LEN];
        body[8..10].copy_from_slice(&pm1_0.to_be_bytes());
        body[10..12].copy_from_slice(&pm2_5.to_be_bytes());
        body[12..14].copy_from_slice(&pm10.to_be_bytes());
        self.push(&[0x42, 0x4D]);
        self.push(&body);
    }
}

impl Default for MockSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for MockSerial {
    fn drain(&mut self) {
        // The mock keeps queued test data across the drain: tests queue
        // exactly the bytes one cycle should see.
        self.drains += 1;
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}

// ── FakeClock ─────────────────────────────────────────────────

/// Deterministic clock that advances a fixed step per query, so the
/// reader's deadline polls always terminate without real delays.
pub struct FakeClock {
    now: Cell<u64>,
    step: u64,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn new(step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }

    /// Jump the clock forward (e.g. to simulate one second per cycle).
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step);
        t
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Sink that stores every event for later assertions.
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn reports(&self) -> Vec<&aqimon::app::events::SensorReport> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Report(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn fault_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::CycleFault { .. }))
            .count()
    }

    pub fn escalations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::EscalationRequested { .. }))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
