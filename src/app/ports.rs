//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the sensor UART, the system timer, event sinks)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and owns no global mutable state.

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: sensor UART → domain)
// ───────────────────────────────────────────────────────────────

/// Byte-stream source for the particulate sensor link.
///
/// All methods are non-blocking; the frame reader supplies its own
/// deadline-bounded polling on top.
pub trait SerialPort {
    /// Discard every byte currently buffered on the input.
    /// Each acquisition cycle starts at the link's most recent data.
    fn drain(&mut self);

    /// Number of bytes available to read right now.
    fn available(&self) -> usize;

    /// Read up to `buf.len()` bytes. Returns the number actually read
    /// (possibly 0). Consumed bytes are gone — there is no push-back.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: system timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond tick source.
///
/// Implementations must be monotonic and must never jump backwards;
/// wall-clock adjustments (NTP) must not affect it.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → display / log / cloud)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, cloud
/// property cache, OLED driver, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// Fan-out: a tuple of sinks is itself a sink, so the controller can
// report to any number of consumers without knowing they exist.

impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

impl<A: EventSink, B: EventSink, C: EventSink> EventSink for (A, B, C) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
        self.2.emit(event);
    }
}

impl<S: EventSink> EventSink for &mut S {
    fn emit(&mut self, event: &super::events::AppEvent) {
        (**self).emit(event);
    }
}
