//! Unified error types for the AQIMon firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling uniform.
//! All variants are `Copy` so they can be cheaply passed through the health
//! monitor and event sinks without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor frame could not be acquired from the serial link.
    Frame(FrameError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Frame acquisition faults
// ---------------------------------------------------------------------------

/// Faults raised by a single `FrameReader::acquire` call.
///
/// Each fault is local to one cycle and non-fatal: the controller reports
/// it once, feeds the health monitor, and moves on to the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer than 2 bytes arrived within the configured deadline.
    Timeout,
    /// Two bytes arrived but did not match the sync sequence.
    /// Carries the mismatched (and consumed) bytes for diagnostics.
    BadHeader([u8; 2]),
    /// The 30-byte body could not be completed before the deadline.
    /// Carries the number of body bytes actually read.
    ShortRead(usize),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "sync header timeout"),
            Self::BadHeader([a, b]) => write!(f, "bad header {a:#04x} {b:#04x}"),
            Self::ShortRead(n) => write!(f, "short body read ({n} bytes)"),
        }
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
