//! Plantower serial frame acquisition and decoding.
//!
//! Wire format (must interoperate bit-exact with the physical sensor):
//! ```text
//! ┌──────────────┬───────────────────────────────┐
//! │ Sync (2 B)   │ Body (30 B)                   │
//! │ 0x42 0x4D    │ PM fields at fixed offsets    │
//! └──────────────┴───────────────────────────────┘
//! ```
//! Body offsets (0-indexed, big-endian u16): 8–9 = PM1.0, 10–11 = PM2.5,
//! 12–13 = PM10. The remaining bytes are unused by this firmware.
//!
//! Acquisition is a deadline-bounded busy-poll — the sensor pushes a frame
//! roughly once a second and the link has no flow control, so each cycle
//! drains stale bytes and re-synchronises on the header.

use log::debug;

use crate::app::ports::{Clock, SerialPort};
use crate::error::FrameError;
use crate::timing::Deadline;

/// The 2-byte sync sequence preceding every frame.
pub const SYNC: [u8; 2] = [0x42, 0x4D];

/// Fixed body length following the sync header.
pub const BODY_LEN: usize = 30;

// ---------------------------------------------------------------------------
// RawFrame
// ---------------------------------------------------------------------------

/// One captured 30-byte frame body, header already validated and stripped.
///
/// Owned by the cycle that read it; discarded after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame {
    body: [u8; BODY_LEN],
}

impl RawFrame {
    pub fn new(body: [u8; BODY_LEN]) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &[u8; BODY_LEN] {
        &self.body
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Decoded particulate concentrations in µg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reading {
    pub pm1_0: u16,
    pub pm2_5: u16,
    pub pm10: u16,
}

/// Extract the PM fields from a validated frame body.
///
/// Pure and total over any 30-byte input: framing errors upstream produce
/// garbage values, not panics (accepted limitation of the protocol —
/// the body carries no checksum the sensor firmware honours reliably).
pub fn decode(frame: &RawFrame) -> Reading {
    let b = frame.body();
    let be16 = |hi: usize, lo: usize| u16::from(b[hi]) << 8 | u16::from(b[lo]);
    Reading {
        pm1_0: be16(8, 9),
        pm2_5: be16(10, 11),
        pm10: be16(12, 13),
    }
}

// ---------------------------------------------------------------------------
// FrameReader
// ---------------------------------------------------------------------------

/// Acquires one frame per call from a [`SerialPort`].
///
/// No retries inside `acquire`: each fault is reported exactly once per
/// call and the caller (the cycle controller) decides whether to retry —
/// which it does implicitly, on the next scheduled cycle.
pub struct FrameReader {
    timeout_ms: u32,
}

impl FrameReader {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    /// Acquire a single frame: drain → sync on header → read body.
    ///
    /// The whole call is bounded by one deadline. A body that cannot be
    /// completed before the deadline yields [`FrameError::ShortRead`]
    /// (the reference hardware always completes it; see DESIGN.md).
    pub fn acquire(
        &self,
        serial: &mut impl SerialPort,
        clock: &impl Clock,
    ) -> Result<RawFrame, FrameError> {
        serial.drain();
        let deadline = Deadline::after(clock.now_ms(), self.timeout_ms);

        // Busy-poll for the 2 header bytes. Single-threaded by design:
        // nothing else runs while we wait, matching the target's one
        // cooperative loop.
        while serial.available() < SYNC.len() {
            if deadline.expired(clock.now_ms()) {
                return Err(FrameError::Timeout);
            }
        }

        let mut header = [0u8; 2];
        let mut got = 0;
        while got < header.len() {
            got += serial.read(&mut header[got..]);
            // available() and read() may disagree on a misbehaving port;
            // the deadline bounds this loop like the body read below.
            if got < header.len() && deadline.expired(clock.now_ms()) {
                return Err(FrameError::Timeout);
            }
        }
        if header != SYNC {
            // Mismatched bytes stay consumed; the next cycle re-syncs.
            debug!("frame: header mismatch {:#04x} {:#04x}", header[0], header[1]);
            return Err(FrameError::BadHeader(header));
        }

        let mut body = [0u8; BODY_LEN];
        let mut filled = 0;
        while filled < BODY_LEN {
            filled += serial.read(&mut body[filled..]);
            if filled < BODY_LEN && deadline.expired(clock.now_ms()) {
                return Err(FrameError::ShortRead(filled));
            }
        }

        Ok(RawFrame::new(body))
    }
}
