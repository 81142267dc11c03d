//! Fuzz target: frame acquisition over an arbitrary byte stream.
//!
//! Presents fuzzer-chosen bytes as the serial link and asserts that
//! `acquire` always terminates with a frame or a typed fault, for any
//! stream content and length.
//!
//! cargo fuzz run fuzz_frame_acquire

#![no_main]

use std::cell::Cell;

use aqimon::app::ports::{Clock, SerialPort};
use aqimon::error::FrameError;
use aqimon::frame::FrameReader;
use libfuzzer_sys::fuzz_target;

struct BytesSerial<'a> {
    data: &'a [u8],
    pos: usize,
}

impl SerialPort for BytesSerial<'_> {
    fn drain(&mut self) {}

    fn available(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.available());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }
}

// Advances on every query so the deadline poll always terminates.
struct TickClock(Cell<u64>);

impl Clock for TickClock {
    fn now_ms(&self) -> u64 {
        let t = self.0.get();
        self.0.set(t + 100);
        t
    }
}

fuzz_target!(|data: &[u8]| {
    let mut serial = BytesSerial { data, pos: 0 };
    let clock = TickClock(Cell::new(0));
    let reader = FrameReader::new(3000);

    match reader.acquire(&mut serial, &clock) {
        Ok(_) => assert!(data.len() >= 32, "frame from fewer than 32 bytes"),
        Err(FrameError::Timeout | FrameError::BadHeader(_)) => {}
        Err(FrameError::ShortRead(n)) => assert!(n < 30, "short read of a full body"),
    }
});
