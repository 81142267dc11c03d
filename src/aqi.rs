//! EPA piecewise-linear AQI conversion.
//!
//! Each pollutant has an ordered table of breakpoints mapping a closed
//! concentration range onto a closed index range. A concentration is
//! converted by linear interpolation within the first (and, for the
//! well-formed tables shipped here, only) segment that contains it.
//!
//! Tables use the integer µg/m³ ranges: consecutive segments are
//! contiguous and non-overlapping, so every in-domain concentration
//! matches exactly one segment. Behaviour over malformed tables (gaps or
//! overlaps) is undefined — first match wins, nothing more is promised.

use crate::frame::Reading;

/// Sentinel for "concentration outside all known breakpoints".
///
/// Participates in [`final_aqi`]'s max as the smallest value: a single
/// out-of-range pollutant never masks a valid reading from the other.
pub const OUT_OF_RANGE: i32 = -1;

// ---------------------------------------------------------------------------
// Breakpoint tables
// ---------------------------------------------------------------------------

/// One linear segment of the AQI transform (all bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub c_low: u16,
    pub c_high: u16,
    pub i_low: i32,
    pub i_high: i32,
}

const fn bp(c_low: u16, c_high: u16, i_low: i32, i_high: i32) -> Breakpoint {
    Breakpoint {
        c_low,
        c_high,
        i_low,
        i_high,
    }
}

/// PM2.5 breakpoints — valid concentration domain 0–500 µg/m³.
pub const PM2_5_BREAKPOINTS: [Breakpoint; 7] = [
    bp(0, 12, 0, 50),
    bp(13, 35, 51, 100),
    bp(36, 55, 101, 150),
    bp(56, 150, 151, 200),
    bp(151, 250, 201, 300),
    bp(251, 350, 301, 400),
    bp(351, 500, 401, 500),
];

/// PM10 breakpoints — valid concentration domain 0–604 µg/m³.
pub const PM10_BREAKPOINTS: [Breakpoint; 7] = [
    bp(0, 54, 0, 50),
    bp(55, 154, 51, 100),
    bp(155, 254, 101, 150),
    bp(255, 354, 151, 200),
    bp(355, 424, 201, 300),
    bp(425, 504, 301, 400),
    bp(505, 604, 401, 500),
];

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Map a concentration to its sub-index via the given table.
///
/// Scans in table order; both range ends are inclusive. Interpolation is
/// integer with truncating division, matching the reference device.
/// Returns [`OUT_OF_RANGE`] when no segment contains `c`.
pub fn index_for(c: u16, table: &[Breakpoint]) -> i32 {
    for seg in table {
        if c >= seg.c_low && c <= seg.c_high {
            let c = i32::from(c);
            let c_low = i32::from(seg.c_low);
            let c_high = i32::from(seg.c_high);
            return seg.i_low + (c - c_low) * (seg.i_high - seg.i_low) / (c_high - c_low);
        }
    }
    OUT_OF_RANGE
}

/// Combine two sub-indices into the final AQI: the worse pollutant wins.
///
/// The sentinel is numerically below every valid index, so a plain max
/// propagates it only when **both** inputs are out of range.
pub fn final_aqi(sub_pm25: i32, sub_pm10: i32) -> i32 {
    sub_pm25.max(sub_pm10)
}

/// Per-pollutant sub-indices plus the combined AQI for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiResult {
    pub sub_pm25: i32,
    pub sub_pm10: i32,
    pub aqi: i32,
}

/// Convert a decoded reading into its AQI result.
pub fn compute(reading: &Reading) -> AqiResult {
    let sub_pm25 = index_for(reading.pm2_5, &PM2_5_BREAKPOINTS);
    let sub_pm10 = index_for(reading.pm10, &PM10_BREAKPOINTS);
    AqiResult {
        sub_pm25,
        sub_pm10,
        aqi: final_aqi(sub_pm25, sub_pm10),
    }
}
