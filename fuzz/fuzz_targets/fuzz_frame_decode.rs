//! Fuzz target: frame decoding and AQI conversion.
//!
//! Treats arbitrary 30-byte inputs as frame bodies and asserts the
//! decode → convert path never panics and always yields indices in the
//! sentinel-or-[0, 500] range.
//!
//! cargo fuzz run fuzz_frame_decode

#![no_main]

use aqimon::aqi::{self, OUT_OF_RANGE};
use aqimon::frame::{self, RawFrame, BODY_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < BODY_LEN {
        return;
    }
    let mut body = [0u8; BODY_LEN];
    body.copy_from_slice(&data[..BODY_LEN]);

    let reading = frame::decode(&RawFrame::new(body));
    let result = aqi::compute(&reading);

    for idx in [result.sub_pm25, result.sub_pm10, result.aqi] {
        assert!(
            idx == OUT_OF_RANGE || (0..=500).contains(&idx),
            "index {idx} outside sentinel-or-scale range"
        );
    }
    assert_eq!(result.aqi, result.sub_pm25.max(result.sub_pm10));
});
