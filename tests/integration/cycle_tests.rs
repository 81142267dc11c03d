//! End-to-end cycle tests: synthetic byte stream → decoded report.

use crate::mock_hw::{FakeClock, MockSerial, RecordingSink};

use aqimon::app::events::AppEvent;
use aqimon::app::service::{AppService, CycleOutcome};
use aqimon::config::SystemConfig;
use aqimon::error::FrameError;
use aqimon::health::HealthState;

fn make_app() -> AppService {
    AppService::new(&SystemConfig::default())
}

#[test]
fn valid_frame_produces_full_report() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(1);
    let mut sink = RecordingSink::new();

    // 35 µg/m³ PM2.5 and 55 µg/m³ PM10 — the reference example.
    serial.push_frame(10, 35, 55);
    let outcome = app.tick(&mut serial, &clock, &mut sink);

    assert_eq!(outcome, CycleOutcome::Report);
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    let r = reports[0];
    assert_eq!(r.reading.pm1_0, 10);
    assert_eq!(r.reading.pm2_5, 35);
    assert_eq!(r.reading.pm10, 55);
    assert_eq!(r.aqi.sub_pm25, 100);
    assert_eq!(r.aqi.sub_pm10, 51);
    assert_eq!(r.aqi.aqi, 100);
    assert_eq!(app.health(), HealthState::Healthy);
}

#[test]
fn each_cycle_drains_the_link_first() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(1);
    let mut sink = RecordingSink::new();

    serial.push_frame(1, 2, 3);
    app.tick(&mut serial, &clock, &mut sink);
    serial.push_frame(4, 5, 6);
    app.tick(&mut serial, &clock, &mut sink);

    assert_eq!(serial.drains, 2);
    assert_eq!(sink.reports().len(), 2);
}

#[test]
fn swapped_header_reports_header_fault() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(1);
    let mut sink = RecordingSink::new();

    serial.push(&[0x4D, 0x42]);
    serial.push(&[0u8; 30]);
    let outcome = app.tick(&mut serial, &clock, &mut sink);

    assert_eq!(outcome, CycleOutcome::Fault);
    assert!(matches!(
        sink.events[0],
        AppEvent::CycleFault {
            kind: FrameError::BadHeader([0x4D, 0x42]),
            health: HealthState::Faulting { .. },
        }
    ));
}

#[test]
fn silent_link_reports_timeout_fault() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(10);
    let mut sink = RecordingSink::new();

    let outcome = app.tick(&mut serial, &clock, &mut sink);

    assert_eq!(outcome, CycleOutcome::Fault);
    assert_eq!(sink.fault_count(), 1);
    assert!(matches!(
        sink.events[0],
        AppEvent::CycleFault {
            kind: FrameError::Timeout,
            ..
        }
    ));
}

#[test]
fn truncated_body_reports_short_read() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(10);
    let mut sink = RecordingSink::new();

    serial.push(&[0x42, 0x4D, 0xAA, 0xBB]);
    app.tick(&mut serial, &clock, &mut sink);

    assert!(matches!(
        sink.events[0],
        AppEvent::CycleFault {
            kind: FrameError::ShortRead(2),
            ..
        }
    ));
}

#[test]
fn fault_then_recovery_round_trip() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(10);
    let mut sink = RecordingSink::new();

    // Cycle 1: nothing on the link.
    app.tick(&mut serial, &clock, &mut sink);
    assert!(app.health().in_error());

    // Cycle 2: a good frame arrives.
    serial.push_frame(5, 12, 54);
    app.tick(&mut serial, &clock, &mut sink);

    assert_eq!(app.health(), HealthState::Healthy);
    let r = sink.reports()[0];
    assert_eq!(r.aqi.sub_pm25, 50);
    assert_eq!(r.aqi.sub_pm10, 50);
    assert_eq!(r.aqi.aqi, 50);
}

#[test]
fn out_of_range_concentrations_yield_sentinel_aqi() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(1);
    let mut sink = RecordingSink::new();

    // Both pollutants beyond their breakpoint domains.
    serial.push_frame(0, 999, 999);
    app.tick(&mut serial, &clock, &mut sink);

    let r = sink.reports()[0];
    assert_eq!(r.aqi.sub_pm25, -1);
    assert_eq!(r.aqi.sub_pm10, -1);
    assert_eq!(r.aqi.aqi, -1, "both out of range means hazard sentinel");
}

#[test]
fn one_valid_pollutant_wins_over_sentinel() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(1);
    let mut sink = RecordingSink::new();

    // PM2.5 out of range, PM10 valid.
    serial.push_frame(0, 999, 154);
    app.tick(&mut serial, &clock, &mut sink);

    let r = sink.reports()[0];
    assert_eq!(r.aqi.sub_pm25, -1);
    assert_eq!(r.aqi.sub_pm10, 100);
    assert_eq!(r.aqi.aqi, 100);
}

#[test]
fn rolling_average_tracks_recent_pm25() {
    let mut app = make_app();
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(1);
    let mut sink = RecordingSink::new();

    for pm in [10u16, 20, 30] {
        serial.push_frame(0, pm, 0);
        app.tick(&mut serial, &clock, &mut sink);
    }

    let reports = sink.reports();
    assert_eq!(reports[2].pm2_5_avg, 20.0);
}
