//! Escalation scenarios driven through the full service, one simulated
//! second per cycle.
//!
//! Faults are injected as corrupt headers rather than silence: a header
//! mismatch fails immediately, so the fake clock (step 0 here) only
//! moves when the test advances it and every cycle lands on an exact
//! second boundary.

use crate::mock_hw::{FakeClock, MockSerial, RecordingSink};

use aqimon::app::events::AppEvent;
use aqimon::app::service::AppService;
use aqimon::config::SystemConfig;
use aqimon::health::HealthState;

/// One faulting cycle: corrupt header on the link, then one second passes.
fn fault_cycle(
    app: &mut AppService,
    serial: &mut MockSerial,
    clock: &FakeClock,
    sink: &mut RecordingSink,
) {
    serial.push(&[0xFF, 0xFF]);
    app.tick(serial, clock, sink);
    clock.advance(1000);
}

fn good_cycle(
    app: &mut AppService,
    serial: &mut MockSerial,
    clock: &FakeClock,
    sink: &mut RecordingSink,
) {
    serial.push_frame(5, 10, 20);
    app.tick(serial, clock, sink);
    clock.advance(1000);
}

#[test]
fn escalation_fires_after_thirty_seconds_of_faults() {
    let mut app = AppService::new(&SystemConfig::default());
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(0);
    let mut sink = RecordingSink::new();

    // Faults at t = 0 s .. 29 s: still inside the grace period.
    for _ in 0..30 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
        assert!(!app.take_escalation(), "no escalation before 30 s");
    }
    assert_eq!(sink.escalations(), 0);

    // The fault at t = 30 s crosses the grace deadline.
    fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    assert!(app.take_escalation());
    assert_eq!(sink.escalations(), 1);
    assert!(matches!(
        app.health(),
        HealthState::Faulting { since_ms: 0 }
    ));
}

#[test]
fn escalation_event_carries_episode_duration() {
    let mut app = AppService::new(&SystemConfig::default());
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(0);
    let mut sink = RecordingSink::new();

    for _ in 0..=30 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    }

    let faulting = sink.events.iter().find_map(|e| match e {
        AppEvent::EscalationRequested { faulting_ms } => Some(*faulting_ms),
        _ => None,
    });
    assert_eq!(faulting, Some(30_000));
}

#[test]
fn escalation_fires_at_most_once_per_episode() {
    let mut app = AppService::new(&SystemConfig::default());
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(0);
    let mut sink = RecordingSink::new();

    // Two minutes of continuous faults: one escalation, many fault events.
    for _ in 0..120 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    }
    assert_eq!(sink.escalations(), 1);
    assert_eq!(sink.fault_count(), 120);
}

#[test]
fn one_good_reading_resets_the_grace_period() {
    let mut app = AppService::new(&SystemConfig::default());
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(0);
    let mut sink = RecordingSink::new();

    // 15 s of faults, then a single recovery.
    for _ in 0..15 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    }
    good_cycle(&mut app, &mut serial, &clock, &mut sink);
    assert_eq!(app.health(), HealthState::Healthy);

    // A fresh episode must accumulate its own full 30 s.
    for _ in 0..30 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
        assert!(!app.take_escalation());
    }
    fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    assert!(app.take_escalation());
}

#[test]
fn recovery_after_escalation_rearms_the_latch() {
    let mut app = AppService::new(&SystemConfig::default());
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(0);
    let mut sink = RecordingSink::new();

    for _ in 0..=30 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    }
    assert!(app.take_escalation());

    good_cycle(&mut app, &mut serial, &clock, &mut sink);

    for _ in 0..=30 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    }
    assert!(app.take_escalation(), "second episode escalates on its own");
    assert_eq!(sink.escalations(), 2);
}

#[test]
fn take_escalation_consumes_the_latch() {
    let mut app = AppService::new(&SystemConfig::default());
    let mut serial = MockSerial::new();
    let clock = FakeClock::new(0);
    let mut sink = RecordingSink::new();

    for _ in 0..=30 {
        fault_cycle(&mut app, &mut serial, &clock, &mut sink);
    }
    assert!(app.take_escalation());
    assert!(!app.take_escalation(), "latch is single-shot");
}
