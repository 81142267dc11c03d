//! AQIMon Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single cooperative polling loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  SensorUart    Esp32Clock    LogEventSink   CloudSink    │
//! │  (SerialPort)  (Clock)       (EventSink)    (EventSink)  │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ──────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            AppService (pure logic)                 │  │
//! │  │  FrameReader · AQI conversion · HealthMonitor      │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  Event queue (1 Hz control tick · 5 s cloud sync)        │
//! │  Watchdog · escalation supervisor (esp_restart)          │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use aqimon::adapters::cloud::CloudPropertySink;
use aqimon::adapters::log_sink::LogEventSink;
use aqimon::adapters::time::Esp32Clock;
use aqimon::adapters::uart::SensorUart;
use aqimon::app::service::AppService;
use aqimon::config::SystemConfig;
use aqimon::drivers::watchdog::Watchdog;
use aqimon::events::{self, Event};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("AQIMon v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    // Persistence is out of scope; the firmware runs from defaults.
    let config = SystemConfig::default();

    // ── 3. Construct adapters ─────────────────────────────────
    let mut serial = match SensorUart::new() {
        Ok(s) => s,
        Err(e) => {
            // No sensor link means nothing to monitor — halt and let
            // the watchdog reset us into another attempt.
            error!("UART init failed: {} — halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };
    let clock = Esp32Clock::new();
    let watchdog = Watchdog::new();

    let mut sinks = (LogEventSink::new(), CloudPropertySink::new());

    // ── 4. Construct app service ──────────────────────────────
    let mut app = AppService::new(&config);
    app.start(&mut sinks);

    info!("System ready. Entering acquisition loop.");

    // ── 5. Acquisition loop ───────────────────────────────────
    let mut cloud_counter: u64 = 0;
    let mut telemetry_counter: u64 = 0;

    loop {
        // One loop iteration per control period. On real hardware the
        // cycle itself blocks on the serial link (the sensor pushes a
        // frame roughly once a second); the sleep paces the idle case.
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));
        events::push_event(Event::ControlTick);

        cloud_counter += 1;
        if cloud_counter >= u64::from(config.cloud_sync_interval_secs) {
            events::push_event(Event::CloudSyncTick);
            cloud_counter = 0;
        }
        telemetry_counter += 1;
        if telemetry_counter >= u64::from(config.telemetry_interval_secs) {
            events::push_event(Event::TelemetryTick);
            telemetry_counter = 0;
        }

        // Process all pending events.
        events::drain_events(|event| match event {
            Event::ControlTick => {
                app.tick(&mut serial, &clock, &mut sinks);
                if app.take_escalation() {
                    events::push_event(Event::EscalationRequested);
                }
            }

            Event::CloudSyncTick => {
                let cloud = &mut sinks.1;
                if let Some(props) = cloud.take_if_dirty() {
                    match CloudPropertySink::to_json(&props) {
                        Some(json) => info!("CLOUD | {}", json),
                        None => warn!("CLOUD | property serialisation failed"),
                    }
                }
            }

            Event::TelemetryTick => {
                info!(
                    "TELEM | cycles={} | health={:?} | avg2.5={:.1}",
                    app.cycle_count(),
                    app.health(),
                    app.pm2_5_avg(),
                );
            }

            Event::EscalationRequested => {
                error!("Sustained sensor outage — restarting");
                restart();
            }
        });

        // Feed watchdog on every iteration.
        watchdog.feed();
    }
}

/// Hard restart, the only exit from the acquisition loop.
#[cfg(target_os = "espidf")]
fn restart() -> ! {
    unsafe { esp_idf_svc::sys::esp_restart() };
    unreachable!()
}

/// Host builds have nothing to restart; ending the process stands in.
#[cfg(not(target_os = "espidf"))]
fn restart() -> ! {
    std::process::exit(1);
}
