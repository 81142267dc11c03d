//! Cloud property cache sink.
//!
//! The reference device registers four read-only cloud properties —
//! `aQI`, `pM1`, `pM2_5`, `pM10` — refreshed on a 5-second period. This
//! adapter is the boundary to that world: it caches the newest report
//! from the core and hands a JSON property payload to the main loop on
//! each cloud-sync tick. Session management (connect, auth, upload)
//! belongs to the cloud client and is out of scope here.

use serde::Serialize;

use crate::app::events::{AppEvent, SensorReport};
use crate::app::ports::EventSink;

/// Property set mirrored to the cloud, named as registered device-side.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CloudProperties {
    #[serde(rename = "aQI")]
    pub aqi: i32,
    #[serde(rename = "pM1")]
    pub pm1: u16,
    #[serde(rename = "pM2_5")]
    pub pm2_5: u16,
    #[serde(rename = "pM10")]
    pub pm10: u16,
}

impl From<&SensorReport> for CloudProperties {
    fn from(r: &SensorReport) -> Self {
        Self {
            aqi: r.aqi.aqi,
            pm1: r.reading.pm1_0,
            pm2_5: r.reading.pm2_5,
            pm10: r.reading.pm10,
        }
    }
}

/// Caches the latest report between cloud-sync ticks.
///
/// The cache is dirty only after a successful cycle: faults don't
/// produce property updates (the cloud keeps showing the last good
/// values, exactly like the reference device).
#[derive(Default)]
pub struct CloudPropertySink {
    latest: Option<CloudProperties>,
    dirty: bool,
}

impl CloudPropertySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending property update, if any, clearing the dirty flag.
    pub fn take_if_dirty(&mut self) -> Option<CloudProperties> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.latest
    }

    /// Latest cached properties regardless of dirtiness.
    pub fn latest(&self) -> Option<CloudProperties> {
        self.latest
    }

    /// Serialise a property set to the JSON payload the uploader expects.
    pub fn to_json(props: &CloudProperties) -> Option<String> {
        serde_json::to_string(props).ok()
    }
}

impl EventSink for CloudPropertySink {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Report(report) = event {
            self.latest = Some(CloudProperties::from(report));
            self.dirty = true;
        }
    }
}
