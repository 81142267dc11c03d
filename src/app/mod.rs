//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the AQIMon system:
//! per-cycle frame acquisition, AQI conversion, and health supervision.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without a real sensor.

pub mod events;
pub mod ports;
pub mod service;
