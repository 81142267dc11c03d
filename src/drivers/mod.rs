//! Hardware drivers outside the port-trait boundary.

pub mod watchdog;
