//! Host-side integration test harness.
//!
//! Everything here runs on x86_64 with mock adapters — no hardware, no
//! real clock. Each module covers one slice of the acquisition pipeline.

mod mock_hw;

mod cycle_tests;
mod health_tests;
