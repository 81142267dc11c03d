//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                       |
//! |------------|-------------|-----------------------------------|
//! | `uart`     | SerialPort  | ESP-IDF UART / host byte injection|
//! | `time`     | Clock       | ESP32 system timer / `Instant`    |
//! | `log_sink` | EventSink   | Serial log output                 |
//! | `cloud`    | EventSink   | Cloud property cache (aQI, pM*)   |

pub mod cloud;
pub mod log_sink;
pub mod time;
pub mod uart;
