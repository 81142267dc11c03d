//! GPIO / peripheral pin assignments for the AQIMon board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Particulate sensor (Plantower, 9600 8N1 serial)
// ---------------------------------------------------------------------------

/// UART peripheral wired to the sensor.
pub const SENSOR_UART_PORT: u8 = 1;
/// UART TX → sensor RX (unused by this firmware; the sensor free-runs).
pub const SENSOR_UART_TX_GPIO: i32 = 17;
/// UART RX ← sensor TX.
pub const SENSOR_UART_RX_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// I²C bus (OLED display driven by the downstream display consumer)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
