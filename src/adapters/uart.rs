//! Sensor UART adapter.
//!
//! Implements [`SerialPort`] for the particulate sensor link (9600 8N1).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: owns a UART driver instance installed on the port/pins
//! from [`pins`](crate::pins) and reads through the driver's RX ring
//! buffer with a zero-tick timeout (non-blocking, as the port contract
//! requires).
//!
//! On host/test: reads from a process-wide injection queue so tests and
//! the simulator can feed synthetic frames byte by byte.

use crate::app::ports::SerialPort;
#[cfg(target_os = "espidf")]
use crate::error::Error;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;
#[cfg(not(target_os = "espidf"))]
use std::sync::Mutex;

#[cfg(not(target_os = "espidf"))]
static SIM_RX: Mutex<VecDeque<u8>> = Mutex::new(VecDeque::new());

/// Inject bytes into the simulated RX buffer (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_push_bytes(bytes: &[u8]) {
    let mut rx = SIM_RX.lock().unwrap();
    rx.extend(bytes.iter().copied());
}

/// Sensor link baud rate — fixed by the sensor hardware.
#[cfg(target_os = "espidf")]
const BAUD_RATE: u32 = 9600;

/// Driver RX ring buffer size. Two full frames plus slack, so a cycle
/// that runs late never loses the freshest frame to overflow.
#[cfg(target_os = "espidf")]
const RX_BUF_SIZE: i32 = 256;

pub struct SensorUart {
    #[cfg(target_os = "espidf")]
    port: u8,
}

impl SensorUart {
    /// Install the UART driver on the sensor port.
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, Error> {
        use esp_idf_svc::sys::*;

        let port = pins::SENSOR_UART_PORT;
        let cfg = uart_config_t {
            baud_rate: BAUD_RATE as i32,
            data_bits: uart_word_length_t_UART_DATA_8_BITS,
            parity: uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };

        // SAFETY: called once from the single main task before any reads;
        // the port number and pins come from the board constants.
        unsafe {
            if uart_param_config(port as i32, &cfg) != ESP_OK {
                return Err(Error::Init("uart_param_config"));
            }
            if uart_set_pin(
                port as i32,
                pins::SENSOR_UART_TX_GPIO,
                pins::SENSOR_UART_RX_GPIO,
                -1,
                -1,
            ) != ESP_OK
            {
                return Err(Error::Init("uart_set_pin"));
            }
            if uart_driver_install(port as i32, RX_BUF_SIZE, 0, 0, core::ptr::null_mut(), 0)
                != ESP_OK
            {
                return Err(Error::Init("uart_driver_install"));
            }
        }

        log::info!("SensorUart: installed on UART{} @ {} baud", port, BAUD_RATE);
        Ok(Self { port })
    }

    /// Host-side simulated UART backed by the injection queue.
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, crate::error::Error> {
        log::info!("SensorUart(sim): reading from injection queue");
        Ok(Self {})
    }
}

#[cfg(target_os = "espidf")]
impl SerialPort for SensorUart {
    fn drain(&mut self) {
        // SAFETY: driver installed in new(); single-task access.
        unsafe {
            esp_idf_svc::sys::uart_flush_input(self.port as i32);
        }
    }

    fn available(&self) -> usize {
        let mut len: usize = 0;
        // SAFETY: driver installed in new(); single-task access.
        let ret = unsafe {
            esp_idf_svc::sys::uart_get_buffered_data_len(self.port as i32, &mut len)
        };
        if ret == esp_idf_svc::sys::ESP_OK { len } else { 0 }
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        // Zero-tick timeout: return whatever the RX ring holds right now.
        // SAFETY: driver installed in new(); single-task access.
        let n = unsafe {
            esp_idf_svc::sys::uart_read_bytes(
                self.port as i32,
                buf.as_mut_ptr().cast(),
                buf.len() as u32,
                0,
            )
        };
        if n > 0 { n as usize } else { 0 }
    }
}

#[cfg(not(target_os = "espidf"))]
impl SerialPort for SensorUart {
    fn drain(&mut self) {
        SIM_RX.lock().unwrap().clear();
    }

    fn available(&self) -> usize {
        SIM_RX.lock().unwrap().len()
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut rx = SIM_RX.lock().unwrap();
        let mut n = 0;
        while n < buf.len() {
            match rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}
