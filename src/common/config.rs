// src/common/config.rs

use core::time::Duration;

/// Parity setting for the serial link.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Communication parameters for the sensor's serial link.
///
/// The sensor always speaks 19200 baud, 8 data bits, no parity, 1 stop bit;
/// only the read timeout differs between the two modes. The struct is an
/// immutable value handed to whoever constructs the port - the driver itself
/// never reconfigures a live link.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: u8,
    /// Per-read timeout the transport should apply.
    pub read_timeout: Duration,
}

impl SerialConfig {
    /// Link parameters for polled register-read sessions.
    pub const fn polled() -> Self {
        SerialConfig {
            baud_rate: 19_200,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1,
            read_timeout: POLLED_READ_TIMEOUT,
        }
    }

    /// Link parameters for continuous streaming sessions.
    pub const fn streaming() -> Self {
        SerialConfig {
            baud_rate: 19_200,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1,
            read_timeout: STREAMING_READ_TIMEOUT,
        }
    }
}

// === Byte Timing at 19200 Baud (8N1) ===
// 1 start bit + 8 data bits + 1 stop bit = 10 bits per byte
// Time per byte = 10 / 19200 s = 520.8 us

/// Nominal duration of a single byte (10 bits total) at 19200 baud.
pub const BYTE_DURATION: Duration = Duration::from_micros(521);

// === Read Timeouts ===

/// Per-read timeout in polled mode.
pub const POLLED_READ_TIMEOUT: Duration = Duration::from_millis(200);

/// Per-read timeout while waiting for the first byte of a streamed chunk.
/// The sensor emits roughly 100 frames per second once streaming; a full
/// second of silence means the stream is gone.
pub const STREAMING_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Timeout for bytes after the first of a chunk. Consecutive bytes of one
/// frame arrive back-to-back on the wire, so anything much beyond a few
/// byte times is a stall.
pub const INTER_BYTE_TIMEOUT: Duration = Duration::from_millis(20);
