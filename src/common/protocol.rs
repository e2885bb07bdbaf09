// src/common/protocol.rs

// Wire-level and register-map constants for the sensor. Values follow the
// vendor manual for the FT300's serial interface.

// === Streaming frame layout ===

/// Two-byte sequence that opens every streamed frame.
pub const START_MARKER: [u8; 2] = [0x20, 0x4E];

/// Total frame length: marker + six raw axis words + CRC.
pub const FRAME_LEN: usize = 16;

/// Bytes covered by the frame checksum (marker + six raw axis words).
pub const CRC_COVERED_LEN: usize = 14;

/// Number of measurement axes (Fx, Fy, Fz, Tx, Ty, Tz).
pub const AXIS_COUNT: usize = 6;

// === Register map ===

/// First of the six consecutive registers holding the raw axis values.
pub const FORCE_TORQUE_BASE_REGISTER: u16 = 180;

/// Control register that switches the sensor into streaming mode.
pub const STREAM_CONTROL_REGISTER: u16 = 410;

/// Value written to [`STREAM_CONTROL_REGISTER`] to start the stream.
pub const STREAM_ENABLE_WORD: u16 = 0x0200;

// === Mode transition ===

/// Byte written repeatedly to interrupt an active stream.
pub const QUIESCE_BYTE: u8 = 0xFF;

/// Number of [`QUIESCE_BYTE`]s to send. The firmware stops streaming once
/// communication is interrupted for about 0.5 s; 50 bytes cover that window.
pub const QUIESCE_SEQUENCE_LEN: usize = 50;

// === Addressing ===

/// Factory-default slave address of the sensor on the RS-485 bus.
pub const DEFAULT_SLAVE_ADDRESS: u8 = 9;
