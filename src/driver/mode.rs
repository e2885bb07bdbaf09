// src/driver/mode.rs

//! Mode-transition protocol.
//!
//! The sensor speaks two mutually exclusive modes on the same physical
//! link: polled register reads and a continuous binary stream. While a
//! stream is active the device ignores register traffic, so every mode
//! entry starts by killing any active stream:
//!
//! 1. [`quiesce_stream`] on the raw byte link, then drop/reconfigure it.
//! 2. Either [`Sampler::tare`](crate::driver::polled::Sampler::tare) on
//!    the register channel (polled mode), or [`enable_streaming`] followed
//!    by handing a fresh byte link to
//!    [`StreamDecoder::new`](crate::driver::stream::StreamDecoder::new).
//!
//! Switching modes later requires a fresh [`quiesce_stream`]. The port
//! teardown between the raw-byte role and the register-channel role
//! belongs to the caller, which owns port construction.

use crate::common::config::BYTE_DURATION;
use crate::common::error::Ft300Error;
use crate::common::hal_traits::{Ft300Serial, Ft300Timer, RegisterBus};
use crate::common::protocol::{
    QUIESCE_BYTE, QUIESCE_SEQUENCE_LEN, STREAM_CONTROL_REGISTER, STREAM_ENABLE_WORD,
};
use crate::driver::io::blocking_io_with_timeout;
use core::time::Duration;

/// Interrupts any active stream by writing a run of `0xFF` bytes.
///
/// The firmware stops streaming once the line has carried about half a
/// second of interruption; no acknowledgement is sent and nothing is read
/// back. Must complete before any register-channel operation is attempted.
pub fn quiesce_stream<IF>(link: &mut IF) -> Result<(), Ft300Error<IF::Error>>
where
    IF: Ft300Serial + Ft300Timer,
{
    log::debug!(
        "interrupting stream with {} break bytes",
        QUIESCE_SEQUENCE_LEN
    );

    // Allow for the whole sequence to drain plus a fixed margin.
    let write_timeout = BYTE_DURATION * QUIESCE_SEQUENCE_LEN as u32 + Duration::from_millis(20);

    for _ in 0..QUIESCE_SEQUENCE_LEN {
        blocking_io_with_timeout(link, write_timeout, |iface| iface.write_byte(QUIESCE_BYTE))?;
    }

    blocking_io_with_timeout(link, Duration::from_millis(10), |iface| iface.flush())
}

/// Switches the sensor into streaming mode.
///
/// Writes the stream-enable word to the control register. The device
/// starts emitting frames immediately; release the register channel and
/// hand a byte link to the stream decoder.
pub fn enable_streaming<REG>(bus: &mut REG) -> Result<(), Ft300Error<REG::Error>>
where
    REG: RegisterBus,
{
    log::debug!(
        "enabling streaming (register {} <- {:#06x})",
        STREAM_CONTROL_REGISTER,
        STREAM_ENABLE_WORD
    );
    bus.write_register(STREAM_CONTROL_REGISTER, STREAM_ENABLE_WORD)
        .map_err(Ft300Error::Io)
}
