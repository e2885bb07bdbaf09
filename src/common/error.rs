// src/common/error.rs

#[derive(Debug, thiserror::Error)]
pub enum Ft300Error<E = ()>
where
    E: core::fmt::Debug, // Need Debug for the generic Io error
{
    /// Underlying I/O error from the byte transport or register channel.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// Operation timed out.
    #[error("Operation timed out")]
    Timeout,

    /// Received CRC does not match calculated CRC.
    #[error("CRC mismatch: expected {expected:#06x}, calculated {calculated:#06x}")]
    CrcMismatch { expected: u16, calculated: u16 },

    /// Reassembled frame does not have the expected length.
    #[error("Frame length mismatch: expected {expected} bytes, got {got}")]
    FrameLength { expected: usize, got: usize },

    /// The streaming session is not in a state that can produce samples.
    #[error("Streaming session is not active")]
    SessionInactive,
}

impl<E: core::fmt::Debug> Ft300Error<E> {
    /// Protocol-level failure: the byte stream can no longer be trusted and
    /// there is no in-place recovery. Fatal to the owning session.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Ft300Error::CrcMismatch { .. } | Ft300Error::FrameLength { .. }
        )
    }

    /// Transport-level failure. A polled caller may retry at the next tick
    /// boundary; the streaming decoder treats it as session-fatal.
    pub fn is_transport(&self) -> bool {
        matches!(self, Ft300Error::Io(_) | Ft300Error::Timeout)
    }
}

// Allow mapping from an underlying channel error
impl<E: core::fmt::Debug> From<E> for Ft300Error<E> {
    fn from(e: E) -> Self {
        Ft300Error::Io(e)
    }
}
