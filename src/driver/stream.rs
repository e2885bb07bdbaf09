// src/driver/stream.rs

use crate::common::codec::{decode_stream_word, quantize};
use crate::common::config::{INTER_BYTE_TIMEOUT, STREAMING_READ_TIMEOUT};
use crate::common::error::Ft300Error;
use crate::common::frame::StreamFrame;
use crate::common::hal_traits::{Ft300Serial, Ft300Timer};
use crate::common::protocol::{FRAME_LEN, START_MARKER};
use crate::common::types::{Axis, Measurement, StreamSample};
use crate::driver::io::blocking_io_with_timeout;
use arrayvec::ArrayVec;
use core::time::Duration;

/// Reassembles fixed-length frames from the raw streaming byte stream.
///
/// The stream carries no length field and no addressing; the only reliable
/// message boundary is the two-byte start marker. Reads are delimited on
/// the marker pair, and the marker closing a chunk opens the frame carried
/// by that chunk (see [`StreamFrame::from_marker_terminated`]).
pub struct FrameSync<IF> {
    link: IF,
}

impl<IF> FrameSync<IF>
where
    IF: Ft300Serial + Ft300Timer,
{
    pub fn new(link: IF) -> Self {
        FrameSync { link }
    }

    /// Discards bytes up to and including the next marker pair.
    ///
    /// The first delimited read after attaching to the stream is a partial
    /// fragment of unknown origin and must be thrown away before frames
    /// can be trusted. Running dry before a marker shows up surfaces as
    /// [`Ft300Error::Timeout`], a transport condition.
    pub fn resync(&mut self) -> Result<(), Ft300Error<IF::Error>> {
        let mut window = [0u8; 2];
        let mut discarded = 0usize;

        loop {
            let byte = self.read_byte(discarded == 0)?;
            window = [window[1], byte];
            discarded += 1;
            if discarded >= 2 && window == START_MARKER {
                log::debug!("synchronized on start marker after {} bytes", discarded);
                return Ok(());
            }
        }
    }

    /// Reads the next marker-delimited chunk and rebuilds the logical frame.
    ///
    /// A chunk that cannot fit a frame before the next marker appears, or
    /// that closes early, means the stream lost alignment and is reported
    /// as [`Ft300Error::FrameLength`]. There is no silent re-sync.
    pub fn next_frame(&mut self) -> Result<StreamFrame, Ft300Error<IF::Error>> {
        let mut chunk: ArrayVec<u8, FRAME_LEN> = ArrayVec::new();

        loop {
            let byte = self.read_byte(chunk.is_empty())?;
            if chunk.try_push(byte).is_err() {
                return Err(Ft300Error::FrameLength {
                    expected: FRAME_LEN,
                    got: chunk.len() + 1,
                });
            }

            let len = chunk.len();
            if len >= 2 && chunk[len - 2..] == START_MARKER {
                return StreamFrame::from_marker_terminated(&chunk);
            }
        }
    }

    /// Read-only access to the underlying interface (for its clock).
    pub fn link(&self) -> &IF {
        &self.link
    }

    /// Hands the byte link back.
    pub fn release(self) -> IF {
        self.link
    }

    fn read_byte(&mut self, first_of_chunk: bool) -> Result<u8, Ft300Error<IF::Error>> {
        // Frames arrive back-to-back once streaming; only the first byte of
        // a chunk may legitimately keep us waiting.
        let timeout = if first_of_chunk {
            STREAMING_READ_TIMEOUT
        } else {
            INTER_BYTE_TIMEOUT
        };
        blocking_io_with_timeout(&mut self.link, timeout, |iface| iface.read_byte())
    }
}

/// Streaming session lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SessionState {
    /// Created; no bytes consumed yet.
    Idle,
    /// Performing the mandatory warm-up discard.
    WarmingUp,
    /// Capturing the zero-reference frame.
    Zeroing,
    /// Producing zero-corrected samples.
    Streaming,
    /// Terminal: cancelled or failed.
    Stopped,
}

/// Decodes the continuous stream into validated, zero-referenced samples.
///
/// Composes the frame synchronizer with CRC validation and the streaming
/// codec. A CRC or framing failure is fatal to the session - once the
/// stream is desynchronized the remaining bytes cannot be trusted, and
/// recovery means a fresh quiesce and mode entry. Any retry policy lives
/// with the caller that restarts sessions, not here.
pub struct StreamDecoder<IF: Ft300Serial + Ft300Timer> {
    sync: FrameSync<IF>,
    state: SessionState,
    zero: Measurement,
    started_at: Option<IF::Instant>,
    samples: u32,
}

impl<IF> StreamDecoder<IF>
where
    IF: Ft300Serial + Ft300Timer,
{
    /// Wraps a byte link that the sensor is already streaming on.
    pub fn new(link: IF) -> Self {
        StreamDecoder {
            sync: FrameSync::new(link),
            state: SessionState::Idle,
            zero: Measurement::ZERO,
            started_at: None,
            samples: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The reading captured from the zero-reference frame, quantized to
    /// two decimals. All zeros until [`StreamDecoder::start`] completes.
    pub fn zero_reference(&self) -> Measurement {
        self.zero
    }

    /// Number of samples produced so far.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Runs the warm-up discard and captures the zero reference.
    ///
    /// The sensor is expected to be at rest when this runs; the first
    /// validated frame becomes the session zero. Fails - and stops the
    /// session - on CRC mismatch, framing loss or transport trouble.
    pub fn start(&mut self) -> Result<(), Ft300Error<IF::Error>> {
        if self.state != SessionState::Idle {
            return Err(Ft300Error::SessionInactive);
        }

        self.started_at = Some(self.sync.link().now());
        self.state = SessionState::WarmingUp;
        if let Err(e) = self.sync.resync() {
            return Err(self.fail(e));
        }

        self.state = SessionState::Zeroing;
        let frame = self.checked_frame()?;
        let mut zero = Measurement::ZERO;
        for axis in Axis::ALL {
            let value = decode_stream_word(frame.raw_word(axis), axis.scale());
            zero.set_axis(axis, quantize(value, 2));
        }
        self.zero = zero;
        self.samples = 0;
        self.state = SessionState::Streaming;
        log::debug!("zero reference captured; streaming");
        Ok(())
    }

    /// Reads, validates and decodes the next frame.
    ///
    /// Any failure here ends the session; afterwards the decoder answers
    /// [`Ft300Error::SessionInactive`] and produces no further samples.
    pub fn next_sample(&mut self) -> Result<StreamSample, Ft300Error<IF::Error>> {
        if self.state != SessionState::Streaming {
            return Err(Ft300Error::SessionInactive);
        }

        let frame = self.checked_frame()?;
        let mut measurement = Measurement::ZERO;
        for axis in Axis::ALL {
            let value = decode_stream_word(frame.raw_word(axis), axis.scale());
            measurement.set_axis(axis, quantize(value - self.zero.axis(axis), 2));
        }

        self.samples += 1;
        Ok(StreamSample {
            measurement,
            frequency_hz: self.frequency(),
            sequence: self.samples,
        })
    }

    /// Drives the session until `cancelled` answers true or a failure ends
    /// it.
    ///
    /// Cancellation is cooperative: the flag is observed between completed
    /// frames only, never mid-read, and terminates the session cleanly
    /// with `Ok(())`. Transport and protocol failures come back as the
    /// error after the session has moved to [`SessionState::Stopped`].
    pub fn run<C, S>(&mut self, mut cancelled: C, mut sink: S) -> Result<(), Ft300Error<IF::Error>>
    where
        C: FnMut() -> bool,
        S: FnMut(StreamSample),
    {
        if self.state == SessionState::Idle {
            self.start()?;
        }

        loop {
            if cancelled() {
                log::debug!("streaming session cancelled after {} samples", self.samples);
                self.state = SessionState::Stopped;
                return Ok(());
            }
            sink(self.next_sample()?);
        }
    }

    /// Hands the byte link back, ending the session.
    pub fn release(self) -> IF {
        self.sync.release()
    }

    fn checked_frame(&mut self) -> Result<StreamFrame, Ft300Error<IF::Error>> {
        let frame = match self.sync.next_frame() {
            Ok(frame) => frame,
            Err(e) => return Err(self.fail(e)),
        };
        if let Err(e) = frame.verify_crc() {
            log::warn!("frame failed CRC check; stopping session");
            return Err(self.fail(e));
        }
        Ok(frame)
    }

    /// Average session rate in whole hertz.
    fn frequency(&self) -> u32 {
        let started_at = match self.started_at {
            Some(instant) => instant,
            None => return 0,
        };
        let elapsed: Duration = self.sync.link().now() - started_at;
        let elapsed_ms = elapsed.as_millis() as u64;
        if elapsed_ms == 0 {
            return 0;
        }
        ((self.samples as u64 * 1000 + elapsed_ms / 2) / elapsed_ms) as u32
    }

    fn fail(&mut self, error: Ft300Error<IF::Error>) -> Ft300Error<IF::Error> {
        self.state = SessionState::Stopped;
        error
    }
}
