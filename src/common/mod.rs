// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod codec;
pub mod config;
pub mod crc;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod protocol;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From codec.rs
pub use codec::{decode_register, decode_stream_word, quantize};

// From config.rs
pub use config::{Parity, SerialConfig};

// From crc.rs
pub use crc::{calculate_crc16, verify_frame_crc};

// From error.rs
pub use error::Ft300Error;

// From frame.rs
pub use frame::StreamFrame;

// From hal_traits.rs
pub use hal_traits::{Ft300Instant, Ft300Serial, Ft300Timer, RegisterBus};

// From protocol.rs (constants - users can access via common::protocol::*)
// No re-exports by default.

// From types.rs
pub use types::{Axis, Measurement, StreamSample};
