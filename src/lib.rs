// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(test)]
extern crate std;

pub mod common;
pub mod driver;

// Re-export key types for convenience
pub use common::error::Ft300Error;
pub use common::types::{Measurement, StreamSample};
pub use driver::polled::Sampler;
pub use driver::stream::{SessionState, StreamDecoder};
