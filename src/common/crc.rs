// src/common/crc.rs

use super::error::Ft300Error;
use crate::common::protocol::{CRC_COVERED_LEN, FRAME_LEN};
use crc::{Algorithm, Crc};

/// CRC algorithm used by the streamed frames (CRC-16/MODBUS).
/// Polynomial: 0x8005 (normal representation of 0xA001 reversed)
/// Initial Value: 0xFFFF
/// Input Reflected: true
/// Output Reflected: true
/// Final XOR: 0x0000
/// Check Value: 0x4B37 (for "123456789") - standard for CRC-16/MODBUS
/// Residue: 0x0000
pub const FT300_CRC: Algorithm<u16> = Algorithm {
    poly: 0x8005,
    init: 0xFFFF,
    refin: true,
    refout: true,
    xorout: 0x0000,
    check: 0x4B37,
    width: 16,
    residue: 0x0000,
};

// Create a Crc instance for the frame algorithm for reuse.
const CRC_COMPUTER: Crc<u16> = Crc::<u16>::new(&FT300_CRC);

/// Calculates the CRC-16/MODBUS checksum for the given data buffer.
///
/// For a streamed frame this always runs over the first 14 bytes (marker
/// plus the six raw axis words); there is no partial or streaming CRC state.
#[inline]
pub fn calculate_crc16(data: &[u8]) -> u16 {
    CRC_COMPUTER.checksum(data)
}

/// Reads the checksum embedded in a frame (bytes 14..16, LSB first).
pub fn embedded_crc(frame: &[u8; FRAME_LEN]) -> u16 {
    u16::from_le_bytes([frame[CRC_COVERED_LEN], frame[CRC_COVERED_LEN + 1]])
}

/// Verifies the embedded checksum of a complete 16-byte frame.
///
/// # Returns
///
/// * `Ok(())` if the CRC matches.
/// * `Err(Ft300Error::CrcMismatch)` with both values otherwise.
pub fn verify_frame_crc<E>(frame: &[u8; FRAME_LEN]) -> Result<(), Ft300Error<E>>
where
    E: core::fmt::Debug,
{
    let calculated = calculate_crc16(&frame[..CRC_COVERED_LEN]);
    let expected = embedded_crc(frame);

    if calculated == expected {
        Ok(())
    } else {
        Err(Ft300Error::CrcMismatch { expected, calculated })
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    // Mock error type for the verify function's generic parameter
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MockIoError;

    /// A CRC-valid frame: marker, raw words (100, -200, 300, 50, -80, 0),
    /// checksum 0x6ED7.
    const GOOD_FRAME: [u8; FRAME_LEN] = [
        0x20, 0x4E, 0x64, 0x00, 0x38, 0xFF, 0x2C, 0x01, 0x32, 0x00, 0xB0, 0xFF, 0x00, 0x00,
        0xD7, 0x6E,
    ];

    #[test]
    fn matches_published_check_value() {
        // The standard CRC-16/MODBUS check input.
        assert_eq!(calculate_crc16(b"123456789"), 0x4B37);
    }

    #[test]
    fn matches_independent_implementation() {
        // A classic read-holding-registers request, CRC computed with a
        // separate bitwise CRC-16/MODBUS implementation.
        assert_eq!(
            calculate_crc16(&[0x01, 0x03, 0x00, 0x00, 0x00, 0x0A]),
            0xCDC5
        );
    }

    #[test]
    fn empty_payload_yields_initial_value() {
        assert_eq!(calculate_crc16(&[]), 0xFFFF);
    }

    #[test]
    fn well_formed_frame_verifies() {
        assert_eq!(embedded_crc(&GOOD_FRAME), 0x6ED7);
        assert!(verify_frame_crc::<MockIoError>(&GOOD_FRAME).is_ok());
    }

    #[test]
    fn single_bit_flips_are_detected() {
        // Flip each bit of the covered region in turn; every corruption
        // must be caught.
        for byte in 0..CRC_COVERED_LEN {
            for bit in 0..8 {
                let mut frame = GOOD_FRAME;
                frame[byte] ^= 1 << bit;
                assert!(
                    matches!(
                        verify_frame_crc::<MockIoError>(&frame),
                        Err(Ft300Error::CrcMismatch { .. })
                    ),
                    "flip of byte {} bit {} went undetected",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn corrupted_checksum_is_detected() {
        let mut frame = GOOD_FRAME;
        frame[FRAME_LEN - 1] ^= 0x01;
        let result = verify_frame_crc::<MockIoError>(&frame);
        assert!(matches!(
            result,
            Err(Ft300Error::CrcMismatch { expected: _, calculated: 0x6ED7 })
        ));
    }
}
