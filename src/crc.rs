//! Sensirion CRC-8 used to protect every 16-bit word on the bus.
//!
//! Polynomial: x^8 + x^5 + x^4 + 1 (0x31)
//! Initial value: 0xFF
//! MSB first, no input reflection, no output xor.

use core::fmt;

const CRC8_POLYNOMIAL: u8 = 0x31;
const CRC8_INIT: u8 = 0xFF;

/// The checksum carried by a frame did not match the one computed over its data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChecksumMismatch {
    /// Checksum byte received from the sensor.
    pub expected: u8,
    /// Checksum computed over the received data.
    pub actual: u8,
}

impl fmt::Display for ChecksumMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CRC checksum failed, expected: {:#04x}, got: {:#04x}",
            self.expected, self.actual
        )
    }
}

/// Computes the CRC-8 of `data`.
pub fn compute(data: &[u8]) -> u8 {
    let mut crc = CRC8_INIT;

    for &b in data {
        crc ^= b;
        for _ in 0..8 {
            crc = if (crc & 0x80) != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }

    crc
}

/// Checks a frame whose last byte is the CRC-8 of all the bytes before it.
///
/// An empty frame has nothing to check and is accepted.
pub fn verify(frame: &[u8]) -> Result<(), ChecksumMismatch> {
    let Some((&expected, data)) = frame.split_last() else {
        return Ok(());
    };

    let actual = compute(data);
    if actual != expected {
        return Err(ChecksumMismatch { expected, actual });
    }

    Ok(())
}

/// Builds the 3-byte `[msb, lsb, crc]` word the sensor expects for `value`.
pub fn word(value: u16) -> [u8; 3] {
    let [msb, lsb] = value.to_be_bytes();
    [msb, lsb, compute(&[msb, lsb])]
}
