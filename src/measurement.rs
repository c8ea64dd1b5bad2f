use core::fmt;

use crate::crc::{self, ChecksumMismatch};

/// Size of a ReadMeasurement response: three values of two CRC-protected words each.
pub const MEASUREMENT_FRAME_LEN: usize = 18;

/// A single sample read from the SCD30.
///
/// Values are passed through exactly as the sensor reports them, even when
/// they fall outside the documented ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// CO2 concentration in ppm, [0, 10000].
    pub co2: f32,
    /// Temperature in °C, [-40, 125].
    pub temperature: f32,
    /// Relative humidity in %RH, [0, 100].
    pub humidity: f32,
}

impl Measurement {
    /// Decodes a ReadMeasurement response.
    ///
    /// The frame holds CO2, temperature and humidity, in that order, each as a
    /// big-endian IEEE-754 float split over two `[msb, lsb, crc]` words:
    ///
    /// ```text
    /// | X X C X X C | X X C X X C | X X C X X C |
    /// |     CO2     | Temperature |  Humidity   |
    /// ```
    ///
    /// Every word is checked on its own. The first bad word aborts the decode
    /// and its index (0 to 5) is returned with the mismatch.
    pub fn decode(
        frame: &[u8; MEASUREMENT_FRAME_LEN],
    ) -> Result<Measurement, (usize, ChecksumMismatch)> {
        let mut values = [0f32; 3];

        for (v, value) in values.iter_mut().enumerate() {
            let mut bits: u32 = 0;
            for c in 0..2 {
                let chunk = v * 2 + c;
                let word = &frame[chunk * 3..chunk * 3 + 3];
                crc::verify(word).map_err(|e| (chunk, e))?;
                bits = (bits << 8) | u32::from(word[0]);
                bits = (bits << 8) | u32::from(word[1]);
            }
            *value = f32::from_bits(bits);
        }

        let [co2, temperature, humidity] = values;
        Ok(Measurement {
            co2,
            temperature,
            humidity,
        })
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CO2: {:.6} ppm, temperature: {:.6} °C, humidity: {:.6} %RH",
            self.co2, self.temperature, self.humidity
        )
    }
}

/// Firmware version reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for SoftwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // CO2 = 400.0, temperature = 25.0, humidity = 50.0
    pub(crate) const FRAME: [u8; MEASUREMENT_FRAME_LEN] = [
        0x43, 0xC8, 0xDB, 0x00, 0x00, 0x81, //
        0x41, 0xC8, 0x02, 0x00, 0x00, 0x81, //
        0x42, 0x48, 0x55, 0x00, 0x00, 0x81, //
    ];

    #[test]
    fn decode_measurement() {
        let m = Measurement::decode(&FRAME).unwrap();
        assert_eq!(m.co2, 400.0);
        assert_eq!(m.temperature, 25.0);
        assert_eq!(m.humidity, 50.0);
    }

    #[test]
    fn decode_is_all_or_nothing() {
        for i in 0..MEASUREMENT_FRAME_LEN {
            let mut frame = FRAME;
            frame[i] ^= 0x01;
            let (chunk, _) = Measurement::decode(&frame).unwrap_err();
            assert_eq!(chunk, i / 3, "corrupted byte {}", i);
        }
    }

    #[test]
    fn decode_passes_out_of_range_values_through() {
        // CO2 = -1.0
        let mut frame = FRAME;
        frame[..6].copy_from_slice(&[0xBF, 0x80, crc::compute(&[0xBF, 0x80]), 0x00, 0x00, 0x81]);
        let m = Measurement::decode(&frame).unwrap();
        assert_eq!(m.co2, -1.0);
    }

    #[test]
    fn display() {
        let m = Measurement {
            co2: 400.0,
            temperature: 25.0,
            humidity: 50.0,
        };
        assert_eq!(
            m.to_string(),
            "CO2: 400.000000 ppm, temperature: 25.000000 °C, humidity: 50.000000 %RH"
        );
        assert_eq!(SoftwareVersion { major: 3, minor: 66 }.to_string(), "3.66");
    }
}
