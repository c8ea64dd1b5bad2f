use core::fmt;

/// A setting whose value is range-checked before it is sent to the sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// Measurement interval in seconds, [2, 1800].
    MeasurementInterval,
    /// Forced recalibration reference in ppm, [400, 2000].
    ForcedRecalibrationValue,
    /// Ambient pressure compensation in mBar, 0 (disabled) or [700, 1200].
    AmbientPressure,
}

impl Parameter {
    /// Returns the inclusive `(min, max)` bounds of the parameter.
    pub const fn range(self) -> (u16, u16) {
        match self {
            Parameter::MeasurementInterval => (2, 1800),
            Parameter::ForcedRecalibrationValue => (400, 2000),
            Parameter::AmbientPressure => (700, 1200),
        }
    }

    /// Whether `0` is accepted outside of the range to turn the setting off.
    pub const fn allows_zero(self) -> bool {
        matches!(self, Parameter::AmbientPressure)
    }

    /// Checks `value` against the documented bounds of the parameter.
    pub const fn accepts(self, value: u16) -> bool {
        let (min, max) = self.range();
        (self.allows_zero() && value == 0) || (value >= min && value <= max)
    }

    const fn name(self) -> &'static str {
        match self {
            Parameter::MeasurementInterval => "measurement interval",
            Parameter::ForcedRecalibrationValue => "forced recalibration value",
            Parameter::AmbientPressure => "ambient pressure",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors returned by the SCD30 driver. `E` is the error type of the I2C bus.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Sending a command to the sensor failed.
    WriteFailure(E),
    /// Reading a response from the sensor failed.
    ReadFailure(E),
    /// A 3-byte chunk of the response failed its CRC-8 check. `chunk` is the
    /// index of the chunk in the response: always 0 for single-word responses,
    /// 0 to 5 for measurements.
    ChecksumMismatch { chunk: usize, expected: u8, actual: u8 },
    /// A setting was rejected before anything was sent to the sensor.
    InvalidArg { parameter: Parameter, value: u16 },
}

impl<E> Error<E> {
    /// Returns `true` if the error came from the underlying bus.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::WriteFailure(_) | Error::ReadFailure(_))
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WriteFailure(e) => write!(f, "failed to send data: {:?}", e),
            Error::ReadFailure(e) => write!(f, "failed to read data: {:?}", e),
            Error::ChecksumMismatch {
                chunk,
                expected,
                actual,
            } => write!(
                f,
                "CRC checksum failed on chunk {}, expected: {:#04x}, got: {:#04x}",
                chunk, expected, actual
            ),
            Error::InvalidArg { parameter, value } => {
                let (min, max) = parameter.range();
                if parameter.allows_zero() {
                    write!(
                        f,
                        "invalid {}: {}, expected 0 or [{}-{}]",
                        parameter, value, min, max
                    )
                } else {
                    write!(
                        f,
                        "invalid {}: {}, expected [{}-{}]",
                        parameter, value, min, max
                    )
                }
            }
        }
    }
}
