// Command codes and fixed values from the SCD30 interface description:
// https://sensirion.com/media/documents/D7CEEF4A/6165372F/Sensirion_CO2_Sensors_SCD30_Interface_Description.pdf

// I2C_ADDRESS is the fixed 7-bit bus address of the SCD30.
pub const I2C_ADDRESS: u8 = 0x61;

// DEFAULT_CLOCK_STRETCHING_MS is the wait between a command and its response.
// The datasheet gives 30ms, with up to 150ms once per day during internal
// calibration; 150ms proved the most stable in practice.
pub const DEFAULT_CLOCK_STRETCHING_MS: u32 = 150;

// DATA_READY is the value reported by ReadDataReady when a measurement is available.
pub const DATA_READY: u16 = 0x0001;

// SELF_CALIBRATION_ENABLED / SELF_CALIBRATION_DISABLED are the ASC flag values.
pub const SELF_CALIBRATION_ENABLED: u16 = 0x0001;
pub const SELF_CALIBRATION_DISABLED: u16 = 0x0000;

// STOP_CONTINUOUS_MEASUREMENT is the payload sent along with the stop command.
pub const STOP_CONTINUOUS_MEASUREMENT: u16 = 0x0001;

// RESET is the payload sent along with the soft reset command.
pub const RESET: u16 = 0x0001;

/// How a command may be used on the bus.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Access {
    /// The command is followed by a read of the response.
    Read,
    /// The command carries a value and has no response.
    Write,
    /// The command can be issued either way.
    ReadWrite,
}

/// Commands understood by the SCD30.
#[repr(u16)]
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Command {
    ReadVersion = 0xD100,
    ReadDataReady = 0x0202,
    ReadMeasurement = 0x0300,
    SoftReset = 0xD304,
    StartContinuousMeasurement = 0x0010,
    StopContinuousMeasurement = 0x0104,
    MeasurementInterval = 0x4600,
    AltitudeCompensation = 0x5102,
    ForcedRecalibrationValue = 0x5204,
    SelfCalibration = 0x5306,
    TemperatureOffset = 0x5403,
}

impl Command {
    /// Returns the 16-bit command code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Returns the command code as it goes on the wire, MSB first.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.code().to_be_bytes()
    }

    pub const fn access(self) -> Access {
        match self {
            Command::ReadVersion | Command::ReadDataReady | Command::ReadMeasurement => {
                Access::Read
            }
            Command::SoftReset
            | Command::StartContinuousMeasurement
            | Command::StopContinuousMeasurement => Access::Write,
            Command::MeasurementInterval
            | Command::AltitudeCompensation
            | Command::ForcedRecalibrationValue
            | Command::SelfCalibration
            | Command::TemperatureOffset => Access::ReadWrite,
        }
    }

    pub const fn is_readable(self) -> bool {
        !matches!(self.access(), Access::Write)
    }

    pub const fn is_writable(self) -> bool {
        !matches!(self.access(), Access::Read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_codes_are_big_endian_on_the_wire() {
        assert_eq!(Command::ReadVersion.to_be_bytes(), [0xD1, 0x00]);
        assert_eq!(Command::ReadDataReady.to_be_bytes(), [0x02, 0x02]);
        assert_eq!(Command::TemperatureOffset.to_be_bytes(), [0x54, 0x03]);
    }

    #[test]
    fn command_access_classification() {
        assert_eq!(Command::ReadMeasurement.access(), Access::Read);
        assert_eq!(Command::SoftReset.access(), Access::Write);
        assert_eq!(Command::SelfCalibration.access(), Access::ReadWrite);

        assert!(Command::ReadVersion.is_readable());
        assert!(!Command::ReadVersion.is_writable());
        assert!(!Command::StopContinuousMeasurement.is_readable());
        assert!(Command::AltitudeCompensation.is_readable());
        assert!(Command::AltitudeCompensation.is_writable());
    }
}
