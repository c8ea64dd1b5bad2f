#![cfg_attr(not(test), no_std)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

mod constants;
pub use constants::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

pub mod crc;
pub use crc::ChecksumMismatch;

mod measurement;
pub use measurement::*;

/// Represents a Sensirion SCD30 CO2, temperature and humidity sensor.
///
/// Every operation is a blocking exchange on the bus: the command is written,
/// and for reads the driver waits the configured clock stretching time before
/// reading the response. Nothing is retried; bus and checksum failures are
/// returned as they happen.
///
/// # Type Parameters
///
/// * `I2C`: The bus used to talk to the sensor. `&mut` references to a bus
///   work as well, so a bus can be lent to the driver.
/// * `D`: The delay used to wait for the sensor between command and response.
pub struct Scd30<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Config,
}

impl<I2C, D> Scd30<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a new `Scd30` driver at the default address with the default
    /// 150ms clock stretching wait.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_config(i2c, delay, Config::default())
    }

    /// Creates a new `Scd30` driver with the given configuration.
    pub fn with_config(i2c: I2C, delay: D, config: Config) -> Self {
        Self { i2c, delay, config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes the wait between a command and its response.
    pub fn set_clock_stretching_ms(&mut self, clock_stretching_ms: u32) {
        self.config.clock_stretching_ms = clock_stretching_ms;
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Resets the sensor.
    pub fn soft_reset(&mut self) -> Result<(), Error<I2C::Error>> {
        debug!("Soft reset");
        self.write_value(Command::SoftReset, RESET)
    }

    /// Reads the firmware version of the sensor.
    pub fn get_software_version(&mut self) -> Result<SoftwareVersion, Error<I2C::Error>> {
        let response = self.read_word_frame(Command::ReadVersion)?;
        let version = SoftwareVersion {
            major: response[0],
            minor: response[1],
        };
        debug!("Software version: {}", version);
        Ok(version)
    }

    /// Returns the measurement interval in seconds, [2, 1800].
    pub fn get_measurement_interval(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_value(Command::MeasurementInterval)
    }

    /// Sets the measurement interval used in continuous measurement mode.
    ///
    /// # Arguments
    ///
    /// * `interval`: The interval in seconds. Must be between 2 and 1800 (inclusive).
    ///
    /// # Returns
    ///
    /// * `Err(Error::InvalidArg)` if `interval` is out of range; nothing is sent in that case.
    /// * `Err(Error::WriteFailure)` if the bus write failed.
    pub fn set_measurement_interval(&mut self, interval: u16) -> Result<(), Error<I2C::Error>> {
        Self::check(Parameter::MeasurementInterval, interval)?;
        self.write_value(Command::MeasurementInterval, interval)
    }

    /// Returns whether automatic self-calibration (ASC) is enabled.
    pub fn get_self_calibration(&mut self) -> Result<bool, Error<I2C::Error>> {
        let response = self.read_word_frame(Command::SelfCalibration)?;
        Ok(u16::from(response[1]) == SELF_CALIBRATION_ENABLED)
    }

    /// Enables or disables automatic self-calibration (ASC).
    ///
    /// ASC only works in continuous measurement mode, and needs the sensor to
    /// see fresh air regularly, ideally one hour every day.
    pub fn set_self_calibration(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        let value = if enabled {
            SELF_CALIBRATION_ENABLED
        } else {
            SELF_CALIBRATION_DISABLED
        };
        self.write_value(Command::SelfCalibration, value)
    }

    /// Returns the forced recalibration value in ppm, [400, 2000].
    pub fn get_forced_recalibration_value(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_value(Command::ForcedRecalibrationValue)
    }

    /// Sets a reference CO2 concentration that overrides the value from
    /// automatic self-calibration. Must be between 400 and 2000 ppm (inclusive).
    pub fn set_forced_recalibration_value(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        Self::check(Parameter::ForcedRecalibrationValue, value)?;
        self.write_value(Command::ForcedRecalibrationValue, value)
    }

    /// Returns the temperature offset in 1/100 °C.
    pub fn get_temperature_offset(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_value(Command::TemperatureOffset)
    }

    /// Sets the temperature offset in 1/100 °C.
    pub fn set_temperature_offset(&mut self, offset: u16) -> Result<(), Error<I2C::Error>> {
        self.write_value(Command::TemperatureOffset, offset)
    }

    /// Returns the altitude compensation in meters above sea level.
    pub fn get_altitude_compensation(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_value(Command::AltitudeCompensation)
    }

    /// Sets the altitude compensation in meters above sea level.
    pub fn set_altitude_compensation(&mut self, altitude: u16) -> Result<(), Error<I2C::Error>> {
        self.write_value(Command::AltitudeCompensation, altitude)
    }

    /// Starts continuous measurement.
    ///
    /// # Arguments
    ///
    /// * `ambient_pressure`: Pressure compensation in mBar, between 700 and 1200
    ///   (inclusive), or `0` to disable it.
    pub fn start_continuous_measurement(
        &mut self,
        ambient_pressure: u16,
    ) -> Result<(), Error<I2C::Error>> {
        Self::check(Parameter::AmbientPressure, ambient_pressure)?;
        self.write_value(Command::StartContinuousMeasurement, ambient_pressure)
    }

    /// Stops continuous measurement.
    pub fn stop_continuous_measurement(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_value(
            Command::StopContinuousMeasurement,
            STOP_CONTINUOUS_MEASUREMENT,
        )
    }

    /// Returns `true` if a measurement is ready to be read.
    pub fn has_data_ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        let response = self.read_word_frame(Command::ReadDataReady)?;
        Ok(u16::from(response[1]) == DATA_READY)
    }

    /// Reads the last measurement.
    ///
    /// The whole sample is discarded if any of its words fails the CRC check.
    pub fn read_measurement(&mut self) -> Result<Measurement, Error<I2C::Error>> {
        let mut response = [0u8; MEASUREMENT_FRAME_LEN];
        self.read_response(Command::ReadMeasurement, &mut response)?;

        let measurement = Measurement::decode(&response).map_err(|(chunk, e)| {
            Error::ChecksumMismatch {
                chunk,
                expected: e.expected,
                actual: e.actual,
            }
        })?;

        debug!("{}", measurement);
        Ok(measurement)
    }

    fn check(parameter: Parameter, value: u16) -> Result<(), Error<I2C::Error>> {
        if !parameter.accepts(value) {
            debug!("Rejected {} {}", parameter, value);
            return Err(Error::InvalidArg { parameter, value });
        }
        Ok(())
    }

    // Reads a single big-endian word.
    fn read_value(&mut self, command: Command) -> Result<u16, Error<I2C::Error>> {
        let response = self.read_word_frame(command)?;
        let value = u16::from_be_bytes([response[0], response[1]]);
        debug!("{:?}: {}", command, value);
        Ok(value)
    }

    // Reads a `[msb, lsb, crc]` response and checks its CRC.
    fn read_word_frame(&mut self, command: Command) -> Result<[u8; 3], Error<I2C::Error>> {
        let mut response = [0u8; 3];
        self.read_response(command, &mut response)?;
        crc::verify(&response).map_err(|e| Error::ChecksumMismatch {
            chunk: 0,
            expected: e.expected,
            actual: e.actual,
        })?;
        Ok(response)
    }

    // Sends the command, waits for the sensor, then reads the raw response.
    fn read_response(
        &mut self,
        command: Command,
        response: &mut [u8],
    ) -> Result<(), Error<I2C::Error>> {
        let frame = command.to_be_bytes();
        debug!("Executing command {:?}: {:02X?}", command, frame);
        self.i2c
            .write(self.config.address, &frame)
            .map_err(Error::WriteFailure)?;

        self.delay.delay_ms(self.config.clock_stretching_ms);

        self.i2c
            .read(self.config.address, response)
            .map_err(Error::ReadFailure)?;
        debug!("Response to {:?}: {:02X?}", command, response);
        Ok(())
    }

    // Sends the command followed by a CRC-protected value.
    fn write_value(&mut self, command: Command, value: u16) -> Result<(), Error<I2C::Error>> {
        let [cmd_msb, cmd_lsb] = command.to_be_bytes();
        let [val_msb, val_lsb, val_crc] = crc::word(value);
        let frame = [cmd_msb, cmd_lsb, val_msb, val_lsb, val_crc];

        debug!("Executing command {:?}: {:02X?}", command, frame);
        self.i2c
            .write(self.config.address, &frame)
            .map_err(Error::WriteFailure)
    }
}
