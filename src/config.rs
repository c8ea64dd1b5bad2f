use crate::constants::{DEFAULT_CLOCK_STRETCHING_MS, I2C_ADDRESS};

/// Configuration settings for the SCD30 driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// The 7-bit I2C address of the sensor.
    pub address: u8,
    /// Time to wait between sending a command and reading its response, in milliseconds.
    pub clock_stretching_ms: u32,
}

impl Config {
    /// Creates a new `Config` instance.
    ///
    /// # Arguments
    ///
    /// * `address` - The I2C address of the sensor.
    /// * `clock_stretching_ms` - The wait before reading a response.
    pub fn new(address: u8, clock_stretching_ms: u32) -> Config {
        Config {
            address,
            clock_stretching_ms,
        }
    }

    /// Sets the I2C address for the configuration.
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Sets the clock stretching wait for the configuration.
    pub fn clock_stretching_ms(mut self, clock_stretching_ms: u32) -> Self {
        self.clock_stretching_ms = clock_stretching_ms;
        self
    }
}

/// Provides default configuration values for the SCD30 sensor.
impl Default for Config {
    /// Returns the default configuration.
    ///
    /// The default configuration uses the fixed address `0x61` and a 150ms wait.
    fn default() -> Config {
        Config {
            address: I2C_ADDRESS,
            clock_stretching_ms: DEFAULT_CLOCK_STRETCHING_MS,
        }
    }
}
