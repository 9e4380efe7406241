/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

#[allow(dead_code)]
pub mod constants;
pub mod interface;
pub mod module;
pub mod sensor;
pub mod units;

#[cfg(test)]
mod test_util;

pub use interface::{BusInterface, I2cInterface};
pub use module::{ModuleConfig, PrsModule};
pub use sensor::{HoneywellSensor, SensorStatus};
pub use units::PressureUnit;

/// Invalid configuration values, independent of the bus in use
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unit code outside millibar/bar/psi for an occupied slot
    InvalidUnit { slot: u8, code: u8 },
    /// Multiplexer channel (slot) outside 0..8
    InvalidChannel(u8),
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
}

/// Errors in this crate
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<CommE> {
    /// Bus communication error
    Comm(CommE),

    /// Rejected configuration value
    Config(ConfigError),
    /// No configured sensor at this index
    InvalidSensorIndex(usize),

    /// The sensor reported a diagnostic condition in its status bits
    SensorFault { channel: u8 },
}

impl<CommE> From<ConfigError> for Error<CommE> {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}
