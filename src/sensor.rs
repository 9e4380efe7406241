/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::constants::*;
use crate::interface::BusInterface;
use crate::units::PressureUnit;
use crate::{ConfigError, Error};
use core::fmt;

/// Status reported in the two upper bits of every reading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorStatus {
    #[default]
    Normal,
    /// Device is in command mode (not expected in normal operation)
    CommandMode,
    /// Data was already fetched since the last measurement cycle
    StaleData,
    /// EEPROM signature or bridge fault
    Diagnostic,
}

impl SensorStatus {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            STATUS_NORMAL => SensorStatus::Normal,
            STATUS_COMMAND_MODE => SensorStatus::CommandMode,
            STATUS_STALE_DATA => SensorStatus::StaleData,
            _ => SensorStatus::Diagnostic,
        }
    }
}

/// One Honeywell digital pressure sensor (HSC/SSC/ABP, 14-bit output)
/// sitting on a multiplexer channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoneywellSensor {
    address: u8,
    /// Full-scale magnitude, in `unit`. For differential parts this is
    /// the upper limit and the lower limit is its negation.
    range: f32,
    unit: PressureUnit,
    output_unit: PressureUnit,
    differential: bool,
    channel: u8,

    last_code: u16,
    last_status: SensorStatus,
    pressure: f32,
}

impl Default for HoneywellSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl HoneywellSensor {
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_SENSOR_ADDRESS,
            range: 0.0,
            unit: PressureUnit::Millibar,
            output_unit: PressureUnit::Millibar,
            differential: false,
            channel: 0,
            last_code: 0,
            last_status: SensorStatus::Normal,
            pressure: 0.0,
        }
    }

    /// Set every configuration field at once.
    /// Nothing is changed if the address or channel is rejected.
    pub fn configure(
        &mut self,
        address: u8,
        range: f32,
        unit: PressureUnit,
        differential: bool,
        output_unit: PressureUnit,
        channel: u8,
    ) -> Result<(), ConfigError> {
        check_address(address)?;
        check_channel(channel)?;

        self.address = address;
        self.range = range;
        self.unit = unit;
        self.differential = differential;
        self.output_unit = output_unit;
        self.channel = channel;
        Ok(())
    }

    pub fn set_address(&mut self, address: u8) -> Result<(), ConfigError> {
        check_address(address)?;
        self.address = address;
        Ok(())
    }

    pub fn set_range(&mut self, range: f32) {
        self.range = range;
    }

    pub fn set_unit(&mut self, unit: PressureUnit) {
        self.unit = unit;
    }

    pub fn set_output_unit(&mut self, output_unit: PressureUnit) {
        self.output_unit = output_unit;
    }

    pub fn set_differential(&mut self, differential: bool) {
        self.differential = differential;
    }

    pub fn set_channel(&mut self, channel: u8) -> Result<(), ConfigError> {
        check_channel(channel)?;
        self.channel = channel;
        Ok(())
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn unit(&self) -> PressureUnit {
        self.unit
    }

    pub fn output_unit(&self) -> PressureUnit {
        self.output_unit
    }

    pub fn is_differential(&self) -> bool {
        self.differential
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Last 14-bit code read from the device
    pub fn last_code(&self) -> u16 {
        self.last_code
    }

    pub fn last_status(&self) -> SensorStatus {
        self.last_status
    }

    /// Last converted pressure, in the output unit
    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    /// Read one 2-byte sample from the sensor, keeping the low 14 bits.
    /// The caller is responsible for having selected the right
    /// multiplexer channel.
    pub fn read_raw_code<BI>(
        &mut self,
        bus: &mut BI,
    ) -> Result<u16, Error<BI::BusError>>
    where
        BI: BusInterface,
    {
        let mut buf = [0u8; READING_LEN];
        bus.request_bytes(self.address, &mut buf)
            .map_err(Error::Comm)?;

        let word = u16::from_be_bytes(buf);
        self.last_status = SensorStatus::from_bits((word >> STATUS_SHIFT) as u8);
        self.last_code = word & CODE_MASK;
        Ok(self.last_code)
    }

    /// Map a raw code onto the sensor's range and rescale it
    /// into the output unit.
    pub fn convert(&self, code: u16) -> f32 {
        let code = (code & CODE_MASK) as f32;
        let diff = if self.differential { 1.0 } else { 0.0 };
        let range = self.range;

        ((((code - OUTPUT_MIN as f32) * (range - (-range * diff)))
            / OUTPUT_SPAN)
            - (range * diff))
            * self.unit.factor_to(self.output_unit)
    }

    pub fn read_pressure<BI>(
        &mut self,
        bus: &mut BI,
    ) -> Result<f32, Error<BI::BusError>>
    where
        BI: BusInterface,
    {
        let code = self.read_raw_code(bus)?;
        self.pressure = self.convert(code);
        Ok(self.pressure)
    }

    /// Write the sensor's configuration to a text sink
    pub fn display_data(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "I2C address: 0x{:02X}", self.address)?;
        writeln!(out, "Range: {}", self.range)?;
        writeln!(out, "Unit: {}", self.unit)?;
        writeln!(out, "Differential: {}", self.differential)
    }
}

impl fmt::Display for HoneywellSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_data(f)
    }
}

fn check_address(address: u8) -> Result<(), ConfigError> {
    if address > MAX_I2C_ADDRESS {
        return Err(ConfigError::InvalidAddress(address));
    }
    Ok(())
}

fn check_channel(channel: u8) -> Result<(), ConfigError> {
    if channel as usize >= NUM_SLOTS {
        return Err(ConfigError::InvalidChannel(channel));
    }
    Ok(())
}
