/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::constants::*;
use crate::interface::BusInterface;
use crate::sensor::{HoneywellSensor, SensorStatus};
use crate::units::PressureUnit;
use crate::{ConfigError, Error};
use core::fmt;
#[cfg(feature = "defmt")]
use defmt::println;

/// Per-slot configuration in the bit layout the module is wired with:
/// bit N of a mask and element N of an array both describe slot N.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleConfig {
    /// Bit N set: a sensor is fitted on multiplexer channel N
    pub occupied: u8,
    /// Unit-less full-scale magnitude per slot
    pub ranges: [f32; NUM_SLOTS],
    /// Bit N set: slot N holds a differential sensor
    pub differential: u8,
    /// Unit code (0 millibar, 1 bar, 2 psi) the range is given in
    pub input_units: [u8; NUM_SLOTS],
    /// Unit code readings are reported in
    pub output_units: [u8; NUM_SLOTS],
    pub addresses: [u8; NUM_SLOTS],
    /// Report a diagnostic status from the sensor as an error
    pub check_fault: bool,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            occupied: 0,
            ranges: [0.0; NUM_SLOTS],
            differential: 0,
            input_units: [UNIT_MILLIBAR; NUM_SLOTS],
            output_units: [UNIT_MILLIBAR; NUM_SLOTS],
            addresses: DEFAULT_SENSOR_ADDRESSES,
            check_fault: false,
        }
    }
}

impl ModuleConfig {
    /// Mark `slot` occupied and set its parameters.
    /// Slots are numbered from 0, like the multiplexer channels.
    pub fn with_slot(
        mut self,
        slot: u8,
        address: u8,
        range: f32,
        unit: PressureUnit,
        differential: bool,
        output_unit: PressureUnit,
    ) -> Result<Self, ConfigError> {
        let idx = slot as usize;
        if idx >= NUM_SLOTS {
            return Err(ConfigError::InvalidChannel(slot));
        }
        let bit = 1u8 << slot;
        self.occupied |= bit;
        if differential {
            self.differential |= bit;
        } else {
            self.differential &= !bit;
        }
        self.ranges[idx] = range;
        self.input_units[idx] = unit.code();
        self.output_units[idx] = output_unit.code();
        self.addresses[idx] = address;
        Ok(self)
    }

    pub fn with_check_fault(mut self, check_fault: bool) -> Self {
        self.check_fault = check_fault;
        self
    }
}

/// A multiplexer board carrying up to eight Honeywell pressure sensors.
///
/// Every read is a complete select, read, deselect sequence on the bus,
/// so sensors sharing the same fixed address never see each other.
pub struct PrsModule<BI> {
    pub(crate) bus_interface: BI,
    mux_address: u8,
    /// configured sensors, compacted into `sensors[..sensor_count]`
    sensors: [HoneywellSensor; NUM_SLOTS],
    sensor_count: usize,
    check_fault: bool,

    pressures: [f32; NUM_SLOTS],
    raw_codes: [u16; NUM_SLOTS],
    last_pressure: f32,
    last_code: u16,
}

impl<BI> PrsModule<BI> {
    pub fn new_with_interface(bus_interface: BI, mux_address: u8) -> Self {
        Self {
            bus_interface,
            mux_address,
            sensors: [HoneywellSensor::new(); NUM_SLOTS],
            sensor_count: 0,
            check_fault: false,
            pressures: [0.0; NUM_SLOTS],
            raw_codes: [0; NUM_SLOTS],
            last_pressure: 0.0,
            last_code: 0,
        }
    }

    /// Returns previously consumed bus interface.
    pub fn free(self) -> BI {
        self.bus_interface
    }

    pub fn mux_address(&self) -> u8 {
        self.mux_address
    }

    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    pub fn sensor(&self, index: usize) -> Option<&HoneywellSensor> {
        self.sensors().get(index)
    }

    pub fn sensors(&self) -> &[HoneywellSensor] {
        &self.sensors[..self.sensor_count]
    }

    /// Pressures from the last read of each sensor, in output units
    pub fn pressures(&self) -> &[f32] {
        &self.pressures[..self.sensor_count]
    }

    pub fn raw_codes(&self) -> &[u16] {
        &self.raw_codes[..self.sensor_count]
    }

    pub fn last_pressure(&self) -> f32 {
        self.last_pressure
    }

    pub fn last_code(&self) -> u16 {
        self.last_code
    }

    pub fn check_fault(&self) -> bool {
        self.check_fault
    }

    pub fn set_check_fault(&mut self, check_fault: bool) {
        self.check_fault = check_fault;
    }

    /// Write the configuration of every configured sensor to a text sink
    pub fn display_sensors(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for (index, sensor) in self.sensors().iter().enumerate() {
            writeln!(out, "Sensor {} (channel {})", index, sensor.channel())?;
            sensor.display_data(out)?;
        }
        Ok(())
    }
}

impl<BI, SE> PrsModule<BI>
where
    BI: BusInterface<BusError = SE>,
{
    /// Configure the board from per-slot parameters.
    ///
    /// Slots whose bit is set in `occupied` are scanned from 0 to 7 and
    /// packed into consecutive sensors, each keeping its slot number as
    /// its multiplexer channel. Parameters of unoccupied slots are
    /// ignored. On error the previous configuration is kept.
    pub fn configure(
        &mut self,
        occupied: u8,
        ranges: [f32; NUM_SLOTS],
        differential: u8,
        input_units: [u8; NUM_SLOTS],
        output_units: [u8; NUM_SLOTS],
        addresses: [u8; NUM_SLOTS],
    ) -> Result<(), Error<SE>> {
        let mut staged = [HoneywellSensor::new(); NUM_SLOTS];
        let mut count = 0;

        for slot in 0..NUM_SLOTS as u8 {
            if !bit_is_set(occupied, slot) {
                continue;
            }
            let idx = slot as usize;
            let unit = decode_unit(slot, input_units[idx])?;
            let output_unit = decode_unit(slot, output_units[idx])?;

            staged[count].configure(
                addresses[idx],
                ranges[idx],
                unit,
                bit_is_set(differential, slot),
                output_unit,
                slot,
            )?;
            count += 1;
        }

        self.sensors = staged;
        self.sensor_count = count;
        self.pressures = [0.0; NUM_SLOTS];
        self.raw_codes = [0; NUM_SLOTS];

        #[cfg(feature = "defmt")]
        println!("prs configured: {} sensors, mask 0x{:X}", count, occupied);

        Ok(())
    }

    pub fn configure_with(
        &mut self,
        config: &ModuleConfig,
    ) -> Result<(), Error<SE>> {
        self.configure(
            config.occupied,
            config.ranges,
            config.differential,
            config.input_units,
            config.output_units,
            config.addresses,
        )?;
        self.check_fault = config.check_fault;
        Ok(())
    }

    /// Connect the downstream bus of `channel` and only that one
    pub fn select_channel(&mut self, channel: u8) -> Result<(), Error<SE>> {
        if channel as usize >= NUM_SLOTS {
            return Err(ConfigError::InvalidChannel(channel).into());
        }
        #[cfg(feature = "defmt")]
        println!("mux select {}", channel);

        self.bus_interface
            .write_byte(self.mux_address, 1u8 << channel)
            .map_err(Error::Comm)
    }

    /// Disconnect every downstream bus
    pub fn deselect_all(&mut self) -> Result<(), Error<SE>> {
        self.bus_interface
            .write_byte(self.mux_address, MUX_DESELECT_ALL)
            .map_err(Error::Comm)
    }

    /// Read the sensor at `index` (not its channel) and return its
    /// pressure in the sensor's output unit.
    pub fn read_one(&mut self, index: usize) -> Result<f32, Error<SE>> {
        if index >= self.sensor_count {
            return Err(Error::InvalidSensorIndex(index));
        }
        let channel = self.sensors[index].channel();
        self.select_channel(channel)?;

        let read_res = self.sensors[index].read_pressure(&mut self.bus_interface);
        // leave the mux closed even if the sensor did not answer
        let close_res = self.deselect_all();
        let pressure = read_res?;

        // the reading is valid even if closing the mux failed
        let sensor = &self.sensors[index];
        self.last_code = sensor.last_code();
        self.last_pressure = pressure;
        self.raw_codes[index] = sensor.last_code();
        self.pressures[index] = pressure;
        let status = sensor.last_status();

        close_res?;

        if self.check_fault && status == SensorStatus::Diagnostic {
            #[cfg(feature = "defmt")]
            println!("prs fault on channel {}", channel);
            return Err(Error::SensorFault { channel });
        }

        Ok(pressure)
    }

    /// Read every configured sensor in order
    pub fn read_all(&mut self) -> Result<&[f32], Error<SE>> {
        for index in 0..self.sensor_count {
            self.read_one(index)?;
        }
        Ok(self.pressures())
    }
}

fn bit_is_set(mask: u8, bit: u8) -> bool {
    (mask >> bit) & 1 == 1
}

fn decode_unit(slot: u8, code: u8) -> Result<PressureUnit, ConfigError> {
    PressureUnit::from_code(code).ok_or(ConfigError::InvalidUnit { slot, code })
}
