/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use super::BusInterface;
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Bus interface over a blocking embedded-hal I2C port
pub struct I2cInterface<I2C> {
    i2c_port: I2C,
}

impl<I2C> I2cInterface<I2C> {
    pub fn new(i2c_port: I2C) -> Self {
        Self { i2c_port }
    }

    /// Returns the previously consumed I2C port.
    pub fn free(self) -> I2C {
        self.i2c_port
    }
}

impl<I2C> BusInterface for I2cInterface<I2C>
where
    I2C: I2c<SevenBitAddress>,
{
    type BusError = I2C::Error;

    fn write_byte(
        &mut self,
        address: u8,
        byte: u8,
    ) -> Result<(), Self::BusError> {
        self.i2c_port.write(address, &[byte])
    }

    fn request_bytes(
        &mut self,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::BusError> {
        self.i2c_port.read(address, buffer)
    }
}
