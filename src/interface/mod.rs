/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

mod i2c;
pub use self::i2c::I2cInterface;

#[cfg(test)]
pub mod mock_i2c_port;

/// A bus capable of the two transactions the driver needs:
/// a single control byte write and a fixed-length read.
pub trait BusInterface {
    type BusError;

    /// Write one byte to the device at `address`
    fn write_byte(
        &mut self,
        address: u8,
        byte: u8,
    ) -> Result<(), Self::BusError>;

    /// Fill `buffer` with bytes read from the device at `address`
    fn request_bytes(
        &mut self,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::BusError>;
}
