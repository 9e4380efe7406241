/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::constants::*;
use core::fmt;

/// Pressure units understood by the driver.
///
/// The discriminants match the unit codes accepted by
/// [`PrsModule::configure`](crate::PrsModule::configure).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PressureUnit {
    #[default]
    Millibar = UNIT_MILLIBAR,
    Bar = UNIT_BAR,
    Psi = UNIT_PSI,
}

impl PressureUnit {
    pub const ALL: [PressureUnit; 3] =
        [PressureUnit::Millibar, PressureUnit::Bar, PressureUnit::Psi];

    /// Decode a raw unit code, `None` if it is not 0, 1 or 2
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            UNIT_MILLIBAR => Some(PressureUnit::Millibar),
            UNIT_BAR => Some(PressureUnit::Bar),
            UNIT_PSI => Some(PressureUnit::Psi),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Multiplier taking a value in `self` to a value in `to`
    pub fn factor_to(self, to: PressureUnit) -> f32 {
        UNIT_CONVERSION[self as usize][to as usize]
    }

    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Millibar => "mbar",
            PressureUnit::Bar => "bar",
            PressureUnit::Psi => "psi",
        }
    }
}

impl TryFrom<u8> for PressureUnit {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
