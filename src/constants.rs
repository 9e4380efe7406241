// The multiplexer exposes eight downstream buses, one sensor per slot
pub const NUM_SLOTS: usize = 8;

// Default addresses: Honeywell HSC/SSC parts ship at 0x28,
// TCA9548A/PCA9548A muxes strap to 0x70..=0x77
pub const DEFAULT_SENSOR_ADDRESS: u8 = 0x28;
pub const DEFAULT_SENSOR_ADDRESSES: [u8; NUM_SLOTS] =
    [DEFAULT_SENSOR_ADDRESS; NUM_SLOTS];
pub const DEFAULT_MUX_ADDRESS: u8 = 0x70;

// Largest valid 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

// Control byte that disconnects every downstream bus
pub const MUX_DESELECT_ALL: u8 = 0;

// A pressure reading is two bytes, MSB first
pub const READING_LEN: usize = 2;

// Bits 13..0 carry the bridge data, bits 15..14 the status
pub const CODE_MASK: u16 = 0x3FFF;
pub const STATUS_SHIFT: u8 = 14;

// Transfer function (Honeywell TruStability, 10% to 90% of 2^14 counts)
pub const OUTPUT_MIN: u16 = 1638;
pub const OUTPUT_MAX: u16 = 14745;
pub const OUTPUT_SPAN: f32 = 13107.0;

// Status bit values
pub const STATUS_NORMAL: u8 = 0;
pub const STATUS_COMMAND_MODE: u8 = 1;
pub const STATUS_STALE_DATA: u8 = 2;
pub const STATUS_DIAGNOSTIC: u8 = 3;

// Unit codes used by the bit-layout configuration call
pub const UNIT_MILLIBAR: u8 = 0;
pub const UNIT_BAR: u8 = 1;
pub const UNIT_PSI: u8 = 2;

// Conversion factors, indexed [from][to] in unit code order
pub const UNIT_CONVERSION: [[f32; 3]; 3] = [
    [1.0, 0.001, 0.0145037738],
    [1000.0, 1.0, 14.503773773],
    [68.947572932, 0.0689475729, 1.0],
];
