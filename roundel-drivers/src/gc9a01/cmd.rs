//! GC9A01 command bytes used outside the init script

/// Sleep out; the panel needs 120 ms before the next command
pub const SLEEP_OUT: u8 = 0x11;
/// Display inversion on
pub const INVERSION_ON: u8 = 0x21;
/// Display on
pub const DISPLAY_ON: u8 = 0x29;
/// Column address set (CASET)
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
/// Row address set (RASET)
pub const ROW_ADDRESS_SET: u8 = 0x2B;
/// Memory write (RAMWR); pixel data follows
pub const MEMORY_WRITE: u8 = 0x2C;
/// Tearing effect line on
pub const TEARING_EFFECT_ON: u8 = 0x35;
/// Memory access control (MADCTL)
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
/// Interface pixel format (COLMOD)
pub const PIXEL_FORMAT: u8 = 0x3A;
/// Inter register enable 1
pub const INTER_REGISTER_ENABLE_1: u8 = 0xFE;
/// Inter register enable 2
pub const INTER_REGISTER_ENABLE_2: u8 = 0xEF;
