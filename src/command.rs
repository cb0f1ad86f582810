//! ST7735S command bytes.
//!
//! Every command is sent with the mode line held low; its parameter bytes
//! follow with the mode line held high. Parameter counts below are what
//! the bring-up sequence in [`crate::Panel::init`] actually sends.

/// Sleep out (0x11). No parameters; allow 120 ms before the next command.
pub const SLPOUT: u8 = 0x11;

/// Frame rate control, normal mode (0xB1): [rtna, fpa, bpa].
pub const FRMCTR1: u8 = 0xB1;

/// Frame rate control, idle mode (0xB2): [rtna, fpa, bpa].
pub const FRMCTR2: u8 = 0xB2;

/// Frame rate control, partial mode (0xB3): two [rtna, fpa, bpa] sets.
pub const FRMCTR3: u8 = 0xB3;

/// Display inversion control (0xB4): 1 byte.
pub const INVCTR: u8 = 0xB4;

/// Power control 1 (0xC0): [avdd, vrhp, mode].
pub const PWCTR1: u8 = 0xC0;

/// Power control 2 (0xC1): 1 byte.
pub const PWCTR2: u8 = 0xC1;

/// Power control 3, normal mode (0xC2): 2 bytes.
pub const PWCTR3: u8 = 0xC2;

/// Power control 4, idle mode (0xC3): 2 bytes.
pub const PWCTR4: u8 = 0xC3;

/// Power control 5, partial mode (0xC4): 2 bytes.
pub const PWCTR5: u8 = 0xC4;

/// VCOM control (0xC5): 1 byte.
pub const VMCTR1: u8 = 0xC5;

/// Interface pixel format (0x3A): 0x05 selects 16-bit 5-6-5.
pub const COLMOD: u8 = 0x3A;

/// Memory data access control (0x36): scan orientation and RGB/BGR order.
pub const MADCTL: u8 = 0x36;

/// Display on (0x29). Allow 20 ms afterwards.
pub const DISPON: u8 = 0x29;

/// Column address set (0x2A): [x0 hi, x0 lo, x1 hi, x1 lo], inclusive.
pub const CASET: u8 = 0x2A;

/// Row address set (0x2B): [y0 hi, y0 lo, y1 hi, y1 lo], inclusive.
pub const RASET: u8 = 0x2B;

/// Memory write (0x2C): the following pixel stream fills the open window
/// in raster order.
pub const RAMWR: u8 = 0x2C;
