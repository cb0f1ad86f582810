//! Bit-level panel link: the wire trait and its GPIO bit-bang
//! implementation.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Guard delay after each clock edge, sized for the ST7735S setup/hold
/// timing. Tunable; anything at or above the datasheet minimum works.
const BIT_GUARD_US: u32 = 2;

/// Reset pulse and settle timing (minimums from the controller datasheet).
const RESET_ASSERT_MS: u32 = 20;
const RESET_PRELUDE_MS: u32 = 5;
const RESET_SETTLE_MS: u32 = 120;

/// One byte-oriented command/data link to the panel controller.
///
/// The driver and renderer are written against this trait. Hardware uses
/// [`BitBangInterface`]; tests substitute a recording sink and assert on
/// the transfer sequence, since the panel can never be read back.
pub trait PanelInterface {
    type Error;

    /// Pulse the hardware reset line and wait out the settle period.
    fn hard_reset(&mut self) -> Result<(), Self::Error>;

    /// Send one command byte, mode line low for the whole transfer.
    fn command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send parameter bytes, mode line high for the whole transfer.
    fn data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Stream 16-bit pixels high-byte-first as one bracketed transfer.
    fn pixels<T>(&mut self, pixels: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = u16>;

    /// Block for at least `ms` milliseconds (bring-up settle points).
    fn settle_ms(&mut self, ms: u32);
}

/// Bit-banged implementation over five GPIO lines.
///
/// Clock and data-out are active-high and idle low; panel-select and reset
/// are active-low. The controller samples data on the rising clock edge,
/// MSB first. Transfers are fire-and-forget: there is no acknowledgement
/// or readback on this bus.
pub struct BitBangInterface<P, D> {
    sck: P,
    mosi: P,
    cs: P,
    dc: P,
    rst: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> BitBangInterface<P, D> {
    /// Take ownership of the five lines and drive them to their idle
    /// levels (clock and data low, select and reset released high).
    pub fn new(sck: P, mosi: P, cs: P, dc: P, rst: P, delay: D) -> Result<Self, P::Error> {
        let mut link = Self {
            sck,
            mosi,
            cs,
            dc,
            rst,
            delay,
        };
        link.sck.set_low()?;
        link.mosi.set_low()?;
        link.cs.set_high()?;
        link.dc.set_high()?;
        link.rst.set_high()?;
        Ok(link)
    }

    /// Shift one byte out MSB-first, one guard delay per clock phase.
    fn write_byte(&mut self, byte: u8) -> Result<(), P::Error> {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.mosi.set_high()?;
            } else {
                self.mosi.set_low()?;
            }
            self.sck.set_high()?;
            self.delay.delay_us(BIT_GUARD_US);
            self.sck.set_low()?;
            self.delay.delay_us(BIT_GUARD_US);
        }
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> PanelInterface for BitBangInterface<P, D> {
    type Error = P::Error;

    fn hard_reset(&mut self) -> Result<(), Self::Error> {
        self.rst.set_high()?;
        self.delay.delay_ms(RESET_PRELUDE_MS);
        self.rst.set_low()?;
        self.delay.delay_ms(RESET_ASSERT_MS);
        self.rst.set_high()?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    fn command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.cs.set_low()?;
        self.dc.set_low()?;
        self.write_byte(command)?;
        self.cs.set_high()
    }

    fn data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.cs.set_low()?;
        self.dc.set_high()?;
        for &byte in data {
            self.write_byte(byte)?;
        }
        self.cs.set_high()
    }

    fn pixels<T>(&mut self, pixels: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = u16>,
    {
        self.cs.set_low()?;
        self.dc.set_high()?;
        for pixel in pixels {
            let [hi, lo] = pixel.to_be_bytes();
            self.write_byte(hi)?;
            self.write_byte(lo)?;
        }
        self.cs.set_high()
    }

    fn settle_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
