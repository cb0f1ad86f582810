//! ST7735S panel driver: bring-up, address windows, raster primitives.
//!
//! There is no framebuffer anywhere. Every primitive opens an address
//! window once and streams its pixels in raster order; nothing is ever
//! drawn outside the currently open window.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;

use crate::command;
use crate::interface::PanelInterface;
use crate::{PANEL_H, PANEL_W};

// Some panel variants map the 128×160 frame at an offset inside the
// controller RAM; this board's glass sits at the origin.
const X_OFFSET: u16 = 0;
const Y_OFFSET: u16 = 0;

pub struct Panel<I> {
    link: I,
}

impl<I: PanelInterface> Panel<I> {
    pub fn new(link: I) -> Self {
        Self { link }
    }

    /// Hand the link back, e.g. to inspect a recording sink in tests.
    pub fn release(self) -> I {
        self.link
    }

    /// Bring the controller out of reset into 16-bit streaming mode.
    ///
    /// Hardware reset pulse, sleep-out, the vendor frame-rate / power /
    /// VCOM parameter set, 5-6-5 pixel format, orientation + BGR order,
    /// display on. Settle delays are the documented minimums.
    pub fn init(&mut self) -> Result<(), I::Error> {
        self.link.hard_reset()?;

        self.link.command(command::SLPOUT)?;
        self.link.settle_ms(120);

        self.link.command(command::FRMCTR1)?;
        self.link.data(&[0x01, 0x2C, 0x2D])?;
        self.link.command(command::FRMCTR2)?;
        self.link.data(&[0x01, 0x2C, 0x2D])?;
        self.link.command(command::FRMCTR3)?;
        self.link.data(&[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D])?;
        self.link.command(command::INVCTR)?;
        self.link.data(&[0x07])?;

        self.link.command(command::PWCTR1)?;
        self.link.data(&[0xA2, 0x02, 0x84])?;
        self.link.command(command::PWCTR2)?;
        self.link.data(&[0xC5])?;
        self.link.command(command::PWCTR3)?;
        self.link.data(&[0x0A, 0x00])?;
        self.link.command(command::PWCTR4)?;
        self.link.data(&[0x8A, 0x2A])?;
        self.link.command(command::PWCTR5)?;
        self.link.data(&[0x8A, 0xEE])?;
        self.link.command(command::VMCTR1)?;
        self.link.data(&[0x0E])?;

        self.link.command(command::COLMOD)?;
        self.link.data(&[0x05])?;
        self.link.command(command::MADCTL)?;
        self.link.data(&[0xC8])?;

        self.link.command(command::DISPON)?;
        self.link.settle_ms(20);

        self.set_window(0, 0, PANEL_W - 1, PANEL_H - 1)?;
        info!("panel up");
        Ok(())
    }

    /// Open an inclusive column/row window and switch to memory write.
    /// The next pixel stream fills it in raster order.
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), I::Error> {
        self.link.command(command::CASET)?;
        self.link.data(&be_pair(x0 + X_OFFSET, x1 + X_OFFSET))?;
        self.link.command(command::RASET)?;
        self.link.data(&be_pair(y0 + Y_OFFSET, y1 + Y_OFFSET))?;
        self.link.command(command::RAMWR)
    }

    /// Stream raw 5-6-5 pixels into the currently open window.
    pub fn push_pixels<T>(&mut self, pixels: T) -> Result<(), I::Error>
    where
        T: IntoIterator<Item = u16>,
    {
        self.link.pixels(pixels)
    }

    pub fn fill_screen(&mut self, color: Rgb565) -> Result<(), I::Error> {
        self.fill_rect(0, 0, PANEL_W as i16, PANEL_H as i16, color)
    }

    /// Filled rectangle, clipped to the panel. One window, one burst.
    pub fn fill_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        color: Rgb565,
    ) -> Result<(), I::Error> {
        let (mut x, mut y, mut w, mut h) = (x, y, w, h);
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        if x < 0 {
            w += x;
            x = 0;
        }
        if y < 0 {
            h += y;
            y = 0;
        }
        if x + w > PANEL_W as i16 {
            w = PANEL_W as i16 - x;
        }
        if y + h > PANEL_H as i16 {
            h = PANEL_H as i16 - y;
        }
        if w <= 0 || h <= 0 {
            return Ok(());
        }

        self.set_window(x as u16, y as u16, (x + w - 1) as u16, (y + h - 1) as u16)?;
        let count = w as usize * h as usize;
        self.push_pixels(core::iter::repeat(color.into_storage()).take(count))
    }

    pub fn h_line(&mut self, x: i16, y: i16, w: i16, color: Rgb565) -> Result<(), I::Error> {
        self.fill_rect(x, y, w, 1, color)
    }

    pub fn v_line(&mut self, x: i16, y: i16, h: i16, color: Rgb565) -> Result<(), I::Error> {
        self.fill_rect(x, y, 1, h, color)
    }

    /// Rectangle outline, one pixel thick.
    pub fn draw_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        color: Rgb565,
    ) -> Result<(), I::Error> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        self.h_line(x, y, w, color)?;
        self.h_line(x, y + h - 1, w, color)?;
        self.v_line(x, y, h, color)?;
        self.v_line(x + w - 1, y, h, color)
    }
}

fn be_pair(a: u16, b: u16) -> [u8; 4] {
    let [a_hi, a_lo] = a.to_be_bytes();
    let [b_hi, b_lo] = b.to_be_bytes();
    [a_hi, a_lo, b_hi, b_lo]
}
