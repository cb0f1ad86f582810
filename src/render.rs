//! Incremental rendering: diff draws, full-field repaints, HUD, preview.
//!
//! The panel is the only copy of the picture — there is no framebuffer to
//! resynchronize from — so every routine here paints exactly what a state
//! change dirtied and nothing more. A whole-screen redraw happens only on
//! reset and after a line-clear pass.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;

use crate::field::Field;
use crate::font;
use crate::game::ActivePiece;
use crate::interface::PanelInterface;
use crate::panel::Panel;
use crate::pieces::PieceKind;
use crate::{CELL_SIZE, COLOR_BG, COLOR_BORDER, COLOR_PIECE, FIELD_H, FIELD_W, PANEL_H, PANEL_W};

/// HUD strip across the top of the panel.
const HUD_TEXT_X: i16 = 2;
const HUD_TEXT_Y: i16 = 2;
const HUD_HEIGHT: i16 = 18;

/// Next-piece preview box in the top-right corner.
const PREVIEW_X: i16 = 96;
const PREVIEW_Y: i16 = 0;
const PREVIEW_SIZE: i16 = 32;
const PREVIEW_BLOCK: i16 = 4;
const PREVIEW_INSET: i16 = 4;

/// Glyph dot size and per-character advance (3 dots plus a gap).
const DOT: i16 = 2;
const CHAR_ADVANCE: i16 = 7;

/// One-pixel border around the play field. Cell fills at the edge rows and
/// columns overwrite it, so it is reasserted after every piece draw.
pub fn draw_border<I: PanelInterface>(panel: &mut Panel<I>) -> Result<(), I::Error> {
    panel.draw_rect(0, 0, PANEL_W as i16, PANEL_H as i16, COLOR_BORDER)
}

/// Fill one field cell.
pub fn draw_cell<I: PanelInterface>(
    panel: &mut Panel<I>,
    cx: i8,
    cy: i8,
    color: Rgb565,
) -> Result<(), I::Error> {
    panel.fill_rect(
        i16::from(cx) * CELL_SIZE,
        i16::from(cy) * CELL_SIZE,
        CELL_SIZE,
        CELL_SIZE,
        color,
    )
}

fn draw_piece_cells<I: PanelInterface>(
    panel: &mut Panel<I>,
    piece: &ActivePiece,
    color: Rgb565,
) -> Result<(), I::Error> {
    for (x, y) in piece.cells() {
        if (0..FIELD_W).contains(&x) && (0..FIELD_H).contains(&y) {
            draw_cell(panel, x, y, color)?;
        }
    }
    Ok(())
}

/// Paint the piece and reassert the border (used at spawn).
pub fn draw_piece<I: PanelInterface>(
    panel: &mut Panel<I>,
    piece: &ActivePiece,
    color: Rgb565,
) -> Result<(), I::Error> {
    draw_piece_cells(panel, piece, color)?;
    draw_border(panel)
}

/// Diff draw for a committed move or rotation: the four previous cells go
/// back to background, the four new cells get the piece color, then the
/// border is reasserted.
pub fn draw_piece_moved<I: PanelInterface>(
    panel: &mut Panel<I>,
    prev: &ActivePiece,
    cur: &ActivePiece,
) -> Result<(), I::Error> {
    draw_piece_cells(panel, prev, COLOR_BG)?;
    draw_piece_cells(panel, cur, COLOR_PIECE)?;
    draw_border(panel)
}

/// Full-field repaint: one addressed burst per cell row, each streaming
/// the row's per-column color in raster order.
pub fn draw_field<I: PanelInterface>(panel: &mut Panel<I>, field: &Field) -> Result<(), I::Error> {
    let cell = CELL_SIZE as u16;
    for cy in 0..FIELD_H {
        let y0 = u16::from(cy as u8) * cell;
        panel.set_window(0, y0, u16::from(FIELD_W as u8) * cell - 1, y0 + cell - 1)?;
        panel.push_pixels((0..CELL_SIZE).flat_map(move |_| {
            (0..FIELD_W).flat_map(move |cx| {
                let color = if field.cell(cx, cy) {
                    COLOR_PIECE
                } else {
                    COLOR_BG
                };
                core::iter::repeat(color.into_storage()).take(CELL_SIZE as usize)
            })
        }))?;
    }
    Ok(())
}

/// Score readout in the HUD strip.
pub fn draw_hud<I: PanelInterface>(panel: &mut Panel<I>, score: u32) -> Result<(), I::Error> {
    panel.fill_rect(0, 0, PANEL_W as i16, HUD_HEIGHT, COLOR_BG)?;
    draw_text(panel, HUD_TEXT_X, HUD_TEXT_Y, b"SCORE", COLOR_BORDER)?;
    draw_number(panel, HUD_TEXT_X, HUD_TEXT_Y + 8, score, COLOR_BORDER)
}

/// Boxed preview of the upcoming piece, always in its base orientation.
pub fn draw_preview<I: PanelInterface>(
    panel: &mut Panel<I>,
    next: PieceKind,
) -> Result<(), I::Error> {
    panel.fill_rect(PREVIEW_X, PREVIEW_Y, PREVIEW_SIZE, PREVIEW_SIZE, COLOR_BG)?;
    panel.draw_rect(PREVIEW_X, PREVIEW_Y, PREVIEW_SIZE, PREVIEW_SIZE, COLOR_BORDER)?;
    for (dx, dy) in next.offsets() {
        panel.fill_rect(
            PREVIEW_X + PREVIEW_INSET + i16::from(dx) * PREVIEW_BLOCK,
            PREVIEW_Y + PREVIEW_INSET + i16::from(dy) * PREVIEW_BLOCK,
            PREVIEW_BLOCK,
            PREVIEW_BLOCK,
            COLOR_PIECE,
        )?;
    }
    Ok(())
}

/// Terminal screen: cleared panel, border, final score.
pub fn draw_game_over<I: PanelInterface>(panel: &mut Panel<I>, score: u32) -> Result<(), I::Error> {
    panel.fill_screen(COLOR_BG)?;
    draw_border(panel)?;
    draw_text(panel, 22, 60, b"GAME OVER", COLOR_BORDER)?;
    draw_text(panel, 22, 80, b"SCORE", COLOR_BORDER)?;
    draw_number(panel, 22, 88, score, COLOR_BORDER)
}

/// ASCII string in the 3×5 glyph font, each dot drawn as a 2×2 fill.
pub fn draw_text<I: PanelInterface>(
    panel: &mut Panel<I>,
    x: i16,
    y: i16,
    text: &[u8],
    color: Rgb565,
) -> Result<(), I::Error> {
    let mut cursor = x;
    for &ch in text {
        draw_char(panel, cursor, y, ch, color)?;
        cursor += CHAR_ADVANCE;
    }
    Ok(())
}

fn draw_char<I: PanelInterface>(
    panel: &mut Panel<I>,
    x: i16,
    y: i16,
    ch: u8,
    color: Rgb565,
) -> Result<(), I::Error> {
    let glyph = font::glyph(ch);
    for (row, &bits) in glyph.iter().enumerate() {
        for col in 0..font::GLYPH_WIDTH {
            if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                panel.fill_rect(
                    x + i16::from(col) * DOT,
                    y + row as i16 * DOT,
                    DOT,
                    DOT,
                    color,
                )?;
            }
        }
    }
    Ok(())
}

/// Unsigned decimal readout, left-aligned at `x`.
pub fn draw_number<I: PanelInterface>(
    panel: &mut Panel<I>,
    x: i16,
    y: i16,
    value: u32,
    color: Rgb565,
) -> Result<(), I::Error> {
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut v = value;
    loop {
        i -= 1;
        buf[i] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    draw_text(panel, x, y, &buf[i..], color)
}
