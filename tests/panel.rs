//! Transfer-sequence tests for the panel driver: bring-up, windows,
//! raster primitives.

mod common;

use blockbox::{Panel, command};
use common::{Op, RecordingLink};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

fn panel() -> (Panel<RecordingLink>, RecordingLink) {
    let link = RecordingLink::new();
    (Panel::new(link.clone()), link)
}

fn window_ops(x0: u16, y0: u16, x1: u16, y1: u16) -> Vec<Op> {
    vec![
        Op::Command(command::CASET),
        Op::Data(vec![
            (x0 >> 8) as u8,
            x0 as u8,
            (x1 >> 8) as u8,
            x1 as u8,
        ]),
        Op::Command(command::RASET),
        Op::Data(vec![
            (y0 >> 8) as u8,
            y0 as u8,
            (y1 >> 8) as u8,
            y1 as u8,
        ]),
        Op::Command(command::RAMWR),
    ]
}

#[test]
fn bring_up_sequence_is_exact() {
    let (mut panel, link) = panel();
    panel.init().unwrap();

    let mut expected = vec![
        Op::Reset,
        Op::Command(command::SLPOUT),
        Op::Settle(120),
        Op::Command(command::FRMCTR1),
        Op::Data(vec![0x01, 0x2C, 0x2D]),
        Op::Command(command::FRMCTR2),
        Op::Data(vec![0x01, 0x2C, 0x2D]),
        Op::Command(command::FRMCTR3),
        Op::Data(vec![0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D]),
        Op::Command(command::INVCTR),
        Op::Data(vec![0x07]),
        Op::Command(command::PWCTR1),
        Op::Data(vec![0xA2, 0x02, 0x84]),
        Op::Command(command::PWCTR2),
        Op::Data(vec![0xC5]),
        Op::Command(command::PWCTR3),
        Op::Data(vec![0x0A, 0x00]),
        Op::Command(command::PWCTR4),
        Op::Data(vec![0x8A, 0x2A]),
        Op::Command(command::PWCTR5),
        Op::Data(vec![0x8A, 0xEE]),
        Op::Command(command::VMCTR1),
        Op::Data(vec![0x0E]),
        Op::Command(command::COLMOD),
        Op::Data(vec![0x05]),
        Op::Command(command::MADCTL),
        Op::Data(vec![0xC8]),
        Op::Command(command::DISPON),
        Op::Settle(20),
    ];
    expected.extend(window_ops(0, 0, 127, 159));

    assert_eq!(link.ops(), expected);
}

#[test]
fn fill_rect_opens_one_window_and_streams_one_burst() {
    let (mut panel, link) = panel();
    panel.fill_rect(10, 20, 3, 2, Rgb565::GREEN).unwrap();

    let mut expected = window_ops(10, 20, 12, 21);
    expected.push(Op::Pixels(vec![Rgb565::GREEN.into_storage(); 6]));
    assert_eq!(link.ops(), expected);
}

#[test]
fn fill_rect_clips_to_the_panel() {
    let (mut panel, link) = panel();

    // Hanging off the left edge: 5 of 10 columns survive.
    panel.fill_rect(-5, 0, 10, 1, Rgb565::WHITE).unwrap();
    let mut expected = window_ops(0, 0, 4, 0);
    expected.push(Op::Pixels(vec![Rgb565::WHITE.into_storage(); 5]));
    assert_eq!(link.ops(), expected);
    link.clear();

    // Hanging off the bottom-right corner.
    panel.fill_rect(126, 158, 8, 8, Rgb565::WHITE).unwrap();
    let mut expected = window_ops(126, 158, 127, 159);
    expected.push(Op::Pixels(vec![Rgb565::WHITE.into_storage(); 4]));
    assert_eq!(link.ops(), expected);
    link.clear();

    // Fully off-screen: nothing at all is sent.
    panel.fill_rect(200, 0, 8, 8, Rgb565::WHITE).unwrap();
    panel.fill_rect(0, -20, 8, 10, Rgb565::WHITE).unwrap();
    panel.fill_rect(0, 0, 0, 8, Rgb565::WHITE).unwrap();
    assert!(link.ops().is_empty());
}

#[test]
fn fill_screen_covers_every_pixel() {
    let (mut panel, link) = panel();
    panel.fill_screen(Rgb565::BLACK).unwrap();

    let bursts = link.pixel_bursts();
    assert_eq!(bursts.len(), 1);
    assert_eq!(bursts[0].len(), 128 * 160);
    assert!(bursts[0].iter().all(|&p| p == 0x0000));
}

#[test]
fn rect_outline_is_four_single_pixel_stripes() {
    let (mut panel, link) = panel();
    panel.draw_rect(0, 0, 128, 160, Rgb565::WHITE).unwrap();

    let bursts = link.pixel_bursts();
    let lengths: Vec<usize> = bursts.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![128, 128, 160, 160]);
    assert!(bursts.iter().flatten().all(|&p| p == 0xFFFF));
}

#[test]
fn lines_are_windowed_bursts() {
    let (mut panel, link) = panel();

    panel.h_line(4, 7, 10, Rgb565::GREEN).unwrap();
    let mut expected = window_ops(4, 7, 13, 7);
    expected.push(Op::Pixels(vec![Rgb565::GREEN.into_storage(); 10]));
    assert_eq!(link.ops(), expected);
    link.clear();

    panel.v_line(4, 7, 10, Rgb565::GREEN).unwrap();
    let mut expected = window_ops(4, 7, 4, 16);
    expected.push(Op::Pixels(vec![Rgb565::GREEN.into_storage(); 10]));
    assert_eq!(link.ops(), expected);
}
