//! # blockbox
//!
//! Firmware core for a single-purpose falling-block puzzle appliance:
//! a 16×20-cell game on a 128×160 ST7735S color panel, driven over a
//! bit-banged serial interface with no OS, no allocator and no
//! framebuffer.
//!
//! Two tightly coupled halves live here:
//! - **Simulation** — field occupancy, piece spawning/movement/rotation,
//!   locking, line clears, scoring and speed progression, plus the
//!   short/long-press input state machine.
//! - **Direct rendering** — every committed mutation goes straight to the
//!   glass as addressed window + pixel-stream writes: piece moves as
//!   four-cell diffs, line clears as full-field row bursts. The panel is
//!   the only copy of the picture.
//!
//! Hardware access goes through `embedded-hal` traits; pin assignment,
//! clocks, panic handling and process entry belong to the integrator.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let link = blockbox::BitBangInterface::new(sck, mosi, cs, dc, rst, delay)?;
//! let buttons = blockbox::Buttons::new(left, right, down, action, now());
//! let mut game = blockbox::GameLoop::new(blockbox::Panel::new(link), buttons, seed, now());
//! game.start(now())?;
//! loop {
//!     game.poll(now())?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

// This mod must come first so the others see its macros.
#[macro_use]
mod fmt;

pub mod command;
mod error;
mod field;
mod font;
mod game;
mod game_loop;
mod input;
mod interface;
mod panel;
mod pieces;
pub mod render;
mod rng;
mod scoring;

pub use error::Error;
pub use field::Field;
pub use game::{ActivePiece, FallOutcome, GameSession, SpawnOutcome};
pub use game_loop::GameLoop;
pub use input::{Buttons, Debounced, HoldAction, HoldButton, Repeater};
pub use interface::{BitBangInterface, PanelInterface};
pub use panel::Panel;
pub use pieces::{PieceKind, rotated};
pub use rng::Rng;
pub use scoring::{BASE_FALL_INTERVAL, fall_interval_for, level_for, score_for};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

// ── Clock ───────────────────────────────────────────────────────────────────

/// Millisecond-tick instant supplied by the integrator on every poll.
pub type Instant = fugit::TimerInstantU32<1_000>;

/// Millisecond-tick duration used for every interval in the crate.
pub type Duration = fugit::TimerDurationU32<1_000>;

// ── Board geometry ──────────────────────────────────────────────────────────

/// Play field width in cells.
pub const FIELD_W: i8 = 16;

/// Play field height in cells.
pub const FIELD_H: i8 = 20;

/// Physical pixels per field cell; 16×8 = 128 and 20×8 = 160, so the
/// field covers the panel exactly.
pub const CELL_SIZE: i16 = 8;

/// Panel width in pixels.
pub const PANEL_W: u16 = 128;

/// Panel height in pixels.
pub const PANEL_H: u16 = 160;

// ── Palette ─────────────────────────────────────────────────────────────────

pub const COLOR_BG: Rgb565 = Rgb565::BLACK;
pub const COLOR_BORDER: Rgb565 = Rgb565::WHITE;
pub const COLOR_PIECE: Rgb565 = Rgb565::GREEN;
