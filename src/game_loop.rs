//! The cooperative poll cycle gluing input, simulation and rendering.
//!
//! Strictly single-threaded: the integrator calls [`GameLoop::poll`] with
//! the current instant as fast as it likes. Within one cycle the input
//! machine runs first, then movement and gravity, then rendering — every
//! committed mutation is pushed to the panel before the cycle ends, so the
//! glass never shows a state the simulation has already left behind.

use embedded_hal::digital::InputPin;

use crate::error::Error;
use crate::game::{ActivePiece, FallOutcome, GameSession, SpawnOutcome};
use crate::input::{Buttons, HoldAction, Repeater};
use crate::interface::PanelInterface;
use crate::panel::Panel;
use crate::pieces::PieceKind;
use crate::render;
use crate::{COLOR_BG, COLOR_PIECE, Duration, Instant};

/// Minimum gap between accepted horizontal moves while a button is held.
const SIDE_REPEAT: Duration = Duration::millis(120);

/// Effective gravity interval while soft drop is held. Substituted for the
/// level interval, never committed to the session.
const SOFT_DROP_INTERVAL: Duration = Duration::millis(60);

/// Owns the whole appliance: session, panel, buttons and all timers.
pub struct GameLoop<I, P> {
    panel: Panel<I>,
    buttons: Buttons<P>,
    session: GameSession,
    side_repeat: Repeater,
    last_fall: Instant,
    shown_score: u32,
    shown_next: PieceKind,
}

impl<I: PanelInterface, P: InputPin> GameLoop<I, P> {
    pub fn new(panel: Panel<I>, buttons: Buttons<P>, seed: u32, now: Instant) -> Self {
        let session = GameSession::new(seed);
        let shown_next = session.next_kind();
        Self {
            panel,
            buttons,
            session,
            side_repeat: Repeater::new(SIDE_REPEAT, now),
            last_fall: now,
            shown_score: 0,
            shown_next,
        }
    }

    /// The live session, e.g. for mirroring score to other peripherals.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Bring the panel up and paint the initial screen.
    pub fn start(&mut self, now: Instant) -> Result<(), Error<I::Error, P::Error>> {
        self.panel.init().map_err(Error::Display)?;
        self.paint_session(now).map_err(Error::Display)
    }

    /// One poll cycle. Order is fixed: dual-function button, spawn,
    /// horizontal autorepeat, gravity, HUD/preview refresh.
    pub fn poll(&mut self, now: Instant) -> Result<(), Error<I::Error, P::Error>> {
        match self.buttons.action.update(now).map_err(Error::Button)? {
            Some(HoldAction::Reset) => {
                self.session.reset();
                self.paint_session(now).map_err(Error::Display)?;
            }
            Some(HoldAction::Rotate) => {
                if let Some(prev) = self.session.rotate() {
                    self.draw_move(prev).map_err(Error::Display)?;
                }
            }
            None => {}
        }

        // Terminal state: everything except the reset above is ignored.
        if self.session.game_over() {
            return Ok(());
        }

        if self.session.active().is_none() {
            match self.session.spawn() {
                SpawnOutcome::Spawned => {
                    self.last_fall = now;
                    if let Some(piece) = self.session.active() {
                        render::draw_piece(&mut self.panel, &piece, COLOR_PIECE)
                            .map_err(Error::Display)?;
                    }
                }
                SpawnOutcome::Blocked => {
                    render::draw_game_over(&mut self.panel, self.session.score())
                        .map_err(Error::Display)?;
                    return Ok(());
                }
            }
        }

        // Left and right share one autorepeat gate, left wins a tie.
        let left = self.buttons.left.sample(now).map_err(Error::Button)?;
        let right = self.buttons.right.sample(now).map_err(Error::Button)?;
        if left && self.side_repeat.ready(now) {
            if let Some(prev) = self.session.shift(-1) {
                self.draw_move(prev).map_err(Error::Display)?;
            }
        } else if right && self.side_repeat.ready(now) {
            if let Some(prev) = self.session.shift(1) {
                self.draw_move(prev).map_err(Error::Display)?;
            }
        }

        // Gravity, with the soft-drop substitution while the button is
        // held. The committed fall interval is untouched.
        let soft = self.buttons.soft_drop.sample(now).map_err(Error::Button)?;
        let interval = if soft {
            SOFT_DROP_INTERVAL
        } else {
            self.session.fall_interval()
        };
        if now - self.last_fall >= interval {
            self.last_fall = now;
            match self.session.fall() {
                Some(FallOutcome::Stepped(prev)) => {
                    self.draw_move(prev).map_err(Error::Display)?;
                }
                Some(FallOutcome::Locked { cleared }) => {
                    if cleared > 0 {
                        self.repaint_board().map_err(Error::Display)?;
                    }
                }
                None => {}
            }
        }

        // HUD and preview are redrawn only when what they show changed.
        if self.session.score() != self.shown_score {
            self.shown_score = self.session.score();
            render::draw_hud(&mut self.panel, self.shown_score).map_err(Error::Display)?;
        }
        if self.session.next_kind() != self.shown_next {
            self.shown_next = self.session.next_kind();
            render::draw_preview(&mut self.panel, self.shown_next).map_err(Error::Display)?;
        }

        Ok(())
    }

    fn draw_move(&mut self, prev: ActivePiece) -> Result<(), I::Error> {
        if let Some(cur) = self.session.active() {
            render::draw_piece_moved(&mut self.panel, &prev, &cur)?;
        }
        Ok(())
    }

    /// Whole-screen paint of the current session (reset and start-up).
    fn paint_session(&mut self, now: Instant) -> Result<(), I::Error> {
        self.panel.fill_screen(COLOR_BG)?;
        render::draw_field(&mut self.panel, self.session.field())?;
        render::draw_hud(&mut self.panel, self.session.score())?;
        render::draw_preview(&mut self.panel, self.session.next_kind())?;
        render::draw_border(&mut self.panel)?;
        self.shown_score = self.session.score();
        self.shown_next = self.session.next_kind();
        self.last_fall = now;
        Ok(())
    }

    /// Full-field repaint after a line-clear pass.
    fn repaint_board(&mut self) -> Result<(), I::Error> {
        render::draw_field(&mut self.panel, self.session.field())?;
        render::draw_hud(&mut self.panel, self.session.score())?;
        render::draw_preview(&mut self.panel, self.session.next_kind())?;
        render::draw_border(&mut self.panel)?;
        self.shown_score = self.session.score();
        self.shown_next = self.session.next_kind();
        Ok(())
    }
}
