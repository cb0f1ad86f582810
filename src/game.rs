//! Session state and the active-piece lifecycle.
//!
//! Pure simulation: no pins, no pixels. Mutators return the pre-move piece
//! on success so the renderer can paint exactly the cells that changed.

use crate::field::Field;
use crate::pieces::{PieceKind, rotated};
use crate::rng::Rng;
use crate::scoring;
use crate::{Duration, FIELD_W};

/// The falling piece: kind, 4×4-box origin in field cells, quarter turns.
///
/// Exists only while falling; created at spawn, gone at lock or game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rot: u8,
}

impl ActivePiece {
    /// Box horizontally centered on the top row, base orientation.
    fn at_spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            x: FIELD_W / 2 - 2,
            y: 0,
            rot: 0,
        }
    }

    /// Field coordinates of the four occupied cells.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut out = [(0, 0); 4];
        for (slot, (dx, dy)) in out.iter_mut().zip(self.kind.offsets()) {
            let (rx, ry) = rotated(dx, dy, self.rot);
            *slot = (self.x + rx as i8, self.y + ry as i8);
        }
        out
    }
}

/// What a gravity step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// Down one row; carries the pre-move piece for the diff draw.
    Stepped(ActivePiece),
    /// Could not move: the piece is now part of the field, full rows have
    /// been cleared and scored.
    Locked { cleared: u8 },
}

/// What promoting the next piece did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The spawn placement was blocked: terminal game over, no piece.
    Blocked,
}

/// The one live game. There is never a second instance; reset
/// reinitializes this one in place.
pub struct GameSession {
    field: Field,
    active: Option<ActivePiece>,
    next_kind: PieceKind,
    score: u32,
    lines_cleared: u32,
    level: u32,
    fall_interval: Duration,
    game_over: bool,
    rng: Rng,
}

impl GameSession {
    pub fn new(seed: u32) -> Self {
        let mut rng = Rng::new(seed);
        let next_kind = rng.next_kind();
        Self {
            field: Field::new(),
            active: None,
            next_kind,
            score: 0,
            lines_cleared: 0,
            level: 1,
            fall_interval: scoring::BASE_FALL_INTERVAL,
            game_over: false,
            rng,
        }
    }

    /// Back to a fresh game: cleared field, zero score, level 1, base
    /// gravity, a freshly drawn next kind. The random stream carries on.
    pub fn reset(&mut self) {
        self.field.clear();
        self.active = None;
        self.score = 0;
        self.lines_cleared = 0;
        self.level = 1;
        self.fall_interval = scoring::BASE_FALL_INTERVAL;
        self.game_over = false;
        self.next_kind = self.rng.next_kind();
        info!("session reset");
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        self.field.fits(&piece.cells())
    }

    /// Promote the pre-drawn next kind to the falling piece and draw a new
    /// next kind. A blocked placement ends the game instead.
    pub fn spawn(&mut self) -> SpawnOutcome {
        let piece = ActivePiece::at_spawn(self.next_kind);
        self.next_kind = self.rng.next_kind();
        if !self.fits(&piece) {
            self.game_over = true;
            self.active = None;
            info!("game over, score {}", self.score);
            return SpawnOutcome::Blocked;
        }
        trace!("spawn {}", piece.kind);
        self.active = Some(piece);
        SpawnOutcome::Spawned
    }

    /// Move the piece one column. `Some(pre-move piece)` when committed,
    /// `None` when rejected or there is nothing falling.
    pub fn shift(&mut self, dx: i8) -> Option<ActivePiece> {
        let cur = self.active?;
        let moved = ActivePiece {
            x: cur.x + dx,
            ..cur
        };
        if !self.fits(&moved) {
            return None;
        }
        self.active = Some(moved);
        Some(cur)
    }

    /// Quarter-turn clockwise. No wall kicks: a colliding rotation is
    /// rejected outright, no alternate offset is tried.
    pub fn rotate(&mut self) -> Option<ActivePiece> {
        let cur = self.active?;
        let turned = ActivePiece {
            rot: (cur.rot + 1) & 3,
            ..cur
        };
        if !self.fits(&turned) {
            return None;
        }
        self.active = Some(turned);
        Some(cur)
    }

    /// One gravity step: down a row, or lock in place and run the
    /// clear/score pass.
    pub fn fall(&mut self) -> Option<FallOutcome> {
        let cur = self.active?;
        let dropped = ActivePiece {
            y: cur.y + 1,
            ..cur
        };
        if self.fits(&dropped) {
            self.active = Some(dropped);
            return Some(FallOutcome::Stepped(cur));
        }

        self.field.lock(&cur.cells());
        self.active = None;
        let cleared = self.field.clear_full_rows();
        if cleared > 0 {
            self.apply_clears(cleared);
        }
        debug!("locked, cleared {}", cleared);
        Some(FallOutcome::Locked { cleared })
    }

    fn apply_clears(&mut self, cleared: u8) {
        self.score += scoring::score_for(cleared);
        self.lines_cleared += u32::from(cleared);
        let level = scoring::level_for(self.lines_cleared);
        if level != self.level {
            self.level = level;
            self.fall_interval = scoring::fall_interval_for(level);
            info!("level {}", level);
        }
    }
}
