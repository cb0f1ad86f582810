//! Score table and level/speed progression.

use crate::Duration;

const BASE_FALL_MS: u32 = 500;
const MIN_FALL_MS: u32 = 80;
/// Gravity speed-up per level step.
const LEVEL_STEP_MS: u32 = 40;

/// Gravity interval at level 1.
pub const BASE_FALL_INTERVAL: Duration = Duration::millis(BASE_FALL_MS);

/// Points awarded for `cleared` rows removed in one pass.
///
/// The non-linear table covers the reachable 1–4 range; anything larger
/// falls back to a flat 100 per row.
pub fn score_for(cleared: u8) -> u32 {
    match cleared {
        0 => 0,
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        n => u32::from(n) * 100,
    }
}

/// Level after `lines` total cleared rows: one step every 10 lines.
pub fn level_for(lines: u32) -> u32 {
    1 + lines / 10
}

/// Gravity interval for `level`: 40 ms faster per level past the first,
/// clamped at the floor. Monotonically non-increasing in `level`.
pub fn fall_interval_for(level: u32) -> Duration {
    let ms = BASE_FALL_MS
        .saturating_sub(LEVEL_STEP_MS.saturating_mul(level.saturating_sub(1)))
        .max(MIN_FALL_MS);
    Duration::millis(ms)
}
