//! Button sampling: debounce, autorepeat gating, and the dual-function
//! rotate/reset button.
//!
//! All four lines are momentary, idle-high, asserted low. Sampling is pure
//! polling — the loop calls in with the current instant every cycle and
//! edges are derived here, never from interrupts.

use embedded_hal::digital::InputPin;

use crate::{Duration, Instant};

/// How long a changed line level must hold before it is believed.
const DEBOUNCE: Duration = Duration::millis(20);

/// Hold time that turns the dual-function press into a full reset.
const LONG_PRESS: Duration = Duration::millis(5_000);

/// One active-low button with time-based debouncing.
pub struct Debounced<P> {
    pin: P,
    stable: bool,
    last_raw: bool,
    changed_at: Instant,
}

impl<P: InputPin> Debounced<P> {
    pub fn new(pin: P, now: Instant) -> Self {
        Self {
            pin,
            stable: false,
            last_raw: false,
            changed_at: now,
        }
    }

    /// Debounced "is pressed" level (the line reads low).
    pub fn sample(&mut self, now: Instant) -> Result<bool, P::Error> {
        let raw = self.pin.is_low()?;
        if raw != self.last_raw {
            self.last_raw = raw;
            self.changed_at = now;
        }
        if raw != self.stable && now - self.changed_at >= DEBOUNCE {
            self.stable = raw;
        }
        Ok(self.stable)
    }
}

/// Actions produced by the dual-function button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldAction {
    /// Released before the hold threshold.
    Rotate,
    /// Threshold crossed while held; fires at most once per press.
    Reset,
}

#[derive(Clone, Copy)]
enum HoldState {
    Released,
    Pressed { since: Instant },
    LongFired,
}

/// Short/long-press disambiguation over one debounced button.
///
/// `Released → Pressed` on the falling edge, recording the press start.
/// While `Pressed`, crossing the threshold fires [`HoldAction::Reset`]
/// exactly once and moves to `LongFired`. A release below the threshold
/// fires [`HoldAction::Rotate`]; a release from `LongFired` is silent —
/// that press has already been consumed.
pub struct HoldButton<P> {
    button: Debounced<P>,
    state: HoldState,
}

impl<P: InputPin> HoldButton<P> {
    pub fn new(pin: P, now: Instant) -> Self {
        Self {
            button: Debounced::new(pin, now),
            state: HoldState::Released,
        }
    }

    /// Advance the machine one poll cycle; at most one action per call.
    pub fn update(&mut self, now: Instant) -> Result<Option<HoldAction>, P::Error> {
        let down = self.button.sample(now)?;
        let (state, action) = match self.state {
            HoldState::Released if down => (HoldState::Pressed { since: now }, None),
            HoldState::Pressed { since } if down => {
                if now - since >= LONG_PRESS {
                    (HoldState::LongFired, Some(HoldAction::Reset))
                } else {
                    (self.state, None)
                }
            }
            HoldState::Pressed { since } => {
                let action = if now - since < LONG_PRESS {
                    Some(HoldAction::Rotate)
                } else {
                    None
                };
                (HoldState::Released, action)
            }
            HoldState::LongFired if !down => (HoldState::Released, None),
            _ => (self.state, None),
        };
        self.state = state;
        Ok(action)
    }
}

/// Rate gate for held-button autorepeat.
///
/// The gate is stamped on every accepted attempt whether or not the move
/// itself commits, so releasing and re-pressing cannot bypass the
/// interval.
pub struct Repeater {
    interval: Duration,
    last: Instant,
}

impl Repeater {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    /// True when a repeat is due; stamps the gate when it is.
    pub fn ready(&mut self, now: Instant) -> bool {
        if now - self.last > self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// The appliance's four momentary inputs.
pub struct Buttons<P> {
    pub left: Debounced<P>,
    pub right: Debounced<P>,
    pub soft_drop: Debounced<P>,
    pub action: HoldButton<P>,
}

impl<P: InputPin> Buttons<P> {
    pub fn new(left: P, right: P, soft_drop: P, action: P, now: Instant) -> Self {
        Self {
            left: Debounced::new(left, now),
            right: Debounced::new(right, now),
            soft_drop: Debounced::new(soft_drop, now),
            action: HoldButton::new(action, now),
        }
    }
}
