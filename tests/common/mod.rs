//! Shared test doubles: a recording panel link and scripted pins.
//!
//! The panel can never be read back, so rendering is asserted on the
//! transfer sequence the driver emits, not on a reconstructed image.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use blockbox::PanelInterface;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// One transfer as seen by the recording sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Reset,
    Command(u8),
    Data(Vec<u8>),
    Pixels(Vec<u16>),
    Settle(u32),
}

/// `PanelInterface` that records every transfer for later assertions.
#[derive(Clone, Default)]
pub struct RecordingLink {
    ops: Rc<RefCell<Vec<Op>>>,
}

impl RecordingLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub fn clear(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Just the pixel bursts, in emission order.
    pub fn pixel_bursts(&self) -> Vec<Vec<u16>> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Pixels(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PanelInterface for RecordingLink {
    type Error = Infallible;

    fn hard_reset(&mut self) -> Result<(), Infallible> {
        self.ops.borrow_mut().push(Op::Reset);
        Ok(())
    }

    fn command(&mut self, command: u8) -> Result<(), Infallible> {
        self.ops.borrow_mut().push(Op::Command(command));
        Ok(())
    }

    fn data(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.ops.borrow_mut().push(Op::Data(data.to_vec()));
        Ok(())
    }

    fn pixels<T>(&mut self, pixels: T) -> Result<(), Infallible>
    where
        T: IntoIterator<Item = u16>,
    {
        self.ops
            .borrow_mut()
            .push(Op::Pixels(pixels.into_iter().collect()));
        Ok(())
    }

    fn settle_ms(&mut self, ms: u32) {
        self.ops.borrow_mut().push(Op::Settle(ms));
    }
}

/// Shared trace of output-pin level changes across a pin group.
#[derive(Clone, Default)]
pub struct PinTrace(Rc<RefCell<Vec<(&'static str, bool)>>>);

impl PinTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, name: &'static str) -> LoggedPin {
        LoggedPin {
            name,
            trace: self.0.clone(),
        }
    }

    pub fn take(&self) -> Vec<(&'static str, bool)> {
        self.0.borrow_mut().drain(..).collect()
    }
}

/// Output pin logging every driven level into its [`PinTrace`].
pub struct LoggedPin {
    name: &'static str,
    trace: Rc<RefCell<Vec<(&'static str, bool)>>>,
}

impl ErrorType for LoggedPin {
    type Error = Infallible;
}

impl OutputPin for LoggedPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.trace.borrow_mut().push((self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.trace.borrow_mut().push((self.name, true));
        Ok(())
    }
}

/// Input pin with an externally scripted level, idle-high like the real
/// buttons.
#[derive(Clone)]
pub struct LevelPin(Rc<Cell<bool>>);

impl LevelPin {
    pub fn released() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn press(&self) {
        self.0.set(false);
    }

    pub fn release(&self) {
        self.0.set(true);
    }
}

impl ErrorType for LevelPin {
    type Error = Infallible;
}

impl InputPin for LevelPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

/// Delay that spends no time; bit timing is asserted structurally.
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
