//! External interrupt line abstraction
//!
//! An external interrupt controller owns a small number of edge detectors
//! ("lines"). Line `n` can be routed to pin `n` of exactly one GPIO bank at a
//! time; the routed pin's edges latch the line's pending flag, which in turn
//! asserts a vectored interrupt.

use crate::error::HalResult;
use crate::gpio::Port;

/// Number of GPIO-capable lines.
pub const LINE_COUNT: u8 = 16;

/// Which edges latch a line's pending flag
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    None = 0,
    Rising = 1,
    Falling = 2,
    Both = 3,
}

impl TriggerMode {
    pub const fn rising(self) -> bool {
        matches!(self, TriggerMode::Rising | TriggerMode::Both)
    }

    pub const fn falling(self) -> bool {
        matches!(self, TriggerMode::Falling | TriggerMode::Both)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TriggerMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TriggerMode::None => defmt::write!(fmt, "None"),
            TriggerMode::Rising => defmt::write!(fmt, "Rising"),
            TriggerMode::Falling => defmt::write!(fmt, "Falling"),
            TriggerMode::Both => defmt::write!(fmt, "Both"),
        }
    }
}

/// External interrupt/event controller
pub trait ExternalInterrupts {
    /// Connect `line` to the same-numbered pin of `port`.
    fn route(&self, port: Port, line: u8) -> HalResult<()>;

    /// Program the trigger selection of `line` and set its interrupt mask.
    ///
    /// With `enabled == false` the trigger selection is still programmed but
    /// the line stays masked.
    fn configure_line(&self, line: u8, trigger: TriggerMode, enabled: bool);

    /// Check if `line` has latched an edge
    fn is_pending(&self, line: u8) -> bool;

    /// Acknowledge `line`. Safe to call from interrupt context.
    fn clear_pending(&self, line: u8);
}

impl<T: ExternalInterrupts + ?Sized> ExternalInterrupts for &T {
    fn route(&self, port: Port, line: u8) -> HalResult<()> {
        (**self).route(port, line)
    }

    fn configure_line(&self, line: u8, trigger: TriggerMode, enabled: bool) {
        (**self).configure_line(line, trigger, enabled)
    }

    fn is_pending(&self, line: u8) -> bool {
        (**self).is_pending(line)
    }

    fn clear_pending(&self, line: u8) {
        (**self).clear_pending(line)
    }
}
