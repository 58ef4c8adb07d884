//! Interrupt controller abstraction

use core::fmt;

use crate::error::HalResult;

/// Interrupt priority (0 = highest on most platforms)
pub type InterruptPriority = u8;

/// Entry stub installed in the vector table.
pub type InterruptHandler = extern "C" fn();

/// Device interrupt number, as seen by the vectored interrupt controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqNumber(u16);

impl IrqNumber {
    pub const fn new(number: u16) -> Self {
        IrqNumber(number)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for IrqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IRQ{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqNumber {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "IRQ{}", self.0);
    }
}

/// Interrupt controller abstraction
///
/// Enable/disable/pending operations are infallible: they are issued with
/// interrupt numbers taken from validated binding tables. Configuration
/// operations reject numbers the device does not implement.
pub trait InterruptController {
    /// Enable interrupt
    fn enable_interrupt(&self, irq: IrqNumber);

    /// Disable interrupt
    fn disable_interrupt(&self, irq: IrqNumber);

    /// Check if interrupt is enabled
    fn is_enabled(&self, irq: IrqNumber) -> bool;

    /// Set interrupt priority
    fn set_priority(&self, irq: IrqNumber, priority: InterruptPriority) -> HalResult<()>;

    /// Numerically largest priority the controller implements.
    fn lowest_priority(&self) -> InterruptPriority;

    /// Check if interrupt is pending
    fn is_pending(&self, irq: IrqNumber) -> bool;

    /// Clear pending interrupt
    fn clear_pending(&self, irq: IrqNumber);

    /// Install `handler` as the vector for `irq`.
    fn set_vector(&self, irq: IrqNumber, handler: InterruptHandler) -> HalResult<()>;
}

impl<T: InterruptController + ?Sized> InterruptController for &T {
    fn enable_interrupt(&self, irq: IrqNumber) {
        (**self).enable_interrupt(irq)
    }

    fn disable_interrupt(&self, irq: IrqNumber) {
        (**self).disable_interrupt(irq)
    }

    fn is_enabled(&self, irq: IrqNumber) -> bool {
        (**self).is_enabled(irq)
    }

    fn set_priority(&self, irq: IrqNumber, priority: InterruptPriority) -> HalResult<()> {
        (**self).set_priority(irq, priority)
    }

    fn lowest_priority(&self) -> InterruptPriority {
        (**self).lowest_priority()
    }

    fn is_pending(&self, irq: IrqNumber) -> bool {
        (**self).is_pending(irq)
    }

    fn clear_pending(&self, irq: IrqNumber) {
        (**self).clear_pending(irq)
    }

    fn set_vector(&self, irq: IrqNumber, handler: InterruptHandler) -> HalResult<()> {
        (**self).set_vector(irq, handler)
    }
}
