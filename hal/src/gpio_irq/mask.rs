//! Scoped masking of one interrupt vector

use crate::interrupt::{InterruptController, IrqNumber};

/// Masks `irq` for as long as the guard lives.
///
/// Dropping the guard re-enables the vector only if it was enabled when the
/// guard was taken, on every exit path. [`LineMask::keep_masked`] ends the
/// scope without re-enabling.
#[must_use = "the vector is unmasked again as soon as the guard is dropped"]
pub struct LineMask<'a, N: InterruptController + ?Sized> {
    nvic: &'a N,
    irq: IrqNumber,
    restore: bool,
}

impl<'a, N: InterruptController + ?Sized> LineMask<'a, N> {
    pub fn new(nvic: &'a N, irq: IrqNumber) -> Self {
        let restore = nvic.is_enabled(irq);
        nvic.disable_interrupt(irq);
        Self { nvic, irq, restore }
    }

    /// Whether dropping the guard will re-enable the vector.
    pub fn restores(&self) -> bool {
        self.restore
    }

    /// Leave the vector disabled.
    pub fn keep_masked(mut self) {
        self.restore = false;
    }
}

impl<N: InterruptController + ?Sized> Drop for LineMask<'_, N> {
    fn drop(&mut self) {
        if self.restore {
            self.nvic.enable_interrupt(self.irq);
        }
    }
}
