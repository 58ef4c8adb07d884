//! STM32 EXTI controller
//!
//! Shared by the F0 and F1 families. Line-to-port routing lives in the
//! `EXTICR1..4` registers of SYSCFG (F0) or AFIO (F1); both sit at the same
//! offset and are clocked by APB2ENR bit 0.

use core::ptr::{addr_of, addr_of_mut, read_volatile, write_volatile};

use hal::exti::{ExternalInterrupts, TriggerMode, LINE_COUNT};
use hal::gpio::Port;
use hal::{HalError, HalResult};

use crate::reg;

/// EXTI register block on STM32F0/F1.
pub const EXTI_BASE: usize = 0x4001_0400;

/// SYSCFG (F0) / AFIO (F1) register block.
pub const ROUTE_BASE: usize = 0x4001_0000;

/// RCC APB2 peripheral clock enable register (F0 and F1).
pub const RCC_APB2ENR: usize = 0x4002_1018;

/// SYSCFGCOMPEN (F0) / AFIOEN (F1).
const ROUTE_CLOCK_EN: u32 = 1 << 0;

#[repr(C)]
struct ExtiRegs {
    /// Interrupt mask.
    imr: u32,
    /// Event mask.
    emr: u32,
    /// Rising trigger selection.
    rtsr: u32,
    /// Falling trigger selection.
    ftsr: u32,
    /// Software interrupt event.
    swier: u32,
    /// Pending, write 1 to clear.
    pr: u32,
}

#[repr(C)]
struct RouteRegs {
    _head: [u32; 2],
    /// Four 4-bit port selectors per register.
    exticr: [u32; 4],
}

/// EXTI lines 0..15 plus their port routing.
pub struct Exti {
    regs: *mut ExtiRegs,
    route: *mut RouteRegs,
    clock_enable: usize,
}

impl Exti {
    /// # Safety
    /// `base`, `route_base` and `clock_enable` must address the EXTI block,
    /// the SYSCFG/AFIO block and the RCC APB2ENR register (or RAM laid out
    /// the same way) for the lifetime of the value.
    pub const unsafe fn new(base: usize, route_base: usize, clock_enable: usize) -> Self {
        Self {
            regs: base as *mut ExtiRegs,
            route: route_base as *mut RouteRegs,
            clock_enable,
        }
    }

    /// The on-chip controller.
    ///
    /// # Safety
    /// Must only be used on an STM32F0/F1 target.
    pub const unsafe fn stm32() -> Self {
        Self::new(EXTI_BASE, ROUTE_BASE, RCC_APB2ENR)
    }

    /// Raise `line` from software, as if its edge had occurred.
    pub fn trigger_software(&self, line: u8) {
        if line >= LINE_COUNT {
            return;
        }
        unsafe {
            write_volatile(addr_of_mut!((*self.regs).swier), 1 << line);
        }
    }

    fn set_bit(&self, register: usize, line: u8, set: bool) {
        unsafe {
            reg::modify(register, |value| {
                reg::field(value, u32::from(line), 1, u32::from(set))
            });
        }
    }
}

impl ExternalInterrupts for Exti {
    fn route(&self, port: Port, line: u8) -> HalResult<()> {
        if line >= LINE_COUNT {
            return Err(HalError::InvalidParameter);
        }

        unsafe {
            reg::modify(self.clock_enable, |value| value | ROUTE_CLOCK_EN);

            let exticr = addr_of!((*self.route).exticr)
                .cast::<u32>()
                .add(usize::from(line / 4)) as usize;
            reg::modify(exticr, |value| {
                reg::field(value, u32::from(line % 4), 4, u32::from(port.index()))
            });
        }
        Ok(())
    }

    fn configure_line(&self, line: u8, trigger: TriggerMode, enabled: bool) {
        if line >= LINE_COUNT {
            return;
        }

        unsafe {
            self.set_bit(addr_of!((*self.regs).rtsr) as usize, line, trigger.rising());
            self.set_bit(addr_of!((*self.regs).ftsr) as usize, line, trigger.falling());
            self.set_bit(addr_of!((*self.regs).emr) as usize, line, false);
            self.set_bit(addr_of!((*self.regs).imr) as usize, line, enabled);
        }
    }

    fn is_pending(&self, line: u8) -> bool {
        if line >= LINE_COUNT {
            return false;
        }
        unsafe { read_volatile(addr_of!((*self.regs).pr)) & (1 << line) != 0 }
    }

    fn clear_pending(&self, line: u8) {
        if line >= LINE_COUNT {
            return;
        }
        unsafe {
            write_volatile(addr_of_mut!((*self.regs).pr), 1 << line);
        }
    }
}
