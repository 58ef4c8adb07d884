//! Cortex-M NVIC with a RAM vector table

use core::ptr::{addr_of, write_volatile};

use hal::interrupt::{InterruptController, InterruptHandler, InterruptPriority, IrqNumber};
use hal::{HalError, HalResult};

use crate::reg;

/// NVIC register block on every Cortex-M core.
pub const NVIC_BASE: usize = 0xE000_E100;

/// Exception entries preceding IRQ 0 in the vector table.
pub const CORE_VECTORS: usize = 16;

#[repr(C)]
struct NvicRegs {
    /// Set-enable.
    iser: [u32; 8],
    _reserved0: [u32; 24],
    /// Clear-enable.
    icer: [u32; 8],
    _reserved1: [u32; 24],
    /// Set-pending.
    ispr: [u32; 8],
    _reserved2: [u32; 24],
    /// Clear-pending.
    icpr: [u32; 8],
    _reserved3: [u32; 24],
    /// Active bit (absent on ARMv6-M, reserved there).
    iabr: [u32; 8],
    _reserved4: [u32; 56],
    /// Priority, one byte per IRQ. Accessed as words only (ARMv6-M).
    ipr: [u32; 60],
}

/// Size of the register block in words, for building a fake one in RAM.
pub const NVIC_WORDS: usize = core::mem::size_of::<NvicRegs>() / 4;

/// Nested vectored interrupt controller of one device.
pub struct Nvic {
    regs: *mut NvicRegs,
    vectors: *mut usize,
    priority_bits: u8,
    irq_count: u16,
}

impl Nvic {
    /// # Safety
    /// `base` must address the NVIC (or RAM laid out the same way) and
    /// `vector_table` the active, RAM-resident vector table with at least
    /// `16 + irq_count` entries, for the lifetime of the value.
    ///
    /// # Panics
    ///
    /// Panics if `priority_bits` is not in `1..=8`.
    pub const unsafe fn new(
        base: usize,
        vector_table: usize,
        priority_bits: u8,
        irq_count: u16,
    ) -> Self {
        assert!(priority_bits >= 1 && priority_bits <= 8, "priority bits out of range");
        Self {
            regs: base as *mut NvicRegs,
            vectors: vector_table as *mut usize,
            priority_bits,
            irq_count,
        }
    }

    /// Number of device IRQs this controller accepts.
    pub fn irq_count(&self) -> u16 {
        self.irq_count
    }

    fn check(&self, irq: IrqNumber) -> HalResult<usize> {
        if irq.raw() < self.irq_count {
            Ok(usize::from(irq.raw()))
        } else {
            Err(HalError::InvalidParameter)
        }
    }

    /// Address of the bank word holding `irq`'s bit, and the bit.
    fn bit(&self, bank: *const [u32; 8], irq: usize) -> (usize, u32) {
        let word = unsafe { bank.cast::<u32>().add(irq / 32) } as usize;
        (word, 1 << (irq % 32))
    }

    fn priority_mask(&self) -> u8 {
        0xFF << (8 - self.priority_bits)
    }
}

impl InterruptController for Nvic {
    fn enable_interrupt(&self, irq: IrqNumber) {
        let Ok(irq) = self.check(irq) else { return };
        let (word, bit) = self.bit(unsafe { addr_of!((*self.regs).iser) }, irq);
        unsafe { reg::write(word, bit) }
    }

    fn disable_interrupt(&self, irq: IrqNumber) {
        let Ok(irq) = self.check(irq) else { return };
        let (word, bit) = self.bit(unsafe { addr_of!((*self.regs).icer) }, irq);
        unsafe { reg::write(word, bit) }
    }

    fn is_enabled(&self, irq: IrqNumber) -> bool {
        let Ok(irq) = self.check(irq) else {
            return false;
        };
        let (word, bit) = self.bit(unsafe { addr_of!((*self.regs).iser) }, irq);
        unsafe { reg::read(word) & bit != 0 }
    }

    fn set_priority(&self, irq: IrqNumber, priority: InterruptPriority) -> HalResult<()> {
        let irq = self.check(irq)?;
        let priority = u32::from(priority & self.priority_mask());
        unsafe {
            let word = addr_of!((*self.regs).ipr).cast::<u32>().add(irq / 4) as usize;
            reg::modify(word, |value| reg::field(value, (irq % 4) as u32, 8, priority));
        }
        Ok(())
    }

    fn lowest_priority(&self) -> InterruptPriority {
        self.priority_mask()
    }

    fn is_pending(&self, irq: IrqNumber) -> bool {
        let Ok(irq) = self.check(irq) else {
            return false;
        };
        let (word, bit) = self.bit(unsafe { addr_of!((*self.regs).ispr) }, irq);
        unsafe { reg::read(word) & bit != 0 }
    }

    fn clear_pending(&self, irq: IrqNumber) {
        let Ok(irq) = self.check(irq) else { return };
        let (word, bit) = self.bit(unsafe { addr_of!((*self.regs).icpr) }, irq);
        unsafe { reg::write(word, bit) }
    }

    fn set_vector(&self, irq: IrqNumber, handler: InterruptHandler) -> HalResult<()> {
        let irq = self.check(irq)?;
        unsafe {
            write_volatile(self.vectors.add(CORE_VECTORS + irq), handler as usize);
        }
        Ok(())
    }
}
