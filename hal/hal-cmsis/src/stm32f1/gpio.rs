//! STM32F1 GPIO banks (CRL/CRH layout)
//!
//! Every pin has a 4-bit `CNF[1:0]:MODE[1:0]` nibble, pins 0..7 in CRL and
//! 8..15 in CRH. Pulled inputs share one configuration; the ODR bit selects
//! pull-up (1) or pull-down (0).

use core::ptr::{addr_of, addr_of_mut, read_volatile, write_volatile};

use hal::gpio::{port_of, Level, PinConfig, PinMode, PinName, Port};
use hal::{HalError, HalResult};

use crate::reg;

/// RCC APB2 peripheral clock enable register.
pub const APB2ENR: usize = 0x4002_1018;

/// GPIOA..GPIOE.
pub const BANKS: [Option<usize>; Port::COUNT] = [
    Some(0x4001_0800),
    Some(0x4001_0C00),
    Some(0x4001_1000),
    Some(0x4001_1400),
    Some(0x4001_1800),
    None,
    None,
];

/// IOPAEN; ports B..E follow.
const CLOCK_EN_SHIFT: u8 = 2;

#[repr(C)]
struct GpioRegs {
    cr: [u32; 2],
    idr: u32,
    odr: u32,
    bsrr: u32,
    brr: u32,
    lckr: u32,
}

const CNF_FLOATING_INPUT: u32 = 0b0100;
const CNF_PULL_INPUT: u32 = 0b1000;
/// Push-pull, 50 MHz.
const CNF_OUTPUT: u32 = 0b0011;
/// Open-drain, 50 MHz.
const CNF_OUTPUT_OPEN_DRAIN: u32 = 0b0111;
/// Alternate push-pull, 50 MHz.
const CNF_ALTERNATE: u32 = 0b1011;

/// GPIO bank configuration for STM32F1 devices.
pub struct GpioBanks {
    clock_enable: usize,
    banks: [Option<usize>; Port::COUNT],
}

impl GpioBanks {
    /// # Safety
    /// `clock_enable` must address RCC APB2ENR and every `Some` entry of
    /// `banks` a GPIO register block (or RAM laid out the same way) for the
    /// lifetime of the value.
    pub const unsafe fn new(clock_enable: usize, banks: [Option<usize>; Port::COUNT]) -> Self {
        Self {
            clock_enable,
            banks,
        }
    }

    /// The on-chip banks.
    ///
    /// # Safety
    /// Must only be used on an STM32F1 target.
    pub const unsafe fn stm32() -> Self {
        Self::new(APB2ENR, BANKS)
    }

    fn regs(bank_address: usize) -> *mut GpioRegs {
        bank_address as *mut GpioRegs
    }
}

impl PinConfig for GpioBanks {
    fn bank_address(&self, port: Port) -> HalResult<usize> {
        let base = self.banks[usize::from(port.index())].ok_or(HalError::NotSupported)?;
        unsafe {
            reg::modify(self.clock_enable, |value| {
                value | 1 << (CLOCK_EN_SHIFT + port.index())
            });
        }
        Ok(base)
    }

    fn set_mode(&self, pin: PinName, mode: PinMode) -> HalResult<()> {
        let bank_address = self.bank_address(port_of(pin)?)?;
        let regs = Self::regs(bank_address);
        let index = u32::from(pin.index());

        let cnf = match mode {
            PinMode::Input => CNF_FLOATING_INPUT,
            PinMode::InputPullUp | PinMode::InputPullDown => CNF_PULL_INPUT,
            PinMode::Output => CNF_OUTPUT,
            PinMode::OutputOpenDrain => CNF_OUTPUT_OPEN_DRAIN,
            // Peripheral selection is fixed per pin on this family.
            PinMode::Alternate(_) => CNF_ALTERNATE,
        };

        unsafe {
            let cr = addr_of!((*regs).cr).cast::<u32>().add((index / 8) as usize);
            reg::modify(cr as usize, |value| reg::field(value, index % 8, 4, cnf));
        }

        match mode {
            PinMode::InputPullUp => self.write_output_level(bank_address, pin.index(), Level::High),
            PinMode::InputPullDown => self.write_output_level(bank_address, pin.index(), Level::Low),
            _ => {}
        }
        Ok(())
    }

    fn read_input_level(&self, bank_address: usize, offset: u8) -> Level {
        let idr = unsafe { read_volatile(addr_of!((*Self::regs(bank_address)).idr)) };
        Level::from(idr & (1 << offset) != 0)
    }

    fn write_output_level(&self, bank_address: usize, offset: u8, level: Level) {
        let regs = Self::regs(bank_address);
        unsafe {
            match level {
                Level::High => write_volatile(addr_of_mut!((*regs).bsrr), 1 << offset),
                Level::Low => write_volatile(addr_of_mut!((*regs).brr), 1 << offset),
            }
        }
    }
}
