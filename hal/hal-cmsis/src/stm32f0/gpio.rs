//! STM32F0 GPIO banks (MODER/OTYPER/PUPDR layout)

use core::ptr::{addr_of, addr_of_mut, read_volatile, write_volatile};

use hal::gpio::{port_of, Level, PinConfig, PinMode, PinName, Port};
use hal::{HalError, HalResult};

use crate::reg;

/// RCC AHB peripheral clock enable register.
pub const AHBENR: usize = 0x4002_1014;

/// Banks bonded out on the STM32F030 (no GPIOE, no GPIOG).
pub const BANKS: [Option<usize>; Port::COUNT] = [
    Some(0x4800_0000),
    Some(0x4800_0400),
    Some(0x4800_0800),
    Some(0x4800_0C00),
    None,
    Some(0x4800_1400),
    None,
];

/// IOPAEN; ports B..F follow.
const CLOCK_EN_SHIFT: u8 = 17;

#[repr(C)]
struct GpioRegs {
    moder: u32,
    otyper: u32,
    ospeedr: u32,
    pupdr: u32,
    idr: u32,
    odr: u32,
    bsrr: u32,
    lckr: u32,
    afr: [u32; 2],
    brr: u32,
}

const MODE_INPUT: u32 = 0b00;
const MODE_OUTPUT: u32 = 0b01;
const MODE_ALTERNATE: u32 = 0b10;

const PULL_NONE: u32 = 0b00;
const PULL_UP: u32 = 0b01;
const PULL_DOWN: u32 = 0b10;

/// GPIO bank configuration for STM32F0 devices.
pub struct GpioBanks {
    clock_enable: usize,
    banks: [Option<usize>; Port::COUNT],
}

impl GpioBanks {
    /// # Safety
    /// `clock_enable` must address RCC AHBENR and every `Some` entry of
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
    /// Must only be used on an STM32F0 target.
    pub const unsafe fn stm32() -> Self {
        Self::new(AHBENR, BANKS)
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
        let regs = Self::regs(self.bank_address(port_of(pin)?)?);
        let index = u32::from(pin.index());

        let (moder, pull, open_drain) = match mode {
            PinMode::Input => (MODE_INPUT, Some(PULL_NONE), None),
            PinMode::InputPullUp => (MODE_INPUT, Some(PULL_UP), None),
            PinMode::InputPullDown => (MODE_INPUT, Some(PULL_DOWN), None),
            PinMode::Output => (MODE_OUTPUT, None, Some(false)),
            PinMode::OutputOpenDrain => (MODE_OUTPUT, None, Some(true)),
            PinMode::Alternate(function) => {
                if function > 0x0F {
                    return Err(HalError::InvalidParameter);
                }
                unsafe {
                    let afr = addr_of!((*regs).afr).cast::<u32>().add((index / 8) as usize);
                    reg::modify(afr as usize, |value| {
                        reg::field(value, index % 8, 4, u32::from(function))
                    });
                }
                (MODE_ALTERNATE, None, None)
            }
        };

        unsafe {
            if let Some(open_drain) = open_drain {
                reg::modify(addr_of!((*regs).otyper) as usize, |value| {
                    reg::field(value, index, 1, u32::from(open_drain))
                });
            }
            if let Some(pull) = pull {
                reg::modify(addr_of!((*regs).pupdr) as usize, |value| {
                    reg::field(value, index, 2, pull)
                });
            }
            reg::modify(addr_of!((*regs).moder) as usize, |value| {
                reg::field(value, index, 2, moder)
            });
        }
        Ok(())
    }

    fn read_input_level(&self, bank_address: usize, offset: u8) -> Level {
        let idr = unsafe { read_volatile(addr_of!((*Self::regs(bank_address)).idr)) };
        Level::from(idr & (1 << offset) != 0)
    }

    fn write_output_level(&self, bank_address: usize, offset: u8, level: Level) {
        let bits = match level {
            Level::High => 1u32 << offset,
            Level::Low => 1u32 << (offset + 16),
        };
        unsafe {
            write_volatile(addr_of_mut!((*Self::regs(bank_address)).bsrr), bits);
        }
    }
}
