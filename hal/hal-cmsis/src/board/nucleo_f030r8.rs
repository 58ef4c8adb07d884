//! NUCLEO-F030R8 (STM32F030R8T6, Cortex-M0)
//!
//! | Channel | Pin  | Vector       |
//! |---------|------|--------------|
//! | 0       | PC13 | EXTI4_15 (7) |
//! | 1       | PA0  | EXTI0_1 (5)  |
//! | 2       | PB3  | EXTI2_3 (6)  |

use log::debug;

use hal::gpio::{PinName, Port};
use hal::gpio_irq::{on_channel_fire, ChannelIndex};
use hal::{ChannelTable, GpioIrq, PinBinding, PinMap};

use super::{copy_vectors, FLASH_VECTORS, RAM_VECTORS};
use crate::exti::Exti;
use crate::nvic::{Nvic, CORE_VECTORS, NVIC_BASE};
use crate::reg;
use crate::stm32f0::{GpioBanks, PRIORITY_BITS};

pub const CHANNEL_COUNT: usize = 3;

/// Blue push button B1, active low.
pub const USER_BUTTON: PinName = PinName::new(Port::C, 13);
pub const PA0: PinName = PinName::new(Port::A, 0);
pub const PB3: PinName = PinName::new(Port::B, 3);

pub const EXTI0_1_IRQ: u16 = 5;
pub const EXTI2_3_IRQ: u16 = 6;
pub const EXTI4_15_IRQ: u16 = 7;

/// Device interrupts on the STM32F030.
pub const IRQ_COUNT: u16 = 32;

const VECTOR_COUNT: usize = CORE_VECTORS + IRQ_COUNT as usize;

/// SYSCFG configuration register 1.
const SYSCFG_CFGR1: usize = 0x4001_0000;
/// MEM_MODE = 0b11: SRAM mapped at 0x0000_0000.
const MEM_MODE_SRAM: u32 = 0b11;

pub static CHANNELS: ChannelTable<CHANNEL_COUNT> = ChannelTable::new();

pub static PIN_MAP: PinMap<CHANNEL_COUNT> = PinMap::new([
    PinBinding::new(USER_BUTTON, 0, EXTI4_15_IRQ, channel_0),
    PinBinding::new(PA0, 1, EXTI0_1_IRQ, channel_1),
    PinBinding::new(PB3, 2, EXTI2_3_IRQ, channel_2),
]);

/// Front end over this board's on-chip peripherals.
pub type BoardIrq = GpioIrq<'static, GpioBanks, Exti, Nvic, CHANNEL_COUNT>;

/// # Safety
/// Must only be used on an STM32F030R8 after [`relocate_vector_table`].
pub unsafe fn gpio_irq() -> BoardIrq {
    GpioIrq::new(&CHANNELS, &PIN_MAP, GpioBanks::stm32(), Exti::stm32(), nvic())
}

/// NVIC using the RAM vector table.
///
/// # Safety
/// Must only be used on an STM32F030R8.
pub const unsafe fn nvic() -> Nvic {
    Nvic::new(NVIC_BASE, RAM_VECTORS, PRIORITY_BITS, IRQ_COUNT)
}

/// Copy the vector table to SRAM and remap SRAM at address 0.
///
/// The Cortex-M0 has no VTOR; the remap makes the core fetch vectors from
/// the copy.
///
/// # Safety
/// Interrupts must be disabled, and the linker script must leave the first
/// 48 words of SRAM unused.
pub unsafe fn relocate_vector_table() {
    copy_vectors(FLASH_VECTORS, RAM_VECTORS, VECTOR_COUNT);
    reg::modify(SYSCFG_CFGR1, |value| reg::field(value, 0, 2, MEM_MODE_SRAM));
    debug!("nucleo-f030r8: {} vectors remapped to SRAM", VECTOR_COUNT);
}

fn fire(channel: u8) {
    let (pins, exti) = unsafe { (GpioBanks::stm32(), Exti::stm32()) };
    on_channel_fire(&CHANNELS, &PIN_MAP, &pins, &exti, ChannelIndex::new(channel));
}

extern "C" fn channel_0() {
    fire(0);
}

extern "C" fn channel_1() {
    fire(1);
}

extern "C" fn channel_2() {
    fire(2);
}
