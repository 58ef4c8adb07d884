//! NUCLEO-F103RB (STM32F103RBT6, Cortex-M3)
//!
//! | Channel | Pin  | Vector         |
//! |---------|------|----------------|
//! | 0       | PC13 | EXTI15_10 (40) |
//! | 1       | PA0  | EXTI0 (6)      |
//! | 2       | PB3  | EXTI3 (9)      |

use core::ptr::write_volatile;

use log::debug;

use hal::gpio::{PinName, Port};
use hal::gpio_irq::{on_channel_fire, ChannelIndex};
use hal::{ChannelTable, GpioIrq, PinBinding, PinMap};

use super::{copy_vectors, FLASH_VECTORS, RAM_VECTORS};
use crate::exti::Exti;
use crate::nvic::{Nvic, CORE_VECTORS, NVIC_BASE};
use crate::stm32f1::{GpioBanks, PRIORITY_BITS};

pub const CHANNEL_COUNT: usize = 3;

/// Blue push button B1, active low.
pub const USER_BUTTON: PinName = PinName::new(Port::C, 13);
pub const PA0: PinName = PinName::new(Port::A, 0);
pub const PB3: PinName = PinName::new(Port::B, 3);

pub const EXTI0_IRQ: u16 = 6;
pub const EXTI3_IRQ: u16 = 9;
pub const EXTI15_10_IRQ: u16 = 40;

/// Device interrupts on medium-density STM32F103 parts.
pub const IRQ_COUNT: u16 = 43;

const VECTOR_COUNT: usize = CORE_VECTORS + IRQ_COUNT as usize;

/// System control block vector table offset register.
const SCB_VTOR: usize = 0xE000_ED08;

pub static CHANNELS: ChannelTable<CHANNEL_COUNT> = ChannelTable::new();

pub static PIN_MAP: PinMap<CHANNEL_COUNT> = PinMap::new([
    PinBinding::new(USER_BUTTON, 0, EXTI15_10_IRQ, channel_0),
    PinBinding::new(PA0, 1, EXTI0_IRQ, channel_1),
    PinBinding::new(PB3, 2, EXTI3_IRQ, channel_2),
]);

/// Front end over this board's on-chip peripherals.
pub type BoardIrq = GpioIrq<'static, GpioBanks, Exti, Nvic, CHANNEL_COUNT>;

/// # Safety
/// Must only be used on an STM32F103RB after [`relocate_vector_table`].
pub unsafe fn gpio_irq() -> BoardIrq {
    GpioIrq::new(&CHANNELS, &PIN_MAP, GpioBanks::stm32(), Exti::stm32(), nvic())
}

/// NVIC using the RAM vector table.
///
/// # Safety
/// Must only be used on an STM32F103RB.
pub const unsafe fn nvic() -> Nvic {
    Nvic::new(NVIC_BASE, RAM_VECTORS, PRIORITY_BITS, IRQ_COUNT)
}

/// Copy the vector table to SRAM and point VTOR at the copy.
///
/// # Safety
/// Interrupts must be disabled, and the linker script must leave the first
/// 64 words of SRAM unused (VTOR alignment).
pub unsafe fn relocate_vector_table() {
    copy_vectors(FLASH_VECTORS, RAM_VECTORS, VECTOR_COUNT);
    write_volatile(SCB_VTOR as *mut u32, RAM_VECTORS as u32);
    debug!("nucleo-f103rb: {} vectors relocated to SRAM", VECTOR_COUNT);
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
