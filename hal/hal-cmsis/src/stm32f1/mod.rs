//! STM32F1 family

mod gpio;

pub use gpio::{GpioBanks, APB2ENR, BANKS};

/// Priority bits implemented by the Cortex-M3 NVIC on this family.
pub const PRIORITY_BITS: u8 = 4;
