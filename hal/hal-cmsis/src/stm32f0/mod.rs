//! STM32F0 family

mod gpio;

pub use gpio::{GpioBanks, AHBENR, BANKS};

/// Priority bits implemented by the Cortex-M0 NVIC.
pub const PRIORITY_BITS: u8 = 2;
