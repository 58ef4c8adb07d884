//! Hardware Abstraction Layer (HAL) for embedded systems
//!
//! This crate provides vendor-agnostic traits for GPIO banks, external
//! interrupt lines and the vectored interrupt controller, plus the
//! [`gpio_irq`] layer that multiplexes edge-triggered pin notifications over a
//! small, fixed set of hardware interrupt channels.
//!
//! Vendor crates (see `hal-cmsis`) implement the traits against real
//! registers; the multiplexing logic itself is target independent.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod error;
pub mod exti;
pub mod gpio;
pub mod gpio_irq;
pub mod interrupt;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::{Edge, Level, PinMode, PinName, Port};
pub use gpio_irq::{ChannelTable, GpioIrq, GpioIrqHandle, PinBinding, PinMap};
