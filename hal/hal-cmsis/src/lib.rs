//! ARM CMSIS-style register backends for HAL
//!
//! Implements the `hal` collaborator traits directly on STM32 peripheral
//! registers and wires the NUCLEO boards' interrupt-capable pins.
//!
//! ## Backends
//! - [`Exti`]: external interrupt lines, routed through SYSCFG (F0) or AFIO (F1)
//! - [`Nvic`]: Cortex-M NVIC with a RAM vector table
//! - [`stm32f0::GpioBanks`] / [`stm32f1::GpioBanks`]: GPIO bank configuration
//!
//! ## Boards
//! - [`board::nucleo_f030r8`]
//! - [`board::nucleo_f103rb`]
//!
//! ## Example
//! ```no_run
//! use hal::gpio::Edge;
//! use hal_cmsis::board::nucleo_f030r8 as board;
//!
//! fn on_button(client_id: u32, edge: Edge) {
//!     let _ = (client_id, edge);
//! }
//!
//! let irq = unsafe { board::gpio_irq() };
//! let button = irq.init(board::USER_BUTTON, on_button, 1).unwrap();
//! irq.set_edge(&button, Edge::Rising, true);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod exti;
pub mod nvic;
pub mod stm32f0;
pub mod stm32f1;

mod reg;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use exti::Exti;
pub use nvic::Nvic;
