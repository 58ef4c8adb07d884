//! Button IRQ Example
//!
//! NUCLEO-F030R8: every press of the blue button (PC13, active low) toggles
//! LD2 (PA5). Releases are reported too once rising edges are requested, and
//! are counted but otherwise ignored.
//!
//! `cargo run --release` (target and linker script come from `.cargo/config.toml`).

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use cortex_m_rt::entry;
use panic_halt as _;

use hal::gpio::{Edge, GpioPin, Pin};
use hal::PinName;
use hal_cmsis::board::nucleo_f030r8 as board;
use hal_cmsis::stm32f0::GpioBanks;

const LED: PinName = PinName::new(hal::Port::A, 5);
const BUTTON_CLIENT: u32 = 1;

static PRESSED: AtomicBool = AtomicBool::new(false);
static RELEASES: AtomicU32 = AtomicU32::new(0);

fn on_button(client_id: u32, edge: Edge) {
    if client_id != BUTTON_CLIENT {
        return;
    }
    match edge {
        Edge::Falling => PRESSED.store(true, Ordering::Release),
        Edge::Rising => {
            RELEASES.store(RELEASES.load(Ordering::Relaxed) + 1, Ordering::Relaxed);
        }
    }
}

#[entry]
fn main() -> ! {
    cortex_m::interrupt::disable();
    let (irq, banks) = unsafe {
        board::relocate_vector_table();
        (board::gpio_irq(), GpioBanks::stm32())
    };
    unsafe { cortex_m::interrupt::enable() };

    let Ok(mut led) = Pin::output(&banks, LED) else {
        halt();
    };
    let Ok(button) = irq.init(board::USER_BUTTON, on_button, BUTTON_CLIENT) else {
        halt();
    };
    irq.set_edge(&button, Edge::Falling, true);
    irq.set_edge(&button, Edge::Rising, true);

    loop {
        cortex_m::asm::wfi();
        if PRESSED.swap(false, Ordering::Acquire) {
            if led.toggle().is_err() {
                halt();
            }
        }
    }
}

fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
