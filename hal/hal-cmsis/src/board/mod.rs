//! NUCLEO board wiring
//!
//! Each board module owns the static [`ChannelTable`](hal::ChannelTable), the
//! pin-to-channel [`PinMap`](hal::PinMap) and one entry stub per channel. The
//! stubs are installed into a RAM vector table by
//! [`GpioIrq::init`](hal::GpioIrq::init), so the application must call the
//! board's `relocate_vector_table` once before binding any pin.

use core::ptr::{read_volatile, write_volatile};

pub mod nucleo_f030r8;
pub mod nucleo_f103rb;

/// Flash-resident vector table placed by the linker.
pub const FLASH_VECTORS: usize = 0x0800_0000;

/// Start of SRAM; the linker script must keep the first `vector_count` words
/// free for the relocated table.
pub const RAM_VECTORS: usize = 0x2000_0000;

/// Copy `vector_count` vectors from `from` to `to`.
///
/// # Safety
/// Both ranges must be valid for `vector_count` words and must not overlap.
pub(crate) unsafe fn copy_vectors(from: usize, to: usize, vector_count: usize) {
    let from = from as *const usize;
    let to = to as *mut usize;
    for i in 0..vector_count {
        write_volatile(to.add(i), read_volatile(from.add(i)));
    }
}
