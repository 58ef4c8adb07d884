//! Volatile access to 32-bit registers by address

use core::ptr::{read_volatile, write_volatile};

/// # Safety
/// `addr` must be a valid, aligned 32-bit register.
#[inline]
pub(crate) unsafe fn read(addr: usize) -> u32 {
    read_volatile(addr as *const u32)
}

/// # Safety
/// `addr` must be a valid, aligned 32-bit register.
#[inline]
pub(crate) unsafe fn write(addr: usize, value: u32) {
    write_volatile(addr as *mut u32, value)
}

/// Read-modify-write of a register shared with other pins or lines.
///
/// Runs inside a critical section so an interrupt cannot interleave its own
/// update of the same word.
///
/// # Safety
/// `addr` must be a valid, aligned 32-bit register.
#[inline]
pub(crate) unsafe fn modify(addr: usize, f: impl FnOnce(u32) -> u32) {
    critical_section::with(|_| {
        let value = read(addr);
        write(addr, f(value));
    })
}

/// Replace the `width`-bit field of pin/line `index` with `value`.
#[inline]
pub(crate) const fn field(word: u32, index: u32, width: u32, value: u32) -> u32 {
    let shift = index * width;
    let mask = ((1 << width) - 1) << shift;
    (word & !mask) | ((value << shift) & mask)
}
