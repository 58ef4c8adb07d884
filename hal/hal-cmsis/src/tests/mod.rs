use core::cell::UnsafeCell;
use core::ptr::{read_volatile, write_volatile};

mod gpio_f1;
mod nvic;

/// Register block stand-in living in host RAM.
pub(crate) struct FakeBlock<T: Copy + Default, const N: usize>(UnsafeCell<[T; N]>);

impl<T: Copy + Default, const N: usize> FakeBlock<T, N> {
    pub(crate) fn new() -> Self {
        Self(UnsafeCell::new([T::default(); N]))
    }

    pub(crate) fn base(&self) -> usize {
        self.0.get() as usize
    }

    pub(crate) fn word(&self, index: usize) -> T {
        assert!(index < N);
        unsafe { read_volatile(self.0.get().cast::<T>().add(index)) }
    }

    pub(crate) fn set(&self, index: usize, value: T) {
        assert!(index < N);
        unsafe { write_volatile(self.0.get().cast::<T>().add(index), value) }
    }
}

pub(crate) type FakeRegs<const N: usize> = FakeBlock<u32, N>;
