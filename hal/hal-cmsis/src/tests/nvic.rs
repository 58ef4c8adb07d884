use hal::interrupt::{InterruptController, IrqNumber};
use hal::HalError;

use super::{FakeBlock, FakeRegs};
use crate::nvic::{Nvic, NVIC_WORDS};

const ISER: usize = 0;
const ICER: usize = 32;
const ISPR: usize = 64;
const ICPR: usize = 96;
const IPR: usize = 192;

struct Fixture {
    regs: FakeRegs<NVIC_WORDS>,
    vectors: FakeBlock<usize, 64>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            regs: FakeRegs::new(),
            vectors: FakeBlock::new(),
        }
    }

    fn nvic(&self, priority_bits: u8) -> Nvic {
        unsafe { Nvic::new(self.regs.base(), self.vectors.base(), priority_bits, 43) }
    }
}

extern "C" fn entry() {}

#[test]
fn register_block_spans_priority_array() {
    assert_eq!(NVIC_WORDS, IPR + 60);
}

#[test]
fn enable_and_disable_write_their_own_banks() {
    let fx = Fixture::new();
    let nvic = fx.nvic(4);

    nvic.enable_interrupt(IrqNumber::new(40));
    assert_eq!(fx.regs.word(ISER + 1), 1 << 8);
    assert!(nvic.is_enabled(IrqNumber::new(40)));
    assert!(!nvic.is_enabled(IrqNumber::new(6)));

    nvic.disable_interrupt(IrqNumber::new(6));
    assert_eq!(fx.regs.word(ICER), 1 << 6);
}

#[test]
fn priority_is_a_word_read_modify_write() {
    let fx = Fixture::new();
    fx.regs.set(IPR + 1, 0x0011_2233);

    fx.nvic(2).set_priority(IrqNumber::new(7), 0xC0).unwrap();

    assert_eq!(fx.regs.word(IPR + 1), 0xC011_2233);
}

#[test]
fn priority_is_truncated_to_implemented_bits() {
    let fx = Fixture::new();

    fx.nvic(2).set_priority(IrqNumber::new(5), 0xFF).unwrap();

    assert_eq!(fx.regs.word(IPR + 1), 0x0000_C000);
}

#[test]
fn lowest_priority_follows_priority_bits() {
    let fx = Fixture::new();

    assert_eq!(fx.nvic(2).lowest_priority(), 0xC0);
    assert_eq!(fx.nvic(4).lowest_priority(), 0xF0);
    assert_eq!(fx.nvic(8).lowest_priority(), 0xFF);
}

#[test]
fn vector_lands_after_core_exceptions() {
    let fx = Fixture::new();

    fx.nvic(4).set_vector(IrqNumber::new(40), entry).unwrap();

    assert_eq!(fx.vectors.word(56), entry as usize);
    assert_eq!(fx.vectors.word(40), 0);
}

#[test]
fn out_of_range_irq_is_rejected() {
    let fx = Fixture::new();
    let nvic = fx.nvic(4);
    let irq = IrqNumber::new(43);

    assert_eq!(nvic.set_priority(irq, 0xF0), Err(HalError::InvalidParameter));
    assert_eq!(nvic.set_vector(irq, entry), Err(HalError::InvalidParameter));

    nvic.enable_interrupt(irq);
    assert_eq!(fx.regs.word(ISER + 1), 0);
    assert!(!nvic.is_enabled(irq));
}

#[test]
fn pending_reads_ispr_and_clears_through_icpr() {
    let fx = Fixture::new();
    let nvic = fx.nvic(2);
    fx.regs.set(ISPR, 1 << 7);

    assert!(nvic.is_pending(IrqNumber::new(7)));
    assert!(!nvic.is_pending(IrqNumber::new(5)));

    nvic.clear_pending(IrqNumber::new(7));
    assert_eq!(fx.regs.word(ICPR), 1 << 7);
}
