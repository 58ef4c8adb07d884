use hal::gpio::{Level, PinConfig, PinMode, PinName, Port};
use hal::HalError;

use super::FakeRegs;
use crate::stm32f1::GpioBanks;

const CRL: usize = 0;
const CRH: usize = 1;
const IDR: usize = 2;
const BSRR: usize = 4;
const BRR: usize = 5;

struct Fixture {
    apb2enr: FakeRegs<1>,
    a: FakeRegs<7>,
    c: FakeRegs<7>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            apb2enr: FakeRegs::new(),
            a: FakeRegs::new(),
            c: FakeRegs::new(),
        }
    }

    fn banks(&self) -> GpioBanks {
        unsafe {
            GpioBanks::new(
                self.apb2enr.base(),
                [Some(self.a.base()), None, Some(self.c.base()), None, None, None, None],
            )
        }
    }
}

#[test]
fn bank_address_enables_clock() {
    let fx = Fixture::new();

    assert_eq!(fx.banks().bank_address(Port::A), Ok(fx.a.base()));
    fx.banks().bank_address(Port::C).unwrap();

    assert_eq!(fx.apb2enr.word(0), (1 << 2) | (1 << 4));
    assert_eq!(fx.banks().bank_address(Port::F), Err(HalError::NotSupported));
}

#[test]
fn floating_input_in_high_register() {
    let fx = Fixture::new();
    fx.c.set(CRH, 0x3333_3333);

    fx.banks()
        .configure_floating_input(PinName::new(Port::C, 13))
        .unwrap();

    assert_eq!(fx.c.word(CRH), 0x3343_3333);
    assert_eq!(fx.c.word(CRL), 0);
}

#[test]
fn pulled_inputs_drive_odr_through_set_and_reset() {
    let fx = Fixture::new();
    let banks = fx.banks();

    banks.set_mode(PinName::new(Port::A, 0), PinMode::InputPullUp).unwrap();
    assert_eq!(fx.a.word(CRL) & 0xF, 0b1000);
    assert_eq!(fx.a.word(BSRR), 1 << 0);

    banks.set_mode(PinName::new(Port::A, 1), PinMode::InputPullDown).unwrap();
    assert_eq!((fx.a.word(CRL) >> 4) & 0xF, 0b1000);
    assert_eq!(fx.a.word(BRR), 1 << 1);
}

#[test]
fn outputs_and_alternate_use_fast_mode() {
    let fx = Fixture::new();
    let banks = fx.banks();

    banks.set_mode(PinName::new(Port::A, 2), PinMode::Output).unwrap();
    banks.set_mode(PinName::new(Port::A, 3), PinMode::OutputOpenDrain).unwrap();
    banks.set_mode(PinName::new(Port::A, 9), PinMode::Alternate(7)).unwrap();

    assert_eq!(fx.a.word(CRL), 0x0000_7300);
    assert_eq!(fx.a.word(CRH), 0x0000_00B0);
}

#[test]
fn levels_use_idr_bsrr_and_brr() {
    let fx = Fixture::new();
    let banks = fx.banks();
    fx.a.set(IDR, 1);

    assert_eq!(banks.read_input_level(fx.a.base(), 0), Level::High);
    assert_eq!(banks.read_input_level(fx.a.base(), 3), Level::Low);

    banks.write_output_level(fx.c.base(), 8, Level::High);
    banks.write_output_level(fx.c.base(), 9, Level::Low);
    assert_eq!(fx.c.word(BSRR), 1 << 8);
    assert_eq!(fx.c.word(BRR), 1 << 9);
}
