//! Static pin-to-channel wiring

use super::channel::ChannelIndex;
use crate::error::{HalError, HalResult};
use crate::exti::LINE_COUNT;
use crate::gpio::PinName;
use crate::interrupt::{InterruptHandler, IrqNumber};

/// One supported pin: its channel, the vector that fires for it, and the
/// entry stub to install in that vector.
#[derive(Debug, Clone, Copy)]
pub struct PinBinding {
    pub pin: PinName,
    pub channel: ChannelIndex,
    pub irq: IrqNumber,
    pub handler: InterruptHandler,
}

impl PinBinding {
    pub const fn new(pin: PinName, channel: u8, irq: u16, handler: InterruptHandler) -> Self {
        Self {
            pin,
            channel: ChannelIndex::new(channel),
            irq: IrqNumber::new(irq),
            handler,
        }
    }

    /// External interrupt line serving this pin.
    pub const fn line(&self) -> u8 {
        self.pin.index()
    }
}

/// Board wiring: exactly one binding per channel and per vector.
pub struct PinMap<const N: usize> {
    bindings: [PinBinding; N],
}

impl<const N: usize> PinMap<N> {
    /// Build a map, checking the wiring.
    ///
    /// # Panics
    ///
    /// Panics if a binding uses a channel outside `0..N`, an unconnected pin,
    /// or shares its channel, pin, line or vector with another binding. Each
    /// vector holds exactly one entry stub, so a shared vector would route one
    /// channel's events through another's stub. Used in a
    /// `const` or `static` initializer this is a build error.
    pub const fn new(bindings: [PinBinding; N]) -> Self {
        let mut i = 0;
        while i < N {
            let a = &bindings[i];
            assert!(a.channel.index() < N, "channel index out of range");
            assert!(a.pin.is_connected(), "binding for an unconnected pin");
            assert!(a.line() < LINE_COUNT, "line out of range");

            let mut j = i + 1;
            while j < N {
                let b = &bindings[j];
                assert!(a.channel.index() != b.channel.index(), "channel bound twice");
                assert!(a.pin.raw() != b.pin.raw(), "pin bound twice");
                assert!(a.line() != b.line(), "line bound twice");
                assert!(a.irq.raw() != b.irq.raw(), "vector bound twice");
                j += 1;
            }
            i += 1;
        }
        Self { bindings }
    }

    /// Look up `pin`. Pure; no hardware is touched.
    pub fn resolve(&self, pin: PinName) -> HalResult<&PinBinding> {
        self.bindings
            .iter()
            .find(|binding| binding.pin == pin)
            .ok_or(HalError::UnsupportedPin(pin))
    }

    /// Binding that owns `channel`.
    pub fn binding(&self, channel: ChannelIndex) -> Option<&PinBinding> {
        self.bindings
            .iter()
            .find(|binding| binding.channel == channel)
    }

    pub fn bindings(&self) -> &[PinBinding] {
        &self.bindings
    }
}
