//! Edge-triggered GPIO interrupts over a fixed set of channels
//!
//! A board wires a handful of pins to dedicated interrupt vectors (see
//! [`PinMap`]). [`GpioIrq`] hands those channels out to clients, merges the
//! edges each client asks for, and routes every hardware event through a
//! single [`IrqHandler`] tagged with the client's id.
//!
//! ## Lifecycle of a channel
//! - [`GpioIrq::init`]: channel recorded with no edge interest, line armed
//!   for falling edges ([`DEFAULT_TRIGGER`]), vector enabled.
//! - [`GpioIrq::set_edge`]: interest grows (`Rising` + `Falling` = `Both`),
//!   line reprogrammed and masked or unmasked.
//! - [`GpioIrq::enable`]: vector and line re-armed, interest untouched.
//! - [`GpioIrq::disable`]: vector masked, interest reset to `None`.
//! - [`GpioIrq::release`]: channel freed, line masked.
//!
//! Configuration calls mask the channel's vector with a [`LineMask`] while
//! they touch the [`ChannelTable`], so the dispatcher never observes a half
//! written slot.

mod binding;
mod channel;
mod dispatch;
mod mask;
mod trigger;

pub use binding::{PinBinding, PinMap};
pub use channel::{ChannelIndex, ChannelRecord, ChannelTable, IrqHandler};
pub use dispatch::on_channel_fire;
pub use mask::LineMask;
pub use trigger::{EdgeState, DEFAULT_TRIGGER};

use log::{debug, warn};

use crate::error::HalResult;
use crate::exti::{ExternalInterrupts, TriggerMode};
use crate::gpio::{port_of, Edge, PinConfig, PinName};
use crate::interrupt::{InterruptController, IrqNumber};

/// Registration returned by [`GpioIrq::init`].
///
/// Carries everything later calls need, so the pin is never resolved twice.
#[derive(Debug, PartialEq, Eq)]
pub struct GpioIrqHandle {
    pin: PinName,
    client_id: u32,
    channel: ChannelIndex,
    irq: IrqNumber,
    line: u8,
}

impl GpioIrqHandle {
    pub fn pin(&self) -> PinName {
        self.pin
    }

    pub fn client_id(&self) -> u32 {
        self.client_id
    }

    pub fn channel(&self) -> ChannelIndex {
        self.channel
    }

    pub fn irq(&self) -> IrqNumber {
        self.irq
    }

    pub fn line(&self) -> u8 {
        self.line
    }
}

/// GPIO interrupt front end for one microcontroller.
///
/// Borrows the board's channel table and wiring; owns (or borrows, every
/// collaborator trait is implemented for `&T`) the pin, line and vector
/// controllers. Configuration calls are expected from a single thread-mode
/// context; [`GpioIrq::dispatch`] is the interrupt-context entry.
pub struct GpioIrq<'a, P, E, N, const CHANNELS: usize> {
    table: &'a ChannelTable<CHANNELS>,
    map: &'a PinMap<CHANNELS>,
    pins: P,
    exti: E,
    nvic: N,
}

impl<'a, P, E, N, const CHANNELS: usize> GpioIrq<'a, P, E, N, CHANNELS>
where
    P: PinConfig,
    E: ExternalInterrupts,
    N: InterruptController,
{
    pub fn new(
        table: &'a ChannelTable<CHANNELS>,
        map: &'a PinMap<CHANNELS>,
        pins: P,
        exti: E,
        nvic: N,
    ) -> Self {
        Self {
            table,
            map,
            pins,
            exti,
            nvic,
        }
    }

    /// Bind `pin` to its channel and start delivering its edges to `handler`.
    ///
    /// `handler` becomes the dispatch target of every channel, replacing any
    /// earlier one. The line is armed for falling edges until the first
    /// [`GpioIrq::set_edge`]. Fails with
    /// [`HalError::UnsupportedPin`](crate::HalError::UnsupportedPin), leaving
    /// table and hardware untouched, if the board has no channel for `pin`.
    pub fn init(
        &self,
        pin: PinName,
        handler: IrqHandler,
        client_id: u32,
    ) -> HalResult<GpioIrqHandle> {
        let binding = self.map.resolve(pin).map_err(|err| {
            warn!("gpio irq: {} has no interrupt channel", pin);
            err
        })?;
        if client_id == 0 {
            warn!("gpio irq: {} bound with client id 0, its events will be dropped", pin);
        }

        let port = port_of(pin)?;
        let line = binding.line();
        self.pins.configure_floating_input(pin)?;
        let bank_address = self.pins.bank_address(port)?;
        self.exti.route(port, line)?;
        self.nvic
            .set_priority(binding.irq, self.nvic.lowest_priority())?;
        self.nvic.set_vector(binding.irq, binding.handler)?;

        {
            let _mask = LineMask::new(&self.nvic, binding.irq);
            self.table.acquire(binding, client_id, bank_address)?;
            self.table.set_handler(handler);
            self.exti.configure_line(line, DEFAULT_TRIGGER, true);
        }
        self.nvic.enable_interrupt(binding.irq);

        debug!(
            "gpio irq: {} bound to {} ({}, line {}) for client {}",
            pin, binding.channel, binding.irq, line, client_id
        );

        Ok(GpioIrqHandle {
            pin,
            client_id,
            channel: binding.channel,
            irq: binding.irq,
            line,
        })
    }

    /// Free the handle's channel and mask its line.
    ///
    /// A no-op if the channel has meanwhile been re-bound to another client.
    pub fn release(&self, handle: GpioIrqHandle) {
        if !self.owns(&handle) {
            debug!("gpio irq: release of stale handle for {}", handle.pin);
            return;
        }

        let _mask = LineMask::new(&self.nvic, handle.irq);
        self.table.release(handle.channel);
        self.exti.configure_line(handle.line, TriggerMode::None, false);

        debug!("gpio irq: {} released {}", handle.pin, handle.channel);
    }

    /// Add `edge` to the channel's interest and mask or unmask its line.
    pub fn set_edge(&self, handle: &GpioIrqHandle, edge: Edge, enable: bool) {
        if !self.owns(handle) {
            debug!("gpio irq: set_edge on stale handle for {}", handle.pin);
            return;
        }

        let _mask = LineMask::new(&self.nvic, handle.irq);
        let state = trigger::configure(
            self.table,
            &self.exti,
            handle.channel,
            handle.line,
            edge,
            enable,
        );

        debug!(
            "gpio irq: {} interest {:?}, line {}",
            handle.pin,
            state,
            if enable { "armed" } else { "masked" }
        );
    }

    /// Re-arm the channel with its recorded interest.
    ///
    /// A channel with no interest (fresh, or after [`GpioIrq::disable`]) is
    /// re-armed with [`DEFAULT_TRIGGER`].
    pub fn enable(&self, handle: &GpioIrqHandle) {
        if !self.owns(handle) {
            debug!("gpio irq: enable on stale handle for {}", handle.pin);
            return;
        }

        {
            let _mask = LineMask::new(&self.nvic, handle.irq);
            let state = self.table.edge_state(handle.channel);
            self.exti
                .configure_line(handle.line, state.armed_trigger(), true);
        }
        self.nvic.enable_interrupt(handle.irq);
    }

    /// Mask the channel's vector and drop its edge interest.
    pub fn disable(&self, handle: &GpioIrqHandle) {
        if !self.owns(handle) {
            debug!("gpio irq: disable on stale handle for {}", handle.pin);
            return;
        }

        let mask = LineMask::new(&self.nvic, handle.irq);
        self.table.set_edge_state(handle.channel, EdgeState::None);
        mask.keep_masked();
    }

    /// Interrupt-context entry for `channel`; see [`on_channel_fire`].
    pub fn dispatch(&self, channel: ChannelIndex) {
        on_channel_fire(self.table, self.map, &self.pins, &self.exti, channel);
    }

    fn owns(&self, handle: &GpioIrqHandle) -> bool {
        let owner = self
            .table
            .get(handle.channel)
            .map_or(0, |record| record.client_id);
        owner != 0 && owner == handle.client_id
    }
}
