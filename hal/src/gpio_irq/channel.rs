//! Fixed-capacity channel registry
//!
//! One slot per hardware interrupt channel. Slots are plain word-sized atomics
//! accessed with loads and stores only, so the table can live in a `static`
//! on targets without compare-and-swap (Cortex-M0) and be read by the
//! dispatcher without locking.
//!
//! Writers follow a fixed order: on acquire the client id is stored last, on
//! release it is cleared first. A non-zero client id therefore always comes
//! with a valid bank address and pin offset.

use core::cell::Cell;
use core::fmt;
use core::sync::atomic::{AtomicU32, AtomicU8, AtomicUsize, Ordering};

use critical_section::Mutex;

use super::binding::PinBinding;
use super::trigger::EdgeState;
use crate::error::{HalError, HalResult};
use crate::gpio::Edge;

/// Client callback, invoked from interrupt context.
pub type IrqHandler = fn(client_id: u32, edge: Edge);

/// Index of one hardware interrupt channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    pub const fn new(index: u8) -> Self {
        ChannelIndex(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChannelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelIndex {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ch{}", self.0);
    }
}

/// Point-in-time copy of a channel slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRecord {
    /// Caller-supplied handle; `0` marks a free slot.
    pub client_id: u32,
    pub bank_address: usize,
    pub pin_offset: u8,
    pub edge_state: EdgeState,
}

impl ChannelRecord {
    pub fn is_occupied(&self) -> bool {
        self.client_id != 0
    }
}

pub(super) struct Slot {
    client_id: AtomicU32,
    bank_address: AtomicUsize,
    pin_offset: AtomicU8,
    edge_state: AtomicU8,
}

impl Slot {
    const fn new() -> Self {
        Self {
            client_id: AtomicU32::new(0),
            bank_address: AtomicUsize::new(0),
            pin_offset: AtomicU8::new(0),
            edge_state: AtomicU8::new(EdgeState::None as u8),
        }
    }

    pub(super) fn client_id(&self) -> u32 {
        self.client_id.load(Ordering::Acquire)
    }

    pub(super) fn bank_address(&self) -> usize {
        self.bank_address.load(Ordering::Relaxed)
    }

    pub(super) fn pin_offset(&self) -> u8 {
        self.pin_offset.load(Ordering::Relaxed)
    }

    fn edge_state(&self) -> EdgeState {
        EdgeState::from_bits(self.edge_state.load(Ordering::Relaxed))
    }

    fn record(&self) -> ChannelRecord {
        ChannelRecord {
            client_id: self.client_id(),
            bank_address: self.bank_address(),
            pin_offset: self.pin_offset(),
            edge_state: self.edge_state(),
        }
    }
}

/// Registry of `N` interrupt channels plus the process-wide dispatch target.
///
/// One instance per microcontroller, normally a `static` owned by the board
/// module and shared by reference between the configuration API and the
/// interrupt entry stubs.
pub struct ChannelTable<const N: usize> {
    slots: [Slot; N],
    handler: Mutex<Cell<Option<IrqHandler>>>,
}

impl<const N: usize> ChannelTable<N> {
    /// Number of channels.
    pub const CAPACITY: usize = N;

    /// Create a table with every channel unoccupied.
    pub const fn new() -> Self {
        const FREE: Slot = Slot::new();
        Self {
            slots: [FREE; N],
            handler: Mutex::new(Cell::new(None)),
        }
    }

    /// Record `client_id` as the owner of `binding`'s channel.
    ///
    /// Capacity is never the limiting factor: every supported pin owns a
    /// pre-assigned channel. Acquiring an occupied channel re-binds it.
    pub fn acquire(
        &self,
        binding: &PinBinding,
        client_id: u32,
        bank_address: usize,
    ) -> HalResult<ChannelIndex> {
        let slot = self
            .slots
            .get(binding.channel.index())
            .ok_or(HalError::InvalidParameter)?;

        slot.client_id.store(0, Ordering::Release);
        slot.bank_address.store(bank_address, Ordering::Relaxed);
        slot.pin_offset.store(binding.pin.index(), Ordering::Relaxed);
        slot.edge_state.store(EdgeState::None as u8, Ordering::Relaxed);
        slot.client_id.store(client_id, Ordering::Release);

        Ok(binding.channel)
    }

    /// Mark `channel` free and forget its edge interest.
    ///
    /// The bank address and pin offset are left in place; the dispatcher
    /// still needs the line number to acknowledge a late interrupt.
    pub fn release(&self, channel: ChannelIndex) {
        if let Some(slot) = self.slot(channel) {
            slot.client_id.store(0, Ordering::Release);
            slot.edge_state.store(EdgeState::None as u8, Ordering::Relaxed);
        }
    }

    pub fn get(&self, channel: ChannelIndex) -> Option<ChannelRecord> {
        self.slot(channel).map(Slot::record)
    }

    pub fn is_occupied(&self, channel: ChannelIndex) -> bool {
        self.slot(channel).is_some_and(|slot| slot.client_id() != 0)
    }

    /// Accumulated edge interest; `None` for out-of-range channels.
    pub fn edge_state(&self, channel: ChannelIndex) -> EdgeState {
        self.slot(channel)
            .map_or(EdgeState::None, |slot| slot.edge_state())
    }

    pub fn set_edge_state(&self, channel: ChannelIndex, state: EdgeState) {
        if let Some(slot) = self.slot(channel) {
            slot.edge_state.store(state as u8, Ordering::Relaxed);
        }
    }

    /// Replace the dispatch target for every channel.
    pub fn set_handler(&self, handler: IrqHandler) {
        critical_section::with(|cs| self.handler.borrow(cs).set(Some(handler)));
    }

    /// Current dispatch target, if one was ever registered.
    pub fn handler(&self) -> Option<IrqHandler> {
        critical_section::with(|cs| self.handler.borrow(cs).get())
    }

    pub(super) fn slot(&self, channel: ChannelIndex) -> Option<&Slot> {
        self.slots.get(channel.index())
    }
}

impl<const N: usize> Default for ChannelTable<N> {
    fn default() -> Self {
        Self::new()
    }
}
