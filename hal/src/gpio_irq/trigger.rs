//! Edge-interest bookkeeping and trigger programming

use super::channel::{ChannelIndex, ChannelTable};
use crate::exti::{ExternalInterrupts, TriggerMode};
use crate::gpio::Edge;

/// Trigger armed by `init` and by `enable` on a channel with no recorded
/// edge interest.
///
/// It does not follow from the channel's edge state: a freshly initialized
/// channel reports [`EdgeState::None`] yet fires on falling edges until the
/// first `set_edge`.
pub const DEFAULT_TRIGGER: TriggerMode = TriggerMode::Falling;

/// Accumulated edge interest of a channel
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    None = 0,
    Rising = 1,
    Falling = 2,
    Both = 3,
}

impl EdgeState {
    pub(super) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => EdgeState::None,
            1 => EdgeState::Rising,
            2 => EdgeState::Falling,
            _ => EdgeState::Both,
        }
    }

    /// Add `edge` to the interest set.
    ///
    /// Interest only grows: asking for one edge never drops the other.
    pub const fn merge(self, edge: Edge) -> EdgeState {
        match (edge, self) {
            (Edge::Rising, EdgeState::None | EdgeState::Rising) => EdgeState::Rising,
            (Edge::Rising, EdgeState::Falling | EdgeState::Both) => EdgeState::Both,
            (Edge::Falling, EdgeState::None | EdgeState::Falling) => EdgeState::Falling,
            (Edge::Falling, EdgeState::Rising | EdgeState::Both) => EdgeState::Both,
        }
    }

    /// Hardware trigger selection matching this interest set.
    pub const fn trigger_mode(self) -> TriggerMode {
        match self {
            EdgeState::None => TriggerMode::None,
            EdgeState::Rising => TriggerMode::Rising,
            EdgeState::Falling => TriggerMode::Falling,
            EdgeState::Both => TriggerMode::Both,
        }
    }

    /// Trigger to arm when the line is (re-)enabled.
    pub const fn armed_trigger(self) -> TriggerMode {
        match self {
            EdgeState::None => DEFAULT_TRIGGER,
            other => other.trigger_mode(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EdgeState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            EdgeState::None => defmt::write!(fmt, "None"),
            EdgeState::Rising => defmt::write!(fmt, "Rising"),
            EdgeState::Falling => defmt::write!(fmt, "Falling"),
            EdgeState::Both => defmt::write!(fmt, "Both"),
        }
    }
}

/// Merge `edge` into `channel`'s interest and reprogram `line` to match.
///
/// `enable` sets the line's interrupt mask independently of the trigger
/// selection; the merged state is kept either way. Callers hold the
/// channel's line mask across this call.
pub(super) fn configure<E, const N: usize>(
    table: &ChannelTable<N>,
    exti: &E,
    channel: ChannelIndex,
    line: u8,
    edge: Edge,
    enable: bool,
) -> EdgeState
where
    E: ExternalInterrupts + ?Sized,
{
    let merged = table.edge_state(channel).merge(edge);
    table.set_edge_state(channel, merged);
    exti.configure_line(line, merged.trigger_mode(), enable);
    merged
}
