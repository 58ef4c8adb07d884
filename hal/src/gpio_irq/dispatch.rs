//! Interrupt-context dispatch
//!
//! Runs inside the per-channel entry stubs: no allocation, no logging, no
//! loops.

use super::binding::PinMap;
use super::channel::{ChannelIndex, ChannelTable};
use crate::exti::ExternalInterrupts;
use crate::gpio::{Edge, Level, PinConfig};

/// Service one firing of `channel`.
///
/// The line is taken from the channel's fixed binding in `map`, never from
/// the table, so a channel that was never acquired acknowledges its own line.
/// The pending flag is cleared first and unconditionally, so a late
/// interrupt for a released channel cannot re-fire. A free channel drops the
/// event. Otherwise the edge is inferred from the pin level sampled now:
/// low reads as [`Edge::Falling`], high as [`Edge::Rising`]. Two edges closer
/// together than the dispatch latency are reported as whichever matches the
/// level at this point.
pub fn on_channel_fire<P, E, const N: usize>(
    table: &ChannelTable<N>,
    map: &PinMap<N>,
    pins: &P,
    exti: &E,
    channel: ChannelIndex,
) where
    P: PinConfig + ?Sized,
    E: ExternalInterrupts + ?Sized,
{
    let (Some(binding), Some(slot)) = (map.binding(channel), table.slot(channel)) else {
        return;
    };

    let line = binding.line();
    exti.clear_pending(line);

    let client_id = slot.client_id();
    if client_id == 0 {
        return;
    }

    let edge = match pins.read_input_level(slot.bank_address(), line) {
        Level::Low => Edge::Falling,
        Level::High => Edge::Rising,
    };

    if let Some(handler) = table.handler() {
        handler(client_id, edge);
    }
}
