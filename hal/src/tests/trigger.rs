use crate::exti::TriggerMode;
use crate::gpio::Edge;
use crate::gpio_irq::{EdgeState, DEFAULT_TRIGGER};

const ALL_STATES: [EdgeState; 4] = [
    EdgeState::None,
    EdgeState::Rising,
    EdgeState::Falling,
    EdgeState::Both,
];

#[test]
fn rising_merge_table() {
    assert_eq!(EdgeState::None.merge(Edge::Rising), EdgeState::Rising);
    assert_eq!(EdgeState::Rising.merge(Edge::Rising), EdgeState::Rising);
    assert_eq!(EdgeState::Falling.merge(Edge::Rising), EdgeState::Both);
    assert_eq!(EdgeState::Both.merge(Edge::Rising), EdgeState::Both);
}

#[test]
fn falling_merge_table() {
    assert_eq!(EdgeState::None.merge(Edge::Falling), EdgeState::Falling);
    assert_eq!(EdgeState::Falling.merge(Edge::Falling), EdgeState::Falling);
    assert_eq!(EdgeState::Rising.merge(Edge::Falling), EdgeState::Both);
    assert_eq!(EdgeState::Both.merge(Edge::Falling), EdgeState::Both);
}

#[test]
fn merge_is_order_independent() {
    for state in ALL_STATES {
        let rise_first = state.merge(Edge::Rising).merge(Edge::Falling);
        let fall_first = state.merge(Edge::Falling).merge(Edge::Rising);
        assert_eq!(rise_first, fall_first);
        assert_eq!(rise_first, EdgeState::Both);
    }
}

#[test]
fn merge_is_idempotent() {
    for state in ALL_STATES {
        for edge in [Edge::Rising, Edge::Falling] {
            let once = state.merge(edge);
            assert_eq!(once.merge(edge), once);
        }
    }
}

#[test]
fn trigger_mode_follows_state() {
    assert_eq!(EdgeState::None.trigger_mode(), TriggerMode::None);
    assert_eq!(EdgeState::Rising.trigger_mode(), TriggerMode::Rising);
    assert_eq!(EdgeState::Falling.trigger_mode(), TriggerMode::Falling);
    assert_eq!(EdgeState::Both.trigger_mode(), TriggerMode::Both);
}

#[test]
fn empty_interest_arms_default_trigger() {
    assert_eq!(DEFAULT_TRIGGER, TriggerMode::Falling);
    assert_eq!(EdgeState::None.armed_trigger(), TriggerMode::Falling);
    assert_eq!(EdgeState::Rising.armed_trigger(), TriggerMode::Rising);
    assert_eq!(EdgeState::Both.armed_trigger(), TriggerMode::Both);
}

#[test]
fn trigger_mode_edge_flags() {
    assert!(TriggerMode::Both.rising() && TriggerMode::Both.falling());
    assert!(TriggerMode::Rising.rising() && !TriggerMode::Rising.falling());
    assert!(!TriggerMode::Falling.rising() && TriggerMode::Falling.falling());
    assert!(!TriggerMode::None.rising() && !TriggerMode::None.falling());
}
