//! Host-side stand-ins for the pin, line and vector controllers.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use hal::exti::{ExternalInterrupts, TriggerMode, LINE_COUNT};
use hal::gpio::{Edge, Level, PinConfig, PinMode, PinName, Port};
use hal::interrupt::{InterruptController, InterruptHandler, InterruptPriority, IrqNumber};
use hal::{HalError, HalResult, PinBinding, PinMap};

pub const PIN_A: PinName = PinName::new(Port::C, 13);
pub const PIN_B: PinName = PinName::new(Port::A, 0);
pub const PIN_C: PinName = PinName::new(Port::B, 3);
pub const UNSUPPORTED: PinName = PinName::new(Port::A, 5);

pub const IRQ_A: IrqNumber = IrqNumber::new(7);
pub const IRQ_B: IrqNumber = IrqNumber::new(5);
pub const IRQ_C: IrqNumber = IrqNumber::new(6);

pub extern "C" fn entry_a() {}
pub extern "C" fn entry_b() {}
pub extern "C" fn entry_c() {}

pub static MAP: PinMap<3> = PinMap::new([
    PinBinding::new(PIN_A, 0, 7, entry_a),
    PinBinding::new(PIN_B, 1, 5, entry_b),
    PinBinding::new(PIN_C, 2, 6, entry_c),
]);

pub const LOWEST_PRIORITY: InterruptPriority = 0xC0;

/// Base address the mock reports for `port`.
pub fn bank_of(port: Port) -> usize {
    0x4800_0000 + 0x400 * port.index() as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    pub trigger: TriggerMode,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvicOp {
    Enable(IrqNumber),
    Disable(IrqNumber),
}

#[derive(Default)]
pub struct MockHardware {
    pub clocked: RefCell<Vec<Port>>,
    pub modes: RefCell<BTreeMap<u8, PinMode>>,
    pub levels: RefCell<BTreeMap<(usize, u8), Level>>,
    pub missing_port: Cell<Option<Port>>,

    pub routes: RefCell<BTreeMap<u8, Port>>,
    pub lines: RefCell<BTreeMap<u8, LineConfig>>,
    pub pending: Cell<u16>,
    pub acks: RefCell<Vec<u8>>,

    pub enabled: RefCell<BTreeMap<IrqNumber, bool>>,
    pub priorities: RefCell<BTreeMap<IrqNumber, InterruptPriority>>,
    pub vectors: RefCell<BTreeMap<IrqNumber, usize>>,
    pub nvic_ops: RefCell<Vec<NvicOp>>,
}

impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive the sampled input level of `pin`.
    pub fn set_level(&self, pin: PinName, level: Level) {
        let port = pin.port().unwrap();
        self.levels
            .borrow_mut()
            .insert((bank_of(port), pin.index()), level);
    }

    /// Latch an edge on `line` as the hardware would.
    pub fn latch(&self, line: u8) {
        self.pending.set(self.pending.get() | (1 << line));
    }

    pub fn line_pending(&self, line: u8) -> bool {
        self.pending.get() & (1 << line) != 0
    }

    pub fn line(&self, line: u8) -> Option<LineConfig> {
        self.lines.borrow().get(&line).copied()
    }

    pub fn vector_enabled(&self, irq: IrqNumber) -> bool {
        self.enabled.borrow().get(&irq).copied().unwrap_or(false)
    }

    pub fn take_nvic_ops(&self) -> Vec<NvicOp> {
        self.nvic_ops.borrow_mut().drain(..).collect()
    }

    /// True if nothing was ever programmed.
    pub fn untouched(&self) -> bool {
        self.clocked.borrow().is_empty()
            && self.modes.borrow().is_empty()
            && self.routes.borrow().is_empty()
            && self.lines.borrow().is_empty()
            && self.priorities.borrow().is_empty()
            && self.vectors.borrow().is_empty()
            && self.nvic_ops.borrow().is_empty()
    }
}

impl PinConfig for MockHardware {
    fn bank_address(&self, port: Port) -> HalResult<usize> {
        if self.missing_port.get() == Some(port) {
            return Err(HalError::NotSupported);
        }
        self.clocked.borrow_mut().push(port);
        Ok(bank_of(port))
    }

    fn set_mode(&self, pin: PinName, mode: PinMode) -> HalResult<()> {
        self.modes.borrow_mut().insert(pin.raw(), mode);
        Ok(())
    }

    fn read_input_level(&self, bank_address: usize, offset: u8) -> Level {
        self.levels
            .borrow()
            .get(&(bank_address, offset))
            .copied()
            .unwrap_or(Level::Low)
    }

    fn write_output_level(&self, bank_address: usize, offset: u8, level: Level) {
        self.levels
            .borrow_mut()
            .insert((bank_address, offset), level);
    }
}

impl ExternalInterrupts for MockHardware {
    fn route(&self, port: Port, line: u8) -> HalResult<()> {
        if line >= LINE_COUNT {
            return Err(HalError::InvalidParameter);
        }
        self.routes.borrow_mut().insert(line, port);
        Ok(())
    }

    fn configure_line(&self, line: u8, trigger: TriggerMode, enabled: bool) {
        self.lines
            .borrow_mut()
            .insert(line, LineConfig { trigger, enabled });
    }

    fn is_pending(&self, line: u8) -> bool {
        self.pending.get() & (1 << line) != 0
    }

    fn clear_pending(&self, line: u8) {
        self.pending.set(self.pending.get() & !(1 << line));
        self.acks.borrow_mut().push(line);
    }
}

impl InterruptController for MockHardware {
    fn enable_interrupt(&self, irq: IrqNumber) {
        self.enabled.borrow_mut().insert(irq, true);
        self.nvic_ops.borrow_mut().push(NvicOp::Enable(irq));
    }

    fn disable_interrupt(&self, irq: IrqNumber) {
        self.enabled.borrow_mut().insert(irq, false);
        self.nvic_ops.borrow_mut().push(NvicOp::Disable(irq));
    }

    fn is_enabled(&self, irq: IrqNumber) -> bool {
        self.vector_enabled(irq)
    }

    fn set_priority(&self, irq: IrqNumber, priority: InterruptPriority) -> HalResult<()> {
        self.priorities.borrow_mut().insert(irq, priority);
        Ok(())
    }

    fn lowest_priority(&self) -> InterruptPriority {
        LOWEST_PRIORITY
    }

    fn is_pending(&self, _irq: IrqNumber) -> bool {
        false
    }

    fn clear_pending(&self, _irq: IrqNumber) {}

    fn set_vector(&self, irq: IrqNumber, handler: InterruptHandler) -> HalResult<()> {
        self.vectors.borrow_mut().insert(irq, handler as usize);
        Ok(())
    }
}

thread_local! {
    static EVENTS: RefCell<Vec<(u32, Edge)>> = const { RefCell::new(Vec::new()) };
    static OTHER_EVENTS: RefCell<Vec<(u32, Edge)>> = const { RefCell::new(Vec::new()) };
}

/// Callback recording into this test thread's event log.
pub fn record(client_id: u32, edge: Edge) {
    EVENTS.with(|events| events.borrow_mut().push((client_id, edge)));
}

/// Second callback with its own log, to observe handler replacement.
pub fn record_other(client_id: u32, edge: Edge) {
    OTHER_EVENTS.with(|events| events.borrow_mut().push((client_id, edge)));
}

pub fn take_events() -> Vec<(u32, Edge)> {
    EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}

pub fn take_other_events() -> Vec<(u32, Edge)> {
    OTHER_EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}
