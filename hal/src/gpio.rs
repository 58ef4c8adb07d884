//! GPIO (General Purpose Input/Output) abstraction

use core::fmt;

use crate::error::{HalError, HalResult};

/// Number of pins in one GPIO bank.
pub const PINS_PER_PORT: u8 = 16;

/// GPIO bank identifier
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
}

impl Port {
    /// Number of bank identifiers known to the HAL.
    pub const COUNT: usize = 7;

    /// Bank for a zero-based index (`0` is port A).
    pub const fn from_index(index: u8) -> Option<Port> {
        match index {
            0 => Some(Port::A),
            1 => Some(Port::B),
            2 => Some(Port::C),
            3 => Some(Port::D),
            4 => Some(Port::E),
            5 => Some(Port::F),
            6 => Some(Port::G),
            _ => None,
        }
    }

    /// Zero-based index of this bank.
    pub const fn index(self) -> u8 {
        self as u8
    }

    fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

/// Physical pin identity, encoded as `(port << 4) | pin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinName(u8);

impl PinName {
    /// Not connected.
    pub const NC: PinName = PinName(0xFF);

    /// Pin `index` of bank `port`.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) if `index` is 16 or
    /// more.
    pub const fn new(port: Port, index: u8) -> Self {
        assert!(index < PINS_PER_PORT, "pin index out of range");
        PinName((port.index() << 4) | index)
    }

    /// Raw encoded value.
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Bank of this pin, or `None` for [`PinName::NC`].
    pub const fn port(self) -> Option<Port> {
        if self.is_connected() {
            Port::from_index(self.0 >> 4)
        } else {
            None
        }
    }

    /// Bit position of the pin within its bank.
    pub const fn index(self) -> u8 {
        self.0 & 0x0F
    }

    /// Single-bit mask of the pin within its bank.
    pub const fn mask(self) -> u16 {
        1 << self.index()
    }

    pub const fn is_connected(self) -> bool {
        self.0 != Self::NC.0
    }
}

impl fmt::Display for PinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port() {
            Some(port) => write!(f, "P{}{}", port.letter(), self.index()),
            None => write!(f, "NC"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinName {
    fn format(&self, fmt: defmt::Formatter) {
        match self.port() {
            Some(port) => defmt::write!(fmt, "P{}{}", port.letter(), self.index()),
            None => defmt::write!(fmt, "NC"),
        }
    }
}

/// GPIO pin modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// Input (floating)
    Input,
    /// Input with pull-up resistor
    InputPullUp,
    /// Input with pull-down resistor
    InputPullDown,
    /// Output (push-pull)
    Output,
    /// Output (open-drain)
    OutputOpenDrain,
    /// Alternate function (vendor-specific)
    Alternate(u8),
}

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Signal edge, as requested by a client or reported to its callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Low-to-high transition
    Rising,
    /// High-to-low transition
    Falling,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Edge {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Edge::Rising => defmt::write!(fmt, "Rising"),
            Edge::Falling => defmt::write!(fmt, "Falling"),
        }
    }
}

/// Bank-level pin configuration, the collaborator consumed by the interrupt
/// layer and by [`Pin`].
///
/// Methods take `&self`: implementations are thin wrappers over memory-mapped
/// registers. `read_input_level` is called from interrupt context and must not
/// block.
pub trait PinConfig {
    /// Enable the bank's peripheral clock and return its register base.
    fn bank_address(&self, port: Port) -> HalResult<usize>;

    /// Configure pin mode
    fn set_mode(&self, pin: PinName, mode: PinMode) -> HalResult<()>;

    /// Configure the pin as a floating input.
    fn configure_floating_input(&self, pin: PinName) -> HalResult<()> {
        self.set_mode(pin, PinMode::Input)
    }

    /// Configure the pin as a push-pull output.
    fn configure_output(&self, pin: PinName) -> HalResult<()> {
        self.set_mode(pin, PinMode::Output)
    }

    /// Live input level of pin `offset` in the bank at `bank_address`.
    fn read_input_level(&self, bank_address: usize, offset: u8) -> Level;

    /// Drive pin `offset` in the bank at `bank_address`.
    fn write_output_level(&self, bank_address: usize, offset: u8, level: Level);
}

impl<T: PinConfig + ?Sized> PinConfig for &T {
    fn bank_address(&self, port: Port) -> HalResult<usize> {
        (**self).bank_address(port)
    }

    fn set_mode(&self, pin: PinName, mode: PinMode) -> HalResult<()> {
        (**self).set_mode(pin, mode)
    }

    fn configure_floating_input(&self, pin: PinName) -> HalResult<()> {
        (**self).configure_floating_input(pin)
    }

    fn configure_output(&self, pin: PinName) -> HalResult<()> {
        (**self).configure_output(pin)
    }

    fn read_input_level(&self, bank_address: usize, offset: u8) -> Level {
        (**self).read_input_level(bank_address, offset)
    }

    fn write_output_level(&self, bank_address: usize, offset: u8, level: Level) {
        (**self).write_output_level(bank_address, offset, level)
    }
}

/// Bank of a connected pin.
pub fn port_of(pin: PinName) -> HalResult<Port> {
    pin.port().ok_or(HalError::InvalidParameter)
}

/// GPIO pin trait (object-safe)
pub trait GpioPin {
    /// Configure pin mode
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()>;

    /// Read current level
    fn read(&self) -> HalResult<Level>;

    /// Write level (for output pins)
    fn write(&mut self, level: Level) -> HalResult<()>;

    /// Toggle output
    fn toggle(&mut self) -> HalResult<()> {
        let current = self.read()?;
        let new_level = match current {
            Level::Low => Level::High,
            Level::High => Level::Low,
        };
        self.write(new_level)
    }

    /// Physical pin identity
    fn pin_name(&self) -> PinName;
}

/// A single configured pin.
///
/// Resolves the bank once at construction (enabling its clock) and keeps the
/// base address, so reads and writes are a single register access.
pub struct Pin<'a, C: PinConfig + ?Sized> {
    config: &'a C,
    name: PinName,
    bank_address: usize,
    mode: PinMode,
}

impl<'a, C: PinConfig + ?Sized> Pin<'a, C> {
    /// Claim `name` and configure it in `mode`.
    ///
    /// Fails with [`HalError::InvalidParameter`] for [`PinName::NC`].
    pub fn new(config: &'a C, name: PinName, mode: PinMode) -> HalResult<Self> {
        let bank_address = config.bank_address(port_of(name)?)?;
        config.set_mode(name, mode)?;
        Ok(Self {
            config,
            name,
            bank_address,
            mode,
        })
    }

    /// Floating input, the configuration used for interrupt sources.
    pub fn input(config: &'a C, name: PinName) -> HalResult<Self> {
        let bank_address = config.bank_address(port_of(name)?)?;
        config.configure_floating_input(name)?;
        Ok(Self {
            config,
            name,
            bank_address,
            mode: PinMode::Input,
        })
    }

    /// Push-pull output.
    pub fn output(config: &'a C, name: PinName) -> HalResult<Self> {
        let bank_address = config.bank_address(port_of(name)?)?;
        config.configure_output(name)?;
        Ok(Self {
            config,
            name,
            bank_address,
            mode: PinMode::Output,
        })
    }

    /// Single-bit mask of the pin within its bank.
    pub fn mask(&self) -> u16 {
        self.name.mask()
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    pub fn bank_address(&self) -> usize {
        self.bank_address
    }
}

impl<C: PinConfig + ?Sized> GpioPin for Pin<'_, C> {
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()> {
        self.config.set_mode(self.name, mode)?;
        self.mode = mode;
        Ok(())
    }

    fn read(&self) -> HalResult<Level> {
        Ok(self
            .config
            .read_input_level(self.bank_address, self.name.index()))
    }

    fn write(&mut self, level: Level) -> HalResult<()> {
        self.config
            .write_output_level(self.bank_address, self.name.index(), level);
        Ok(())
    }

    fn pin_name(&self) -> PinName {
        self.name
    }
}
