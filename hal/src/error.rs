//! Common error types for HAL operations

use core::fmt;

use crate::gpio::PinName;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Invalid parameter provided
    InvalidParameter,
    /// Operation not supported by this implementation
    NotSupported,
    /// Pin has no entry in the board's pin/channel binding table
    UnsupportedPin(PinName),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::NotSupported => write!(f, "operation not supported"),
            Self::UnsupportedPin(pin) => write!(f, "pin {} has no interrupt channel", pin),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            HalError::InvalidParameter => defmt::write!(fmt, "InvalidParameter"),
            HalError::NotSupported => defmt::write!(fmt, "NotSupported"),
            HalError::UnsupportedPin(pin) => defmt::write!(fmt, "UnsupportedPin({})", pin),
        }
    }
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
