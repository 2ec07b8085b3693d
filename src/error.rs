use core::fmt;

/// Errors raised when converting raw values into typed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// GPIO pin index is not in 0..=15
    InvalidPin(u8),
    /// EXTI line is not in 0..=22
    InvalidLine(u8),
    /// Raw value does not name a member of the configuration enum
    InvalidFieldValue(u32),
    /// SysTick reload is not in 1..=0xFF_FFFF
    ReloadOutOfRange(u32),
    /// Timer prescaler does not fit in 16 bits
    PrescalerOutOfRange(u32),
    /// Auto-reload does not fit the timer's counter width
    AutoReloadOutOfRange(u32),
    /// NVIC priority level is not in 0..=15
    InvalidPriority(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPin(pin) => write!(f, "invalid pin index {pin}"),
            Error::InvalidLine(line) => write!(f, "invalid EXTI line {line}"),
            Error::InvalidFieldValue(value) => write!(f, "invalid field value {value:#x}"),
            Error::ReloadOutOfRange(reload) => write!(f, "SysTick reload {reload:#x} out of range"),
            Error::PrescalerOutOfRange(psc) => write!(f, "prescaler {psc} out of range"),
            Error::AutoReloadOutOfRange(arr) => write!(f, "auto-reload {arr:#x} out of range"),
            Error::InvalidPriority(level) => write!(f, "invalid interrupt priority {level}"),
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
