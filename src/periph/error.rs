use crate::periph::{Function, Peripheral, Register};

/// The argument that failed validation, with the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    /// GPIO pin outside `0..=53`.
    Pin(u8),
    /// Function identifier outside `0..=80`.
    Function(u8),
    /// Clock identifier outside `0..=2`.
    Clock(u8),
    /// Clock source outside `0..=7`.
    Source(u8),
    /// Clock divisor outside `0..=4095`.
    Divisor(u16),
    /// PWM channel outside `0..=1`.
    Channel(u8),
    /// Receive buffer length differs from the transmit length.
    Length { expected: usize, actual: usize },
    /// Transfer longer than the result buffer can hold.
    Capacity { capacity: usize, requested: usize },
}

/// Errors that can occur while driving the peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriphError {
    /// An argument is outside its documented range. Nothing was written.
    InvalidArgument(InvalidArgument),
    /// The requested alternate function is not wired to the pin.
    FunctionUnavailable { pin: u8, function: Function },
    /// The peripheral page could not be mapped.
    MapUnavailable(Peripheral),
    /// The register does not fit inside its mapped page.
    OutOfRange(Register),
    /// The register offset is not a multiple of its width.
    Misaligned(Register),
    /// A status flag did not reach the expected state within the poll limit.
    Timeout { register: Register, mask: u32 },
}

impl PeriphError {
    /// Returns true for any [`PeriphError::InvalidArgument`].
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PeriphError::InvalidArgument(_))
    }
}

impl From<InvalidArgument> for PeriphError {
    #[inline]
    fn from(arg: InvalidArgument) -> Self {
        PeriphError::InvalidArgument(arg)
    }
}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidArgument::Pin(pin) => write!(f, "invalid GPIO pin {pin}"),
            InvalidArgument::Function(id) => write!(f, "invalid function identifier {id}"),
            InvalidArgument::Clock(id) => write!(f, "invalid clock {id}"),
            InvalidArgument::Source(src) => write!(f, "invalid clock source {src}"),
            InvalidArgument::Divisor(div) => write!(f, "invalid clock divisor {div}"),
            InvalidArgument::Channel(ch) => write!(f, "invalid PWM channel {ch}"),
            InvalidArgument::Length { expected, actual } => {
                write!(f, "buffer length {actual} does not match {expected}")
            }
            InvalidArgument::Capacity {
                capacity,
                requested,
            } => write!(f, "transfer of {requested} bytes exceeds capacity {capacity}"),
        }
    }
}

impl core::fmt::Display for PeriphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PeriphError::InvalidArgument(arg) => write!(f, "{arg}"),
            PeriphError::FunctionUnavailable { pin, function } => {
                write!(f, "function {} not available on GPIO {pin}", function.name())
            }
            PeriphError::MapUnavailable(peripheral) => {
                write!(f, "{peripheral} registers are not mapped")
            }
            PeriphError::OutOfRange(register) => {
                write!(f, "register {register} lies outside its page")
            }
            PeriphError::Misaligned(register) => {
                write!(
                    f,
                    "register {register} is not aligned to its {}-byte width",
                    register.width().bytes()
                )
            }
            PeriphError::Timeout { register, mask } => {
                write!(f, "timed out polling {register} for {mask:#010x}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PeriphError {}
