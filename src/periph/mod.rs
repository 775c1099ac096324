pub mod builder;
pub mod clock;
#[cfg(feature = "devmem")]
pub mod devmem;
pub mod error;
pub mod gpio;
pub mod helpers;
pub mod page;
pub mod peripherals;
pub mod poll;
pub mod pwm;
pub mod register;
pub mod regs;
pub mod spi;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::PeripheralsBuilder;
pub use clock::{ClockConfig, ClockId, ClockSource, Clocks};
#[cfg(feature = "devmem")]
pub use devmem::DevMem;
pub use error::{InvalidArgument, PeriphError};
pub use gpio::{AltFunction, Function, Gpio, PinTable, Pull};
pub use page::MmioPage;
pub use peripherals::Peripherals;
#[cfg(feature = "std")]
pub use poll::StdDelay;
pub use poll::{Delay, PollPolicy};
pub use pwm::{Pwm, PwmChannel, PwmConfig};
pub use register::Register;
pub use spi::{CsLevel, Spi, SpiConfig};
pub use types::{MappedPage, PAGE_SIZE, PageMapper, Peripheral, Soc, Width};

pub mod prelude {
    #[cfg(feature = "devmem")]
    pub use super::DevMem;
    #[cfg(feature = "std")]
    pub use super::StdDelay;
    pub use super::{
        AltFunction, ClockConfig, ClockId, ClockSource, Clocks, CsLevel, Delay, Function, Gpio,
        InvalidArgument, MappedPage, MmioPage, PageMapper, PeriphError, Peripheral, Peripherals,
        PeripheralsBuilder, PollPolicy, Pull, Pwm, PwmChannel, PwmConfig, Register, Soc, Spi,
        SpiConfig, Width,
    };
}
