//! Direct, typed access to the memory-mapped peripherals of BCM283x
//! system-on-chips from user space.
//!
//! This crate binds every documented register of the timer, clock manager,
//! GPIO, PCM, PWM and SPI0 blocks to a typed [`Register`](periph::Register)
//! handle and builds the register-level protocols on top of them:
//!
//! - **GPIO function select** - per-pin alternate function table and the
//!   3-bit multiplexer codes written into `GPFSELn`
//! - **Clock manager** - password-protected source/divisor programming and
//!   start/stop of the general purpose and PWM clocks
//! - **PWM** - per-channel mode flags, range/data and FIFO helpers
//! - **SPI0** - polled full-duplex transfers driven by the TXD/RXD/DONE
//!   status flags
//!
//! # Architecture
//!
//! ```text
//! ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐
//! │  Gpio   │ │ Clocks  │ │   Pwm   │ │   Spi   │   protocol views
//! └────┬────┘ └────┬────┘ └────┬────┘ └────┬────┘
//!      └───────────┴─────┬─────┴───────────┘
//!                        ▼
//!              ┌───────────────────┐
//!              │    Peripherals    │  register map: read / write / modify
//!              └─────────┬─────────┘
//!                        ▼
//!              ┌───────────────────┐
//!              │ PageMapper / Page │  one 4 KiB window per peripheral
//!              └───────────────────┘
//! ```
//!
//! Nothing is cached: every read goes to the mapped page and every write
//! is a single bus transaction. Read-modify-write sequences run inside a
//! [`critical_section`] so they are not interleaved with each other.
//!
//! # Example
//!
//! ```rust,ignore
//! use bcm_periph::prelude::*;
//!
//! let mut mem = DevMem::open()?;
//! let periph = PeripheralsBuilder::new()
//!     .soc(Soc::Bcm2835)
//!     .std_delay()
//!     .open(&mut mem);
//!
//! // route GPCLK0 to pin 4 and run it from the 19.2 MHz oscillator / 32
//! periph.gpio().set_function(4, Function::GpClk0)?;
//! periph
//!     .clocks()
//!     .configure(ClockId::Gp0, ClockConfig::new(ClockSource::Oscillator, 32)?)?;
//! periph.clocks().start(ClockId::Gp0)?;
//!
//! periph.shutdown(&mut mem);
//! ```

#![deny(unsafe_code)]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod periph;

pub mod prelude {
    pub use crate::periph::prelude::*;
}
