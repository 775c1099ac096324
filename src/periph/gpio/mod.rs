//! GPIO function multiplexer and digital level access.

mod function;
mod table;

pub use function::{AltFunction, Function};
pub use table::{FunctionRow, PinTable};

use log::debug;

use crate::periph::{
    Delay, MappedPage, PeriphError, Peripherals,
    helpers::{bank_position, check_pin, function_select_position, replace_field},
    regs,
};

/// Time the pull control signal is held on either side of the clock
/// strobe. The datasheet asks for 150 core cycles.
const PULL_SETTLE_NS: u32 = 1_000;

/// Pull resistor setting written to `GPPUD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Pull {
    Off = 0b00,
    Down = 0b01,
    Up = 0b10,
}

/// GPIO view over an open [`Peripherals`] context.
pub struct Gpio<'a, P: MappedPage, D: Delay> {
    periph: &'a Peripherals<P, D>,
}

impl<'a, P: MappedPage, D: Delay> Gpio<'a, P, D> {
    pub(crate) fn new(periph: &'a Peripherals<P, D>) -> Self {
        Self { periph }
    }

    /// Routes `function` to `pin`.
    ///
    /// Only the 3-bit field of the pin inside `GPFSEL(pin / 10)` changes.
    ///
    /// # Errors
    /// * [`PeriphError::InvalidArgument`] - if `pin` is 54 or above
    /// * [`PeriphError::FunctionUnavailable`] - if the pin has no slot for `function`
    /// * [`PeriphError::MapUnavailable`] - if the GPIO page is not mapped
    pub fn set_function(&self, pin: u8, function: Function) -> Result<(), PeriphError> {
        let alt = self
            .periph
            .pins()
            .slot_of(pin, function)?
            .ok_or(PeriphError::FunctionUnavailable { pin, function })?;

        let (index, shift) = function_select_position(pin);
        debug!(
            "gpio {pin}: select {} ({alt:?}, code {:#05b})",
            function.name(),
            alt.code()
        );
        self.periph.modify(regs::GPFSEL[index], |value| {
            replace_field(value, shift, 3, alt.code())
        })?;
        Ok(())
    }

    /// Same as [`set_function`](Self::set_function) with a raw function identifier.
    ///
    /// # Errors
    /// * [`PeriphError::InvalidArgument`] - if `function` is above [`Function::MAX_ID`]
    ///   or `pin` is 54 or above; the function is checked first
    pub fn set_function_id(&self, pin: u8, function: u8) -> Result<(), PeriphError> {
        let function = Function::from_id(function)?;
        self.set_function(pin, function)
    }

    /// Returns true if `pin` has a multiplexer slot for `function`.
    pub fn function_available(&self, pin: u8, function: Function) -> Result<bool, PeriphError> {
        Ok(self.periph.pins().slot_of(pin, function)?.is_some())
    }

    /// Returns true if `pin` is brought out on the board header.
    pub fn gpio_accessible(&self, pin: u8) -> Result<bool, PeriphError> {
        self.periph.pins().is_accessible(pin)
    }

    /// Reads back the multiplexer setting of `pin`.
    pub fn alt_function(&self, pin: u8) -> Result<AltFunction, PeriphError> {
        let pin = check_pin(pin)?;
        let (index, shift) = function_select_position(pin);
        let value = self.periph.read(regs::GPFSEL[index])?;
        Ok(AltFunction::from_code(value >> shift))
    }

    /// Reads back the function currently routed to `pin`.
    ///
    /// Returns `None` when the pin is set to a slot the table leaves empty.
    pub fn function(&self, pin: u8) -> Result<Option<Function>, PeriphError> {
        let alt = self.alt_function(pin)?;
        Ok(self.periph.pins().row(pin)?[alt.slot()])
    }

    /// Drives an output pin high or low.
    ///
    /// Writes a single bit to `GPSETn` or `GPCLRn`; other pins are not affected.
    pub fn set_level(&self, pin: u8, high: bool) -> Result<(), PeriphError> {
        let pin = check_pin(pin)?;
        let (bank, bit) = bank_position(pin);
        let reg = if high {
            regs::GPSET[bank]
        } else {
            regs::GPCLR[bank]
        };
        self.periph.write(reg, 1 << bit)
    }

    /// Samples the level of `pin`.
    pub fn level(&self, pin: u8) -> Result<bool, PeriphError> {
        let pin = check_pin(pin)?;
        let (bank, bit) = bank_position(pin);
        Ok(self.periph.read(regs::GPLEV[bank])? & (1 << bit) != 0)
    }

    /// Sets the pull resistor of `pin`.
    ///
    /// Runs the `GPPUD` / `GPPUDCLKn` strobe: control value, settle, clock
    /// the pin, settle, release both registers.
    pub fn set_pull(&self, pin: u8, pull: Pull) -> Result<(), PeriphError> {
        let pin = check_pin(pin)?;
        let (bank, bit) = bank_position(pin);
        debug!("gpio {pin}: pull {pull:?}");

        self.periph.write(regs::GPPUD, pull as u32)?;
        self.periph.delay().sleep(0, PULL_SETTLE_NS);
        self.periph.write(regs::GPPUDCLK[bank], 1 << bit)?;
        self.periph.delay().sleep(0, PULL_SETTLE_NS);
        self.periph.write(regs::GPPUD, Pull::Off as u32)?;
        self.periph.write(regs::GPPUDCLK[bank], 0)
    }
}
