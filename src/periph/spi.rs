//! SPI0 master driven by polling its status flags.
//!
//! A transfer runs as one session: clear both FIFOs, raise TA, move the
//! bytes through the FIFO register gated by TXD / RXD, wait for DONE and
//! drop TA again. TA is dropped even when a poll times out, so a failed
//! transfer never leaves the chip select asserted.

use log::debug;

use crate::periph::{
    Delay, InvalidArgument, MappedPage, PeriphError, Peripherals,
    regs::{SPI0_CLK, SPI0_CS, SPI0_FIFO},
};

// `SPI0_CS` bits
const CS_SELECT_BOTH: u32 = 0b10;
const CS_SELECT_CS1: u32 = 0b01;
const CS_SELECT_NONE: u32 = 0b11;
const CS_CPHA: u32 = 1 << 2;
const CS_CPOL: u32 = 1 << 3;
/// Clears TX and RX FIFOs. Self-clearing.
pub const CS_CLEAR: u32 = 0b11 << 4;
/// Transfer active.
pub const CS_TA: u32 = 1 << 7;
/// Transfer done.
pub const CS_DONE: u32 = 1 << 16;
/// RX FIFO holds data.
pub const CS_RXD: u32 = 1 << 17;
/// TX FIFO can accept data.
pub const CS_TXD: u32 = 1 << 18;
const CS_CSPOL0: u32 = 1 << 21;
const CS_CSPOL1: u32 = 1 << 22;
/// Read-only status flags, never written back.
pub const CS_STATUS: u32 = 0x001F_0000;

/// Level a chip select line is driven to while a transfer is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsLevel {
    Low,
    High,
}

/// Clock mode, chip select behaviour and clock divider.
///
/// A chip select set to `None` is not asserted during transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    /// Clock idles high.
    pub clock_polarity: bool,
    /// First clock transition at the beginning of the data bit instead of the middle.
    pub clock_phase: bool,
    /// Core clock divider. Zero selects the largest divider.
    pub clock_divider: u16,
    pub chip_select0: Option<CsLevel>,
    pub chip_select1: Option<CsLevel>,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            clock_polarity: false,
            clock_phase: true,
            clock_divider: 0,
            chip_select0: None,
            chip_select1: None,
        }
    }
}

impl SpiConfig {
    /// Value written to `SPI0_CS` by [`Spi::configure`].
    pub fn control_word(&self) -> u32 {
        let mut value = match (self.chip_select0, self.chip_select1) {
            (Some(_), Some(_)) => CS_SELECT_BOTH,
            (Some(_), None) => 0,
            (None, Some(_)) => CS_SELECT_CS1,
            (None, None) => CS_SELECT_NONE,
        };

        if self.clock_polarity {
            value |= CS_CPOL;
        }
        if self.clock_phase {
            value |= CS_CPHA;
        }
        if self.chip_select0 == Some(CsLevel::High) {
            value |= CS_CSPOL0;
        }
        if self.chip_select1 == Some(CsLevel::High) {
            value |= CS_CSPOL1;
        }
        value
    }
}

/// SPI0 view over an open [`Peripherals`] context.
pub struct Spi<'a, P: MappedPage, D: Delay> {
    periph: &'a Peripherals<P, D>,
}

impl<'a, P: MappedPage, D: Delay> Spi<'a, P, D> {
    pub(crate) fn new(periph: &'a Peripherals<P, D>) -> Self {
        Self { periph }
    }

    /// Writes the control word, then the clock divider.
    ///
    /// The control write replaces the whole register, ending any transfer.
    pub fn configure(&self, config: &SpiConfig) -> Result<(), PeriphError> {
        debug!("spi0: {config:?}");
        self.periph.write(SPI0_CS, config.control_word())?;
        self.periph.write(SPI0_CLK, config.clock_divider as u32)
    }

    /// Sends one byte and returns the byte clocked in at the same time.
    pub fn transfer_value(&self, value: u8) -> Result<u8, PeriphError> {
        debug!("spi0: transfer {value:#04x}");
        self.session(|| {
            self.periph.wait_for(SPI0_CS, CS_TXD, true)?;
            self.periph.write(SPI0_FIFO, value as u32)?;
            self.periph.wait_for(SPI0_CS, CS_DONE, true)?;
            Ok(self.periph.read(SPI0_FIFO)? as u8)
        })
    }

    /// Sends every byte of `tx`, storing the received bytes in `rx`.
    ///
    /// # Errors
    /// * [`PeriphError::InvalidArgument`] - if `rx` and `tx` differ in length
    /// * [`PeriphError::Timeout`] - if a status flag does not arrive within the poll limit
    pub fn transfer_into(&self, tx: &[u8], rx: &mut [u8]) -> Result<(), PeriphError> {
        if tx.len() != rx.len() {
            return Err(InvalidArgument::Length {
                expected: tx.len(),
                actual: rx.len(),
            }
            .into());
        }
        if tx.is_empty() {
            return Ok(());
        }

        debug!("spi0: transfer {} bytes", tx.len());
        self.session(|| {
            for (out, slot) in tx.iter().zip(rx.iter_mut()) {
                self.periph.wait_for(SPI0_CS, CS_TXD, true)?;
                self.periph.write(SPI0_FIFO, *out as u32)?;
                self.periph.wait_for(SPI0_CS, CS_RXD, true)?;
                *slot = self.periph.read(SPI0_FIFO)? as u8;
            }
            self.periph.wait_for(SPI0_CS, CS_DONE, true)?;
            Ok(())
        })
    }

    /// Sends every byte of `tx` and returns the received bytes in order.
    ///
    /// # Errors
    /// * [`PeriphError::InvalidArgument`] - if `tx` is longer than `N`
    pub fn transfer_values<const N: usize>(
        &self,
        tx: &[u8],
    ) -> Result<heapless::Vec<u8, N>, PeriphError> {
        let mut rx = heapless::Vec::new();
        rx.resize_default(tx.len())
            .map_err(|_| InvalidArgument::Capacity {
                capacity: N,
                requested: tx.len(),
            })?;
        self.transfer_into(tx, &mut rx)?;
        Ok(rx)
    }

    /// Runs `f` with both FIFOs cleared and TA raised, then drops TA.
    fn session<T>(&self, f: impl FnOnce() -> Result<T, PeriphError>) -> Result<T, PeriphError> {
        self.periph.modify(SPI0_CS, |cs| (cs & !CS_STATUS) | CS_CLEAR)?;
        self.periph.modify(SPI0_CS, |cs| (cs & !CS_STATUS) | CS_TA)?;

        let result = f();
        let released = self
            .periph
            .modify(SPI0_CS, |cs| cs & !(CS_STATUS | CS_TA));

        let value = result?;
        released?;
        Ok(value)
    }
}
