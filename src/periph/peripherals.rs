use log::{info, trace, warn};

use crate::periph::{
    Clocks, Delay, Gpio, MappedPage, PageMapper, PeriphError, Peripheral, PinTable, PollPolicy,
    Pwm, Register, Spi, Width,
    helpers::register_span,
    types::{PAGE_SIZE, PERIPHERAL_COUNT},
};

/// Open peripheral context.
///
/// Owns one mapped page per [`Peripheral`] and the timing primitive used
/// by polling loops. Pages that failed to map stay empty and every access
/// through them reports [`PeriphError::MapUnavailable`].
///
/// The context keeps no copy of register contents: every
/// [`read`](Self::read) goes to the hardware.
///
/// # Type Parameters
/// - `P`: Page type produced by the [`PageMapper`] that opened the context
/// - `D`: Timing primitive
pub struct Peripherals<P: MappedPage, D: Delay> {
    pages: [Option<P>; PERIPHERAL_COUNT],
    pins: PinTable,
    delay: D,
    poll: PollPolicy,
    base: u64,
}

impl<P: MappedPage, D: Delay> Peripherals<P, D> {
    /// Maps every peripheral page relative to `base`.
    ///
    /// Mapping failures are logged and leave the page empty.
    pub(crate) fn open<M>(mapper: &mut M, base: u64, delay: D, poll: PollPolicy) -> Self
    where
        M: PageMapper<Page = P>,
    {
        let pages = core::array::from_fn(|slot| {
            let peripheral = Peripheral::ALL[slot];
            let Some(phys) = base.checked_add(peripheral.offset()) else {
                warn!("{peripheral} page lies beyond the address space: base {base:#x}");
                return None;
            };
            match mapper.map(phys, PAGE_SIZE) {
                Ok(page) => Some(page),
                Err(err) => {
                    warn!("failed to map {peripheral} page at {phys:#010x}: {err:?}");
                    None
                }
            }
        });

        let periph = Self {
            pages,
            pins: PinTable::new(),
            delay,
            poll,
            base,
        };
        info!(
            "peripherals opened at {base:#010x}: {} of {PERIPHERAL_COUNT} pages mapped",
            periph.pages.iter().flatten().count()
        );
        periph
    }

    /// Unmaps every page and consumes the context.
    pub fn shutdown<M>(self, mapper: &mut M)
    where
        M: PageMapper<Page = P>,
    {
        let mut released = 0;
        for page in self.pages.into_iter().flatten() {
            mapper.unmap(page);
            released += 1;
        }
        info!("peripherals shut down: {released} pages released");
    }

    pub fn gpio(&self) -> Gpio<'_, P, D> {
        Gpio::new(self)
    }

    pub fn clocks(&self) -> Clocks<'_, P, D> {
        Clocks::new(self)
    }

    pub fn pwm(&self) -> Pwm<'_, P, D> {
        Pwm::new(self)
    }

    pub fn spi(&self) -> Spi<'_, P, D> {
        Spi::new(self)
    }

    /// The mapped page of `peripheral`.
    ///
    /// # Errors
    /// * [`PeriphError::MapUnavailable`] - if the page failed to map
    pub fn page(&self, peripheral: Peripheral) -> Result<&P, PeriphError> {
        self.pages[peripheral.index()]
            .as_ref()
            .ok_or(PeriphError::MapUnavailable(peripheral))
    }

    pub fn is_mapped(&self, peripheral: Peripheral) -> bool {
        self.pages[peripheral.index()].is_some()
    }

    /// Physical address the pages were mapped relative to.
    pub fn peripheral_base(&self) -> u64 {
        self.base
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn pins(&self) -> &PinTable {
        &self.pins
    }

    /// Reads the current hardware value of `register`.
    ///
    /// Narrow registers are zero-extended.
    ///
    /// # Errors
    /// * [`PeriphError::MapUnavailable`] - if the page failed to map
    /// * [`PeriphError::OutOfRange`] - if the register does not fit in the page
    /// * [`PeriphError::Misaligned`] - if the offset is not a multiple of the width
    pub fn read(&self, register: Register) -> Result<u32, PeriphError> {
        let page = self.page(register.peripheral())?;
        let offset = register_span(register, page.len())?;
        let value = match register.width() {
            Width::U8 => page.read_u8(offset) as u32,
            Width::U16 => page.read_u16(offset) as u32,
            Width::U32 => page.read_u32(offset),
        };
        trace!("read {register} = {value:#010x}");
        Ok(value)
    }

    /// Stores `value` into `register`.
    ///
    /// Narrow registers receive the low bits of `value`.
    ///
    /// # Errors
    /// * [`PeriphError::MapUnavailable`] - if the page failed to map
    /// * [`PeriphError::OutOfRange`] - if the register does not fit in the page
    /// * [`PeriphError::Misaligned`] - if the offset is not a multiple of the width
    pub fn write(&self, register: Register, value: u32) -> Result<(), PeriphError> {
        let page = self.page(register.peripheral())?;
        let offset = register_span(register, page.len())?;
        trace!("write {register} = {value:#010x}");
        match register.width() {
            Width::U8 => page.write_u8(offset, value as u8),
            Width::U16 => page.write_u16(offset, value as u16),
            Width::U32 => page.write_u32(offset, value),
        }
        Ok(())
    }

    /// Read-modify-write of `register` inside a critical section.
    ///
    /// Returns the value written.
    pub fn modify(
        &self,
        register: Register,
        f: impl FnOnce(u32) -> u32,
    ) -> Result<u32, PeriphError> {
        critical_section::with(|_| {
            let value = f(self.read(register)?);
            self.write(register, value)?;
            Ok(value)
        })
    }

    /// Sets the bits of `mask` in `register`, leaving the others alone.
    pub fn set_bits(&self, register: Register, mask: u32) -> Result<u32, PeriphError> {
        self.modify(register, |value| value | mask)
    }

    /// Clears the bits of `mask` in `register`, leaving the others alone.
    pub fn clear_bits(&self, register: Register, mask: u32) -> Result<u32, PeriphError> {
        self.modify(register, |value| value & !mask)
    }

    /// Polls `register` until any bit of `mask` is set (`set = true`) or
    /// every bit of `mask` is clear (`set = false`).
    ///
    /// Sleeps for the poll interval between reads. Returns the last value read.
    ///
    /// # Errors
    /// * [`PeriphError::Timeout`] - if the poll limit is reached first
    pub fn wait_for(&self, register: Register, mask: u32, set: bool) -> Result<u32, PeriphError> {
        let mut polls = 0u32;
        loop {
            let value = self.read(register)?;
            if (value & mask != 0) == set {
                return Ok(value);
            }

            polls = polls.saturating_add(1);
            if self.poll.exhausted(polls) {
                warn!(
                    "gave up on {register} after {polls} polls: mask {mask:#010x}, last {value:#010x}"
                );
                return Err(PeriphError::Timeout { register, mask });
            }
            self.delay.sleep(0, self.poll.interval_ns);
        }
    }
}
