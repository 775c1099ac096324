use crate::periph::{Peripheral, Width};

/// Handle to one hardware register.
///
/// A register names its peripheral page, its byte offset inside that page
/// and its access width. Handles are plain values; reading or writing goes
/// through [`Peripherals`](crate::periph::Peripherals), which resolves the
/// page and performs the bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    peripheral: Peripheral,
    offset: u16,
    width: Width,
}

impl Register {
    /// A 32-bit register at `offset` in `peripheral`'s page.
    pub const fn new(peripheral: Peripheral, offset: u16) -> Self {
        Self::with_width(peripheral, offset, Width::U32)
    }

    pub const fn with_width(peripheral: Peripheral, offset: u16, width: Width) -> Self {
        Self {
            peripheral,
            offset,
            width,
        }
    }

    #[inline]
    pub const fn peripheral(self) -> Peripheral {
        self.peripheral
    }

    /// Byte offset inside the peripheral page.
    #[inline]
    pub const fn offset(self) -> usize {
        self.offset as usize
    }

    #[inline]
    pub const fn width(self) -> Width {
        self.width
    }
}

impl core::fmt::Display for Register {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}+{:#05x}", self.peripheral, self.offset)
    }
}
