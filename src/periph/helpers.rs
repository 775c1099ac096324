//! Utility functions for register bounds and bit-field arithmetic.
//!
//! These helpers are what the protocol views use to place fields inside
//! registers. They are public so that code driving registers directly
//! through [`Peripherals::modify`](crate::periph::Peripherals::modify) can
//! reuse them.

use crate::periph::{InvalidArgument, PeriphError, Register};

/// Number of GPIO pins on the SoC.
pub const PIN_COUNT: usize = 54;

/// Checks that a register fits inside a page of `page_len` bytes and is
/// aligned to its width.
///
/// Returns the byte offset of the register.
///
/// # Errors
/// * [`PeriphError::OutOfRange`] - if `offset + width` exceeds the page
/// * [`PeriphError::Misaligned`] - if `offset` is not a multiple of the width
///
/// # Example
/// ```
/// use bcm_periph::periph::{Peripheral, Register, helpers::register_span};
///
/// let reg = Register::new(Peripheral::Gpio, 0x1C);
/// assert_eq!(register_span(reg, 4096), Ok(0x1C));
///
/// // the last word of a page fits, one byte further does not
/// assert!(register_span(Register::new(Peripheral::Gpio, 4092), 4096).is_ok());
/// assert!(register_span(Register::new(Peripheral::Gpio, 4093), 4096).is_err());
///
/// // word registers must sit on a word boundary
/// assert!(register_span(Register::new(Peripheral::Gpio, 0x1D), 4096).is_err());
/// ```
pub fn register_span(register: Register, page_len: usize) -> Result<usize, PeriphError> {
    let offset = register.offset();
    let end = offset
        .checked_add(register.width().bytes())
        .ok_or(PeriphError::OutOfRange(register))?;

    if end > page_len {
        return Err(PeriphError::OutOfRange(register));
    }
    if offset % register.width().bytes() != 0 {
        return Err(PeriphError::Misaligned(register));
    }

    Ok(offset)
}

/// Mask of a `width`-bit field starting at bit `shift`.
///
/// # Example
/// ```
/// use bcm_periph::periph::helpers::field_mask;
///
/// assert_eq!(field_mask(12, 12), 0x00FF_F000);
/// assert_eq!(field_mask(0, 32), u32::MAX);
/// ```
#[inline]
pub const fn field_mask(shift: u32, width: u32) -> u32 {
    (((1u64 << width) - 1) as u32) << shift
}

/// Replaces the `width`-bit field at `shift` in `value` with `field`.
///
/// Bits of `field` above `width` are discarded.
///
/// # Example
/// ```
/// use bcm_periph::periph::helpers::replace_field;
///
/// // put 0b100 into bits 12..=14, leaving everything else alone
/// assert_eq!(replace_field(0xFFFF_FFFF, 12, 3, 0b100), 0xFFFF_CFFF);
/// ```
#[inline]
pub const fn replace_field(value: u32, shift: u32, width: u32, field: u32) -> u32 {
    let mask = field_mask(shift, width);
    (value & !mask) | ((field << shift) & mask)
}

/// Validates a GPIO pin number.
///
/// # Errors
/// * [`PeriphError::InvalidArgument`] - if `pin` is 54 or above
#[inline]
pub fn check_pin(pin: u8) -> Result<u8, PeriphError> {
    if (pin as usize) < PIN_COUNT {
        Ok(pin)
    } else {
        Err(InvalidArgument::Pin(pin).into())
    }
}

/// Function-select register index and bit offset of a pin.
///
/// # Example
/// ```
/// use bcm_periph::periph::helpers::function_select_position;
///
/// assert_eq!(function_select_position(4), (0, 12));
/// assert_eq!(function_select_position(18), (1, 24));
/// assert_eq!(function_select_position(53), (5, 9));
/// ```
#[inline]
pub const fn function_select_position(pin: u8) -> (usize, u32) {
    ((pin / 10) as usize, (pin % 10) as u32 * 3)
}

/// Bank index and bit of a pin in the two-bank GPIO registers.
///
/// # Example
/// ```
/// use bcm_periph::periph::helpers::bank_position;
///
/// assert_eq!(bank_position(18), (0, 18));
/// assert_eq!(bank_position(40), (1, 8));
/// ```
#[inline]
pub const fn bank_position(pin: u8) -> (usize, u32) {
    ((pin / 32) as usize, (pin % 32) as u32)
}

#[test]
fn register_span_edge_cases() {
    use crate::periph::{Peripheral, Width};

    let byte = Register::with_width(Peripheral::Pwm, 4095, Width::U8);
    assert_eq!(register_span(byte, 4096), Ok(4095));

    let half = Register::with_width(Peripheral::Pwm, 4095, Width::U16);
    assert_eq!(register_span(half, 4096), Err(PeriphError::OutOfRange(half)));

    // short page
    let word = Register::new(Peripheral::Pwm, 0x20);
    assert_eq!(register_span(word, 0x20), Err(PeriphError::OutOfRange(word)));
    assert_eq!(register_span(word, 0x24), Ok(0x20));
}

#[test]
fn register_span_rejects_misaligned() {
    use crate::periph::{Peripheral, Width};

    let word = Register::new(Peripheral::Gpio, 0x1D);
    assert_eq!(register_span(word, 4096), Err(PeriphError::Misaligned(word)));

    let half = Register::with_width(Peripheral::Gpio, 0x1D, Width::U16);
    assert_eq!(register_span(half, 4096), Err(PeriphError::Misaligned(half)));

    let half = Register::with_width(Peripheral::Gpio, 0x1E, Width::U16);
    assert_eq!(register_span(half, 4096), Ok(0x1E));

    let byte = Register::with_width(Peripheral::Gpio, 0x1D, Width::U8);
    assert_eq!(register_span(byte, 4096), Ok(0x1D));
}

#[test]
fn check_pin_bounds() {
    assert_eq!(check_pin(0), Ok(0));
    assert_eq!(check_pin(53), Ok(53));
    assert_eq!(
        check_pin(54),
        Err(PeriphError::InvalidArgument(InvalidArgument::Pin(54)))
    );
}
