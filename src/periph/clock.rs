//! Clock manager: general purpose clocks 0..=2 and the PWM clock.
//!
//! Every write to a clock manager register must carry the password byte
//! `0x5A` in bits 24..=31, otherwise the hardware ignores it. Reads return
//! zero in those bits.

use log::debug;

use crate::periph::{
    Delay, InvalidArgument, MappedPage, PeriphError, Peripherals, Register,
    helpers::{field_mask, replace_field},
    regs,
};

/// Password byte required on every clock manager write.
pub const PASSWORD: u32 = 0x5A00_0000;
const PASSWORD_MASK: u32 = field_mask(24, 8);

/// Source select field of `CM_*CTL`.
const CTL_SRC_WIDTH: u32 = 4;
/// Enable bit of `CM_*CTL`.
pub const CTL_ENAB: u32 = 1 << 4;
/// Busy bit of `CM_*CTL`.
pub const CTL_BUSY: u32 = 1 << 7;

/// Integer part of the divisor in `CM_*DIV`.
const DIV_SHIFT: u32 = 12;
const DIV_WIDTH: u32 = 12;

/// Largest integer divisor.
pub const MAX_DIVISOR: u16 = 0xFFF;

/// Clock generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockId {
    Gp0,
    Gp1,
    Gp2,
    /// Clock shared by both PWM channels.
    Pwm,
}

impl ClockId {
    pub const ALL: [ClockId; 4] = [ClockId::Gp0, ClockId::Gp1, ClockId::Gp2, ClockId::Pwm];

    pub const fn control(self) -> Register {
        match self {
            ClockId::Gp0 => regs::CM_GP0CTL,
            ClockId::Gp1 => regs::CM_GP1CTL,
            ClockId::Gp2 => regs::CM_GP2CTL,
            ClockId::Pwm => regs::CM_PWMCTL,
        }
    }

    pub const fn divisor(self) -> Register {
        match self {
            ClockId::Gp0 => regs::CM_GP0DIV,
            ClockId::Gp1 => regs::CM_GP1DIV,
            ClockId::Gp2 => regs::CM_GP2DIV,
            ClockId::Pwm => regs::CM_PWMDIV,
        }
    }
}

/// Numbers the general purpose clocks 0..=2. The PWM clock has no number.
impl TryFrom<u8> for ClockId {
    type Error = PeriphError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(ClockId::Gp0),
            1 => Ok(ClockId::Gp1),
            2 => Ok(ClockId::Gp2),
            _ => Err(InvalidArgument::Clock(id).into()),
        }
    }
}

/// Clock source select values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClockSource {
    Gnd = 0,
    /// 19.2 MHz crystal.
    Oscillator = 1,
    TestDebug0 = 2,
    TestDebug1 = 3,
    PllA = 4,
    PllC = 5,
    PllD = 6,
    HdmiAux = 7,
}

impl TryFrom<u8> for ClockSource {
    type Error = PeriphError;

    fn try_from(src: u8) -> Result<Self, Self::Error> {
        Ok(match src {
            0 => ClockSource::Gnd,
            1 => ClockSource::Oscillator,
            2 => ClockSource::TestDebug0,
            3 => ClockSource::TestDebug1,
            4 => ClockSource::PllA,
            5 => ClockSource::PllC,
            6 => ClockSource::PllD,
            7 => ClockSource::HdmiAux,
            _ => return Err(InvalidArgument::Source(src).into()),
        })
    }
}

impl ClockSource {
    /// Decodes the source field of a `CM_*CTL` value.
    ///
    /// Codes 8..=15 select ground on the hardware.
    pub fn from_field(value: u32) -> Self {
        let code = (value & field_mask(0, CTL_SRC_WIDTH)) as u8;
        ClockSource::try_from(code).unwrap_or(ClockSource::Gnd)
    }
}

/// Source and integer divisor of a clock generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    source: ClockSource,
    divisor: u16,
}

impl ClockConfig {
    /// # Errors
    /// * [`PeriphError::InvalidArgument`] - if `divisor` is above [`MAX_DIVISOR`]
    pub fn new(source: ClockSource, divisor: u16) -> Result<Self, PeriphError> {
        if divisor > MAX_DIVISOR {
            return Err(InvalidArgument::Divisor(divisor).into());
        }
        Ok(Self { source, divisor })
    }

    /// Builds a configuration from raw numbers, checking the source first.
    pub fn from_raw(source: u8, divisor: u16) -> Result<Self, PeriphError> {
        Self::new(ClockSource::try_from(source)?, divisor)
    }

    pub fn source(&self) -> ClockSource {
        self.source
    }

    pub fn divisor(&self) -> u16 {
        self.divisor
    }

    /// Value written to `CM_*CTL`. Leaves the generator disabled.
    pub fn control_word(&self) -> u32 {
        PASSWORD | self.source as u32
    }

    /// Value written to `CM_*DIV`. The fractional part is zero.
    pub fn divisor_word(&self) -> u32 {
        PASSWORD | replace_field(0, DIV_SHIFT, DIV_WIDTH, self.divisor as u32)
    }
}

/// Clock manager view over an open [`Peripherals`] context.
pub struct Clocks<'a, P: MappedPage, D: Delay> {
    periph: &'a Peripherals<P, D>,
}

impl<'a, P: MappedPage, D: Delay> Clocks<'a, P, D> {
    pub(crate) fn new(periph: &'a Peripherals<P, D>) -> Self {
        Self { periph }
    }

    /// Writes source and divisor of `clock`.
    ///
    /// Both words replace the whole register, which also disables the
    /// generator. Call [`start`](Self::start) afterwards.
    pub fn configure(&self, clock: ClockId, config: ClockConfig) -> Result<(), PeriphError> {
        debug!(
            "clock {clock:?}: source {:?}, divisor {}",
            config.source, config.divisor
        );
        self.periph.write(clock.control(), config.control_word())?;
        self.periph.write(clock.divisor(), config.divisor_word())
    }

    /// Enables `clock`, keeping source and divisor.
    pub fn start(&self, clock: ClockId) -> Result<(), PeriphError> {
        debug!("clock {clock:?}: start");
        self.periph.modify(clock.control(), |value| {
            (value & !PASSWORD_MASK) | PASSWORD | CTL_ENAB
        })?;
        Ok(())
    }

    /// Disables `clock`, keeping source and divisor.
    ///
    /// The generator finishes its current cycle first; see
    /// [`wait_idle`](Self::wait_idle).
    pub fn stop(&self, clock: ClockId) -> Result<(), PeriphError> {
        debug!("clock {clock:?}: stop");
        self.periph.modify(clock.control(), |value| {
            (value & !(PASSWORD_MASK | CTL_ENAB)) | PASSWORD
        })?;
        Ok(())
    }

    /// Returns true while the generator is running.
    pub fn is_busy(&self, clock: ClockId) -> Result<bool, PeriphError> {
        Ok(self.periph.read(clock.control())? & CTL_BUSY != 0)
    }

    /// Polls until the busy flag of `clock` drops.
    ///
    /// # Errors
    /// * [`PeriphError::Timeout`] - if a poll limit is configured and reached
    pub fn wait_idle(&self, clock: ClockId) -> Result<(), PeriphError> {
        self.periph.wait_for(clock.control(), CTL_BUSY, false)?;
        Ok(())
    }

    /// Source currently selected for `clock`.
    pub fn source(&self, clock: ClockId) -> Result<ClockSource, PeriphError> {
        let value = self.periph.read(clock.control())?;
        Ok(ClockSource::from_field(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periph::{
        Peripheral,
        test_support::{sim_page, sim_peripherals, total_writes},
    };

    #[test]
    fn configure_writes_password_in_both_words() {
        let periph = sim_peripherals();
        let clock_page = sim_page(&periph, Peripheral::Clock);
        let config = ClockConfig::new(ClockSource::PllD, 0xABC).unwrap();

        periph.clocks().configure(ClockId::Gp0, config).unwrap();

        assert_eq!(
            clock_page.journal().as_slice(),
            &[(0x70, 0x5A00_0006), (0x74, 0x5AAB_C000)]
        );
        assert_eq!(config.divisor_word() & field_mask(12, 12), 0xABC << 12);
    }

    #[test]
    fn one_routine_serves_every_clock() {
        let periph = sim_peripherals();
        let clock_page = sim_page(&periph, Peripheral::Clock);
        let config = ClockConfig::from_raw(1, 4).unwrap();

        for clock in ClockId::ALL {
            periph.clocks().configure(clock, config).unwrap();
            assert_eq!(
                clock_page.last_write(),
                Some((clock.divisor().offset(), 0x5A00_4000))
            );
            assert_eq!(clock_page.peek(clock.control().offset()), 1);
        }
    }

    #[test]
    fn start_and_stop_keep_source_and_divisor() {
        let periph = sim_peripherals();
        let clocks = periph.clocks();
        let config = ClockConfig::new(ClockSource::Oscillator, 100).unwrap();

        clocks.configure(ClockId::Gp1, config).unwrap();
        clocks.start(ClockId::Gp1).unwrap();
        assert_eq!(clocks.is_busy(ClockId::Gp1), Ok(true));

        clocks.stop(ClockId::Gp1).unwrap();
        clocks.wait_idle(ClockId::Gp1).unwrap();
        assert_eq!(clocks.is_busy(ClockId::Gp1), Ok(false));
        assert_eq!(clocks.source(ClockId::Gp1), Ok(ClockSource::Oscillator));

        let clock_page = sim_page(&periph, Peripheral::Clock);
        assert_eq!(clock_page.peek(0x7C), 100 << 12);
        // every write carried the password
        for (_, value) in clock_page.journal() {
            assert_eq!(value & PASSWORD_MASK, PASSWORD);
        }
    }

    #[test]
    fn invalid_arguments_write_nothing() {
        let periph = sim_peripherals();
        assert_eq!(
            ClockId::try_from(3),
            Err(PeriphError::InvalidArgument(InvalidArgument::Clock(3)))
        );
        assert_eq!(
            ClockConfig::from_raw(8, 0),
            Err(PeriphError::InvalidArgument(InvalidArgument::Source(8)))
        );
        assert_eq!(
            ClockConfig::from_raw(1, 4096),
            Err(PeriphError::InvalidArgument(InvalidArgument::Divisor(4096)))
        );
        assert_eq!(total_writes(&periph), 0);
    }

    #[test]
    fn numbered_clocks() {
        assert_eq!(ClockId::try_from(0), Ok(ClockId::Gp0));
        assert_eq!(ClockId::try_from(2), Ok(ClockId::Gp2));
        assert_eq!(ClockSource::try_from(5), Ok(ClockSource::PllC));
    }

    #[test]
    fn every_clock_source_and_divisor_carries_the_password() {
        let periph = sim_peripherals();
        let clock_page = sim_page(&periph, Peripheral::Clock);

        for clock in ClockId::ALL {
            for src in 0..=7u8 {
                for div in [0u16, 1, 0x800, 0xFFF] {
                    let config = ClockConfig::from_raw(src, div).unwrap();
                    periph.clocks().configure(clock, config).unwrap();

                    let journal = clock_page.journal();
                    let &[ctl, div_write] = &journal[journal.len() - 2..] else {
                        panic!("configure must write exactly two words");
                    };
                    assert_eq!(ctl, (clock.control().offset(), PASSWORD | src as u32));
                    assert_eq!(
                        div_write,
                        (clock.divisor().offset(), PASSWORD | (div as u32) << 12)
                    );
                    for (_, word) in [ctl, div_write] {
                        assert_eq!(word >> 24, 0x5A);
                    }
                    assert_eq!((div_write.1 >> 12) & 0xFFF, div as u32);
                    assert_eq!(div_write.1 & 0xFFF, 0);
                    assert_eq!(periph.clocks().source(clock), Ok(config.source()));
                }
            }
        }
    }

    #[test]
    fn grounded_source_codes_read_as_gnd() {
        let periph = sim_peripherals();
        let clock_page = sim_page(&periph, Peripheral::Clock);

        clock_page.poke(0x70, 0x0C);
        assert_eq!(periph.clocks().source(ClockId::Gp0), Ok(ClockSource::Gnd));
        clock_page.poke(0x70, CTL_BUSY | CTL_ENAB | 6);
        assert_eq!(periph.clocks().source(ClockId::Gp0), Ok(ClockSource::PllD));
        assert_eq!(ClockSource::from_field(0xF), ClockSource::Gnd);
        assert_eq!(ClockSource::from_field(0x15), ClockSource::PllC);
    }
}
