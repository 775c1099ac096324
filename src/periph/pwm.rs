//! Pulse width modulator with two channels sharing one control register
//! and one clock.

use log::debug;

use crate::periph::{
    ClockConfig, ClockId, Delay, InvalidArgument, MappedPage, PeriphError, Peripherals,
    helpers::replace_field, regs,
};

// Per-channel `PWM_CTL` bits; channel 1 uses the same layout shifted by 8.
const CTL_PWEN: u32 = 0x01;
const CTL_MODE: u8 = 0x02;
const CTL_RPTL: u8 = 0x04;
const CTL_SBIT: u8 = 0x08;
const CTL_POLA: u8 = 0x10;
const CTL_USEF: u8 = 0x20;
const CTL_MSEN: u8 = 0x80;
/// Clears the FIFO shared by both channels. Self-clearing.
const CTL_CLRF: u32 = 0x40;

const STA_FULL: u32 = 1 << 0;
const STA_EMPTY: u32 = 1 << 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PwmChannel {
    Ch0,
    Ch1,
}

impl PwmChannel {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit position of the channel's byte inside `PWM_CTL`.
    #[inline]
    const fn ctl_shift(self) -> u32 {
        self.index() as u32 * 8
    }
}

impl TryFrom<u8> for PwmChannel {
    type Error = PeriphError;

    fn try_from(channel: u8) -> Result<Self, Self::Error> {
        match channel {
            0 => Ok(PwmChannel::Ch0),
            1 => Ok(PwmChannel::Ch1),
            _ => Err(InvalidArgument::Channel(channel).into()),
        }
    }
}

/// Mode flags of one channel. The default is plain PWM from the data register.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PwmConfig {
    /// Shift the data out serially instead of modulating it.
    pub serializer: bool,
    /// Mark/space output instead of the PWM algorithm.
    pub ms_mode: bool,
    /// Take data from the FIFO instead of the data register.
    pub use_fifo: bool,
    /// Repeat the last FIFO word when the FIFO runs empty.
    pub repeat_last: bool,
    /// Output high while no data is transmitted.
    pub idle_high: bool,
    pub reverse_polarity: bool,
}

impl PwmConfig {
    /// The channel's 8-bit control field. The enable bit is always clear.
    pub fn bits(&self) -> u8 {
        [
            (self.serializer, CTL_MODE),
            (self.repeat_last, CTL_RPTL),
            (self.idle_high, CTL_SBIT),
            (self.reverse_polarity, CTL_POLA),
            (self.use_fifo, CTL_USEF),
            (self.ms_mode, CTL_MSEN),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .fold(0, |bits, (_, bit)| bits | bit)
    }
}

/// PWM view over an open [`Peripherals`] context.
///
/// Channels are numbered 0 and 1; any other number is rejected before a
/// register is touched.
pub struct Pwm<'a, P: MappedPage, D: Delay> {
    periph: &'a Peripherals<P, D>,
}

impl<'a, P: MappedPage, D: Delay> Pwm<'a, P, D> {
    pub(crate) fn new(periph: &'a Peripherals<P, D>) -> Self {
        Self { periph }
    }

    /// Replaces the control byte of `channel` with `config`, stopping it.
    ///
    /// The other channel's byte is left untouched.
    pub fn configure(&self, channel: u8, config: PwmConfig) -> Result<(), PeriphError> {
        let channel = PwmChannel::try_from(channel)?;
        debug!("pwm {channel:?}: {config:?}");
        self.periph.modify(regs::PWM_CTL, |value| {
            replace_field(value, channel.ctl_shift(), 8, config.bits() as u32)
        })?;
        Ok(())
    }

    /// Configures the clock shared by both channels.
    pub fn configure_clock(&self, config: ClockConfig) -> Result<(), PeriphError> {
        self.periph.clocks().configure(ClockId::Pwm, config)
    }

    /// Sets the period of `channel` in clock ticks.
    pub fn set_range(&self, channel: u8, range: u32) -> Result<(), PeriphError> {
        let channel = PwmChannel::try_from(channel)?;
        self.periph.write(regs::PWM_RNG[channel.index()], range)
    }

    pub fn set_data(&self, channel: u8, data: u32) -> Result<(), PeriphError> {
        let channel = PwmChannel::try_from(channel)?;
        self.periph.write(regs::PWM_DAT[channel.index()], data)
    }

    /// Enables `channel` and starts the PWM clock.
    pub fn start(&self, channel: u8) -> Result<(), PeriphError> {
        let channel = PwmChannel::try_from(channel)?;
        debug!("pwm {channel:?}: start");
        self.periph
            .set_bits(regs::PWM_CTL, CTL_PWEN << channel.ctl_shift())?;
        self.periph.clocks().start(ClockId::Pwm)
    }

    /// Disables `channel`. The shared clock keeps running.
    pub fn stop(&self, channel: u8) -> Result<(), PeriphError> {
        let channel = PwmChannel::try_from(channel)?;
        debug!("pwm {channel:?}: stop");
        self.periph
            .clear_bits(regs::PWM_CTL, CTL_PWEN << channel.ctl_shift())?;
        Ok(())
    }

    /// Pushes one word into the FIFO.
    pub fn add_fifo(&self, value: u32) -> Result<(), PeriphError> {
        self.periph.write(regs::PWM_FIF, value)
    }

    /// Discards everything queued in the FIFO.
    pub fn clear_fifo(&self) -> Result<(), PeriphError> {
        self.periph.set_bits(regs::PWM_CTL, CTL_CLRF)?;
        Ok(())
    }

    pub fn fifo_full(&self) -> Result<bool, PeriphError> {
        Ok(self.periph.read(regs::PWM_STA)? & STA_FULL != 0)
    }

    pub fn fifo_empty(&self) -> Result<bool, PeriphError> {
        Ok(self.periph.read(regs::PWM_STA)? & STA_EMPTY != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periph::{
        ClockSource, Peripheral,
        test_support::{sim_page, sim_peripherals, total_writes},
    };

    #[test]
    fn config_bits() {
        assert_eq!(PwmConfig::default().bits(), 0);
        let all = PwmConfig {
            serializer: true,
            ms_mode: true,
            use_fifo: true,
            repeat_last: true,
            idle_high: true,
            reverse_polarity: true,
        };
        assert_eq!(all.bits(), 0xBE);
        let ms = PwmConfig {
            ms_mode: true,
            ..Default::default()
        };
        assert_eq!(ms.bits(), 0x80);
    }

    #[test]
    fn channels_do_not_disturb_each_other() {
        let periph = sim_peripherals();
        let pwm_page = sim_page(&periph, Peripheral::Pwm);
        let fifo = PwmConfig {
            use_fifo: true,
            repeat_last: true,
            ..Default::default()
        };

        pwm_page.poke(0x00, 0xFFFF_FFFF);
        periph.pwm().configure(0, fifo).unwrap();
        assert_eq!(pwm_page.peek(0x00), 0xFFFF_FF24);

        pwm_page.poke(0x00, 0x0000_00FF);
        periph.pwm().configure(1, fifo).unwrap();
        assert_eq!(pwm_page.peek(0x00), 0x0000_24FF);
    }

    #[test]
    fn range_and_data_per_channel() {
        let periph = sim_peripherals();
        let pwm_page = sim_page(&periph, Peripheral::Pwm);
        let pwm = periph.pwm();

        pwm.set_range(0, 1024).unwrap();
        pwm.set_data(0, 512).unwrap();
        pwm.set_range(1, 32).unwrap();
        pwm.set_data(1, 8).unwrap();
        assert_eq!(
            pwm_page.journal().as_slice(),
            &[(0x10, 1024), (0x14, 512), (0x20, 32), (0x24, 8)]
        );
    }

    #[test]
    fn start_enables_channel_and_clock() {
        let periph = sim_peripherals();
        let pwm = periph.pwm();
        pwm.configure_clock(ClockConfig::new(ClockSource::Oscillator, 2).unwrap())
            .unwrap();

        pwm.start(1).unwrap();
        assert_eq!(periph.read(regs::PWM_CTL), Ok(0x100));
        assert_eq!(periph.clocks().is_busy(ClockId::Pwm), Ok(true));

        pwm.stop(1).unwrap();
        assert_eq!(periph.read(regs::PWM_CTL), Ok(0));
        assert_eq!(periph.clocks().is_busy(ClockId::Pwm), Ok(true));
    }

    #[test]
    fn fifo_helpers() {
        let periph = sim_peripherals();
        let pwm_page = sim_page(&periph, Peripheral::Pwm);
        let pwm = periph.pwm();

        pwm_page.poke(0x00, 0x0000_0121);
        pwm.clear_fifo().unwrap();
        assert_eq!(pwm_page.peek(0x00), 0x0000_0161);

        pwm.add_fifo(0xAAAA_5555).unwrap();
        assert_eq!(pwm_page.last_write(), Some((0x18, 0xAAAA_5555)));

        pwm_page.poke(0x04, STA_EMPTY);
        assert_eq!(pwm.fifo_empty(), Ok(true));
        assert_eq!(pwm.fifo_full(), Ok(false));
        pwm_page.poke(0x04, STA_FULL);
        assert_eq!(pwm.fifo_full(), Ok(true));
    }

    #[test]
    fn channel_two_is_rejected() {
        let periph = sim_peripherals();
        let pwm = periph.pwm();
        let err = Err(PeriphError::InvalidArgument(InvalidArgument::Channel(2)));

        assert_eq!(pwm.configure(2, PwmConfig::default()), err);
        assert_eq!(pwm.set_range(2, 1), err);
        assert_eq!(pwm.set_data(2, 1), err);
        assert_eq!(pwm.start(2), err);
        assert_eq!(pwm.stop(2), err);
        assert_eq!(total_writes(&periph), 0);
    }
}
