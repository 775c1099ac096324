//! Register catalogue of the mapped peripherals.
//!
//! Offsets are relative to each peripheral's page and follow the BCM2835
//! ARM Peripherals datasheet.

mod macros;

use self::macros::{banked, clock_pairs, registers};
use crate::periph::{Peripheral, Register};

registers!(Timer {
    TMR_LOAD = 0x400,
    TMR_VALUE = 0x404,
    TMR_CONTROL = 0x408,
    TMR_IRQ_CLEAR = 0x40C,
    TMR_RAW_IRQ = 0x410,
    TMR_MASKED_IRQ = 0x414,
    TMR_RELOAD = 0x418,
    TMR_PREDIVIDER = 0x41C,
    TMR_FREE_RUNNING = 0x420,
});

clock_pairs!(GP0 = 0x70, GP1 = 0x78, GP2 = 0x80, PWM = 0xA0);

registers!(Gpio {
    /// Function select, pins 0..=9.
    GPFSEL0 = 0x00,
    /// Function select, pins 10..=19.
    GPFSEL1 = 0x04,
    /// Function select, pins 20..=29.
    GPFSEL2 = 0x08,
    /// Function select, pins 30..=39.
    GPFSEL3 = 0x0C,
    /// Function select, pins 40..=49.
    GPFSEL4 = 0x10,
    /// Function select, pins 50..=53.
    GPFSEL5 = 0x14,
    /// Pull-up/down control.
    GPPUD = 0x94,
});

/// Function select registers, ten pins each.
pub const GPFSEL: [Register; 6] = [GPFSEL0, GPFSEL1, GPFSEL2, GPFSEL3, GPFSEL4, GPFSEL5];

banked!(Gpio {
    /// Output set.
    GPSET = [0x1C, 0x20],
    /// Output clear.
    GPCLR = [0x28, 0x2C],
    /// Pin level.
    GPLEV = [0x34, 0x38],
    /// Event detect status.
    GPEDS = [0x40, 0x44],
    /// Rising edge detect enable.
    GPREN = [0x4C, 0x50],
    /// Falling edge detect enable.
    GPFEN = [0x58, 0x5C],
    /// High detect enable.
    GPHEN = [0x64, 0x68],
    /// Low detect enable.
    GPLEN = [0x70, 0x74],
    /// Async rising edge detect.
    GPAREN = [0x7C, 0x80],
    /// Async falling edge detect.
    GPAFEN = [0x88, 0x8C],
    /// Pull-up/down clock.
    GPPUDCLK = [0x98, 0x9C],
});

registers!(Pcm {
    PCM_CS = 0x00,
    PCM_FIFO = 0x04,
    PCM_MODE = 0x08,
    PCM_RXC = 0x0C,
    PCM_TXC = 0x10,
    PCM_DREQ = 0x14,
    PCM_INTEN = 0x18,
    PCM_INTSTC = 0x1C,
    PCM_GRAY = 0x20,
});

registers!(Pwm {
    /// Control, channel 0 in bits 0..=7 and channel 1 in bits 8..=15.
    PWM_CTL = 0x00,
    /// Status.
    PWM_STA = 0x04,
    /// DMA configuration.
    PWM_DMAC = 0x08,
    PWM_RNG0 = 0x10,
    PWM_DAT0 = 0x14,
    /// FIFO input.
    PWM_FIF = 0x18,
    PWM_RNG1 = 0x20,
    PWM_DAT1 = 0x24,
});

/// Range registers indexed by channel.
pub const PWM_RNG: [Register; 2] = [PWM_RNG0, PWM_RNG1];
/// Data registers indexed by channel.
pub const PWM_DAT: [Register; 2] = [PWM_DAT0, PWM_DAT1];

registers!(Spi0 {
    /// Control and status.
    SPI0_CS = 0x00,
    /// TX and RX FIFOs.
    SPI0_FIFO = 0x04,
    /// Clock divider.
    SPI0_CLK = 0x08,
    /// Data length (DMA mode).
    SPI0_DLEN = 0x0C,
    /// LoSSI output hold delay.
    SPI0_LTOH = 0x10,
    /// DMA DREQ controls.
    SPI0_DC = 0x14,
});
