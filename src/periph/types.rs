/// Size of one mapped peripheral window in bytes.
pub const PAGE_SIZE: usize = 4096;

/// Number of peripheral pages held by a [`Peripherals`](crate::periph::Peripherals) context.
pub const PERIPHERAL_COUNT: usize = 6;

/// A peripheral block that gets its own mapped page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peripheral {
    /// ARM timer.
    Timer,
    /// Clock manager (general purpose and PWM clocks).
    Clock,
    /// GPIO controller.
    Gpio,
    /// PCM / I2S audio.
    Pcm,
    /// Pulse width modulator.
    Pwm,
    /// SPI0 master.
    Spi0,
}

impl Peripheral {
    /// All peripherals, in page slot order.
    pub const ALL: [Peripheral; PERIPHERAL_COUNT] = [
        Peripheral::Timer,
        Peripheral::Clock,
        Peripheral::Gpio,
        Peripheral::Pcm,
        Peripheral::Pwm,
        Peripheral::Spi0,
    ];

    /// Offset of the peripheral block from the SoC peripheral base.
    pub const fn offset(self) -> u64 {
        match self {
            Peripheral::Timer => 0x0000_B000,
            Peripheral::Clock => 0x0010_1000,
            Peripheral::Gpio => 0x0020_0000,
            Peripheral::Pcm => 0x0020_3000,
            Peripheral::Pwm => 0x0020_C000,
            Peripheral::Spi0 => 0x0020_4000,
        }
    }

    /// Page slot of this peripheral.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Peripheral::Timer => "timer",
            Peripheral::Clock => "clock",
            Peripheral::Gpio => "gpio",
            Peripheral::Pcm => "pcm",
            Peripheral::Pwm => "pwm",
            Peripheral::Spi0 => "spi0",
        }
    }
}

impl core::fmt::Display for Peripheral {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// SoC family, selecting the physical peripheral base address.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Soc {
    /// Raspberry Pi 1 and Zero.
    #[default]
    Bcm2835,
    /// Raspberry Pi 2.
    Bcm2836,
    /// Raspberry Pi 3.
    Bcm2837,
    /// Raspberry Pi 4.
    Bcm2711,
}

impl Soc {
    /// ARM physical address of the peripheral window.
    pub const fn peripheral_base(self) -> u64 {
        match self {
            Soc::Bcm2835 => 0x2000_0000,
            Soc::Bcm2836 | Soc::Bcm2837 => 0x3F00_0000,
            Soc::Bcm2711 => 0xFE00_0000,
        }
    }
}

/// Access width of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    U8,
    U16,
    U32,
}

impl Width {
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            Width::U8 => 1,
            Width::U16 => 2,
            Width::U32 => 4,
        }
    }
}

/// A mapped window of peripheral address space.
///
/// Every call must reach the hardware: implementations may not cache,
/// merge or reorder accesses. Values are little-endian. Offsets are
/// validated by the register map before they get here.
pub trait MappedPage {
    /// Length of the window in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_u8(&self, offset: usize) -> u8;
    fn read_u16(&self, offset: usize) -> u16;
    fn read_u32(&self, offset: usize) -> u32;

    fn write_u8(&self, offset: usize, value: u8);
    fn write_u16(&self, offset: usize, value: u16);
    fn write_u32(&self, offset: usize, value: u32);
}

/// Maps pages of physical address space.
///
/// Implemented by the process bootstrap (for example
/// [`DevMem`](crate::periph::DevMem) over `/dev/mem`) and by simulators.
pub trait PageMapper {
    /// The page type handed to the register map.
    type Page: MappedPage;
    /// Why a mapping failed. Logged, then reported as
    /// [`PeriphError::MapUnavailable`](crate::periph::PeriphError::MapUnavailable).
    type Error: core::fmt::Debug;

    /// Maps `len` bytes starting at physical address `phys_base`.
    fn map(&mut self, phys_base: u64, len: usize) -> Result<Self::Page, Self::Error>;

    /// Releases a page obtained from [`map`](Self::map).
    fn unmap(&mut self, page: Self::Page);
}
