use crate::periph::{InvalidArgument, PeriphError};

macro_rules! functions {
    ($($(#[$meta:meta])* $name:ident = $id:literal),* $(,)?) => {
        /// Abstract role a GPIO pin can be multiplexed to.
        ///
        /// The numeric identifier is stable and independent of the pin; the
        /// hardware code for a given pin comes from the pin's
        /// [`PinTable`](crate::periph::PinTable) row.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Function {
            $($(#[$meta])* $name = $id,)*
        }

        impl Function {
            /// Every function, ordered by identifier.
            pub const ALL: &'static [Function] = &[$(Function::$name,)*];

            /// Looks up a function by identifier.
            ///
            /// # Errors
            /// * [`PeriphError::InvalidArgument`] - if `id` is above [`Function::MAX_ID`]
            pub const fn from_id(id: u8) -> Result<Self, PeriphError> {
                match id {
                    $($id => Ok(Function::$name),)*
                    _ => Err(PeriphError::InvalidArgument(InvalidArgument::Function(id))),
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Function::$name => stringify!($name),)*
                }
            }
        }
    };
}

functions! {
    DigitalIn = 0,
    DigitalOut = 1,

    // Broadcom serial controller (I2C)
    Sda0 = 2,
    Scl0 = 3,
    Sda1 = 4,
    Scl1 = 5,

    GpClk0 = 6,
    GpClk1 = 7,
    GpClk2 = 8,

    Spi0Ce0 = 9,
    Spi0Ce1 = 10,
    Spi0Miso = 11,
    Spi0Mosi = 12,
    Spi0Sclk = 13,
    Spi1Ce0 = 14,
    Spi1Ce1 = 15,
    Spi1Miso = 16,
    Spi1Mosi = 17,
    Spi1Sclk = 18,
    Spi2Ce0 = 19,
    Spi2Ce1 = 20,
    Spi2Ce2 = 21,
    Spi2Miso = 22,
    Spi2Mosi = 23,
    Spi2Sclk = 24,

    Pwm0 = 25,
    Pwm1 = 26,

    Txd0 = 27,
    Rxd0 = 28,
    Cts0 = 29,
    Rts0 = 30,
    Txd1 = 31,
    Rxd1 = 32,
    Cts1 = 33,
    Rts1 = 34,

    PcmClk = 35,
    PcmFs = 36,
    PcmDin = 37,
    PcmDout = 38,

    // secondary memory interface
    Sa0 = 39,
    Sa1 = 40,
    Sa2 = 41,
    Sa3 = 42,
    Sa4 = 43,
    Sa5 = 44,
    Sd0 = 45,
    Sd1 = 46,
    Sd2 = 47,
    Sd3 = 48,
    Sd4 = 49,
    Sd5 = 50,
    Sd6 = 51,
    Sd7 = 52,
    Sd8 = 53,
    Sd9 = 54,
    Sd10 = 55,
    Sd11 = 56,
    Sd12 = 57,
    Sd13 = 58,
    Sd14 = 59,
    Sd15 = 60,
    Sd16 = 61,
    Sd17 = 62,
    SoeSe = 63,
    SweSrw = 64,

    // BSC / SPI slave
    BscslSdaMosi = 65,
    BscslSclSclk = 66,
    BscslMiso = 67,
    BscslCe = 68,

    Sd1Clk = 69,
    Sd1Cmd = 70,
    Sd1Dat0 = 71,
    Sd1Dat1 = 72,
    Sd1Dat2 = 73,
    Sd1Dat3 = 74,

    // JTAG
    ArmTrst = 75,
    ArmRtck = 76,
    ArmTdo = 77,
    ArmTck = 78,
    ArmTdi = 79,
    ArmTms = 80,
}

impl Function {
    /// Highest valid function identifier.
    pub const MAX_ID: u8 = 80;

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Function {
    type Error = PeriphError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Function::from_id(id)
    }
}

/// Multiplexer setting of a pin, in function-table slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AltFunction {
    Input,
    Output,
    Alt0,
    Alt1,
    Alt2,
    Alt3,
    Alt4,
    Alt5,
}

impl AltFunction {
    /// Settings indexed by function-table slot.
    pub const SLOTS: [AltFunction; 8] = [
        AltFunction::Input,
        AltFunction::Output,
        AltFunction::Alt0,
        AltFunction::Alt1,
        AltFunction::Alt2,
        AltFunction::Alt3,
        AltFunction::Alt4,
        AltFunction::Alt5,
    ];

    /// 3-bit `GPFSELn` code.
    pub const fn code(self) -> u32 {
        match self {
            AltFunction::Input => 0b000,
            AltFunction::Output => 0b001,
            AltFunction::Alt0 => 0b100,
            AltFunction::Alt1 => 0b101,
            AltFunction::Alt2 => 0b110,
            AltFunction::Alt3 => 0b111,
            AltFunction::Alt4 => 0b011,
            AltFunction::Alt5 => 0b010,
        }
    }

    /// Decodes a 3-bit `GPFSELn` field. Only the low three bits are used.
    pub const fn from_code(code: u32) -> Self {
        match code & 0b111 {
            0b000 => AltFunction::Input,
            0b001 => AltFunction::Output,
            0b100 => AltFunction::Alt0,
            0b101 => AltFunction::Alt1,
            0b110 => AltFunction::Alt2,
            0b111 => AltFunction::Alt3,
            0b011 => AltFunction::Alt4,
            _ => AltFunction::Alt5,
        }
    }

    /// Position in a function-table row.
    #[inline]
    pub const fn slot(self) -> usize {
        self as usize
    }
}
