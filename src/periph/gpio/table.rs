use bitmaps::Bitmap;

use crate::periph::{
    AltFunction, Function, PeriphError,
    helpers::{PIN_COUNT, check_pin},
};

/// One row of the function table: the function reachable in each slot.
pub type FunctionRow = [Option<Function>; 8];

macro_rules! slot {
    (_) => {
        None
    };
    ($function:ident) => {
        Some(Function::$function)
    };
}

macro_rules! row {
    ($($slot:tt),* $(,)?) => {
        [$(slot!($slot)),*]
    };
}

#[rustfmt::skip]
static FUNCTIONS: [FunctionRow; PIN_COUNT] = [
    //   input      output      alt0      alt1    alt2     alt3          alt4      alt5
    row![DigitalIn, DigitalOut, Sda0,     Sa5,    _,       _,            _,        _],       // 0
    row![DigitalIn, DigitalOut, Scl0,     Sa4,    _,       _,            _,        _],       // 1
    row![DigitalIn, DigitalOut, Sda1,     Sa3,    _,       _,            _,        _],       // 2
    row![DigitalIn, DigitalOut, Scl1,     Sa2,    _,       _,            _,        _],       // 3
    row![DigitalIn, DigitalOut, GpClk0,   Sa1,    _,       _,            _,        ArmTdi],  // 4
    row![DigitalIn, DigitalOut, GpClk1,   Sa0,    _,       _,            _,        ArmTdo],  // 5
    row![DigitalIn, DigitalOut, GpClk2,   SoeSe,  _,       _,            _,        ArmRtck], // 6
    row![DigitalIn, DigitalOut, Spi0Ce1,  SweSrw, _,       _,            _,        _],       // 7
    row![DigitalIn, DigitalOut, Spi0Ce0,  Sd0,    _,       _,            _,        _],       // 8
    row![DigitalIn, DigitalOut, Spi0Miso, Sd1,    _,       _,            _,        _],       // 9
    row![DigitalIn, DigitalOut, Spi0Mosi, Sd2,    _,       _,            _,        _],       // 10
    row![DigitalIn, DigitalOut, Spi0Sclk, Sd3,    _,       _,            _,        _],       // 11
    row![DigitalIn, DigitalOut, Pwm0,     Sd4,    _,       _,            _,        ArmTms],  // 12
    row![DigitalIn, DigitalOut, Pwm1,     Sd5,    _,       _,            _,        ArmTck],  // 13
    row![DigitalIn, DigitalOut, Txd0,     Sd6,    _,       _,            _,        Txd1],    // 14
    row![DigitalIn, DigitalOut, Rxd0,     Sd7,    _,       _,            _,        Rxd1],    // 15
    row![DigitalIn, DigitalOut, _,        Sd8,    _,       Cts0,         _,        Cts1],    // 16
    row![DigitalIn, DigitalOut, _,        Sd9,    _,       Rts0,         _,        Rts1],    // 17
    row![DigitalIn, DigitalOut, PcmClk,   Sd10,   _,       BscslSdaMosi, Spi1Ce0,  Pwm0],    // 18
    row![DigitalIn, DigitalOut, PcmFs,    Sd11,   _,       BscslSclSclk, Spi1Miso, Pwm1],    // 19
    row![DigitalIn, DigitalOut, PcmDin,   Sd12,   _,       BscslMiso,    Spi1Mosi, GpClk0],  // 20
    row![DigitalIn, DigitalOut, PcmDout,  Sd13,   _,       BscslCe,      Spi1Sclk, GpClk1],  // 21
    row![DigitalIn, DigitalOut, _,        Sd14,   _,       Sd1Clk,       ArmTrst,  _],       // 22
    row![DigitalIn, DigitalOut, _,        Sd15,   _,       Sd1Cmd,       ArmRtck,  _],       // 23
    row![DigitalIn, DigitalOut, _,        Sd16,   _,       Sd1Dat0,      ArmTdo,   _],       // 24
    row![DigitalIn, DigitalOut, _,        Sd17,   _,       Sd1Dat1,      ArmTck,   _],       // 25
    row![DigitalIn, DigitalOut, _,        _,      _,       Sd1Dat2,      ArmTdi,   _],       // 26
    row![DigitalIn, DigitalOut, _,        _,      _,       Sd1Dat3,      ArmTms,   _],       // 27
    row![DigitalIn, DigitalOut, Sda0,     Sa5,    PcmClk,  _,            _,        _],       // 28
    row![DigitalIn, DigitalOut, Scl0,     Sa4,    PcmFs,   _,            _,        _],       // 29
    row![DigitalIn, DigitalOut, _,        Sa3,    PcmDin,  Cts0,         _,        Cts1],    // 30
    row![DigitalIn, DigitalOut, _,        Sa2,    PcmDout, Rts0,         _,        Rts1],    // 31
    row![DigitalIn, DigitalOut, GpClk0,   Sa1,    _,       Txd0,         _,        Txd1],    // 32
    row![DigitalIn, DigitalOut, _,        Sa0,    _,       Rxd0,         _,        Rxd1],    // 33
    row![DigitalIn, DigitalOut, GpClk0,   SoeSe,  _,       _,            _,        _],       // 34
    row![DigitalIn, DigitalOut, Spi0Ce1,  SweSrw, _,       _,            _,        _],       // 35
    row![DigitalIn, DigitalOut, Spi0Ce0,  Sd0,    Txd0,    _,            _,        _],       // 36
    row![DigitalIn, DigitalOut, Spi0Miso, Sd1,    Rxd0,    _,            _,        _],       // 37
    row![DigitalIn, DigitalOut, Spi0Mosi, Sd2,    Rts0,    _,            _,        _],       // 38
    row![DigitalIn, DigitalOut, Spi0Sclk, Sd3,    Cts0,    _,            _,        _],       // 39
    row![DigitalIn, DigitalOut, Pwm0,     Sd4,    _,       _,            Spi2Miso, Txd1],    // 40
    row![DigitalIn, DigitalOut, Pwm1,     Sd5,    _,       _,            Spi2Mosi, Rxd1],    // 41
    row![DigitalIn, DigitalOut, GpClk1,   Sd6,    _,       _,            Spi2Sclk, Rts1],    // 42
    row![DigitalIn, DigitalOut, GpClk2,   Sd7,    _,       _,            Spi2Ce0,  Cts1],    // 43
    row![DigitalIn, DigitalOut, GpClk1,   Sda0,   Sda1,    _,            Spi2Ce1,  _],       // 44
    row![DigitalIn, DigitalOut, Pwm1,     Scl0,   Scl1,    _,            Spi2Ce2,  _],       // 45
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 46
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 47
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 48
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 49
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 50
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 51
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 52
    row![DigitalIn, DigitalOut, _,        _,      _,       _,            _,        _],       // 53
];

/// Pins brought out on the 26-pin header of the Raspberry Pi model B.
const HEADER_PINS: [u8; 17] = [0, 1, 4, 7, 8, 9, 10, 11, 14, 15, 17, 18, 21, 22, 23, 24, 25];

/// Per-pin function table and header accessibility.
///
/// Built once when the [`Peripherals`](crate::periph::Peripherals) context
/// opens and never modified afterwards.
#[derive(Debug, Clone)]
pub struct PinTable {
    accessible: Bitmap<PIN_COUNT>,
}

impl PinTable {
    pub fn new() -> Self {
        let mut accessible = Bitmap::new();
        for pin in HEADER_PINS {
            accessible.set(pin as usize, true);
        }
        Self { accessible }
    }

    /// The function row of a pin.
    pub fn row(&self, pin: u8) -> Result<&'static FunctionRow, PeriphError> {
        let pin = check_pin(pin)?;
        Ok(&FUNCTIONS[pin as usize])
    }

    /// Which multiplexer setting routes `function` to `pin`, if any.
    pub fn slot_of(&self, pin: u8, function: Function) -> Result<Option<AltFunction>, PeriphError> {
        let row = self.row(pin)?;
        Ok(row
            .iter()
            .position(|slot| *slot == Some(function))
            .map(|slot| AltFunction::SLOTS[slot]))
    }

    /// Returns true if `pin` is brought out on the header.
    pub fn is_accessible(&self, pin: u8) -> Result<bool, PeriphError> {
        let pin = check_pin(pin)?;
        Ok(self.accessible.get(pin as usize))
    }

    /// Calls `f` with every header pin, in ascending order.
    pub fn for_each_accessible(&self, mut f: impl FnMut(u8)) {
        let mut idx = self.accessible.first_index();
        while let Some(pin) = idx {
            f(pin as u8);
            idx = self.accessible.next_index(pin);
        }
    }
}

impl Default for PinTable {
    fn default() -> Self {
        Self::new()
    }
}
