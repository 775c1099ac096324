//! Test support utilities - only compiled in test builds.

use core::cell::{Cell, RefCell};

use heapless::{Deque, Vec};

use crate::periph::{
    Delay, MappedPage, PAGE_SIZE, PageMapper, Peripheral, Peripherals, PeripheralsBuilder,
    PollPolicy, Soc,
    clock::{CTL_BUSY, CTL_ENAB, PASSWORD},
    spi::{CS_CLEAR, CS_DONE, CS_RXD, CS_STATUS, CS_TA, CS_TXD},
};

/// Number of writes a simulated page remembers.
pub const JOURNAL_LEN: usize = 32;

/// Standard test context: every page simulated, sleeps counted.
pub type TestPeripherals = Peripherals<SimPage, CountingDelay>;

/// Hardware behaviour emulated by a [`SimPage`].
#[derive(Clone, Copy)]
pub enum SimModel {
    /// Plain memory.
    Plain,
    /// Clock manager: password-gated writes, BUSY follows ENAB.
    Clock,
    /// SPI0: loopback through `echo`; with `stalled` the TX FIFO never
    /// reports space.
    ///
    /// Queued TX bytes shift into the RX FIFO when software polls `SPI0_CS`
    /// with TA set. DONE is raised once at least one byte has shifted and the
    /// TX FIFO is empty again.
    Spi { echo: fn(u8) -> u8, stalled: bool },
}

/// One access to the simulated SPI FIFO register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fifo {
    Tx(u8),
    Rx(u8),
}

/// RAM-backed page that records every write.
pub struct SimPage {
    phys_base: u64,
    model: SimModel,
    mem: RefCell<[u8; PAGE_SIZE]>,
    tx: RefCell<Deque<u8, 16>>,
    rx: RefCell<Deque<u8, 16>>,
    shifted: Cell<usize>,
    fifo_trace: RefCell<Deque<Fifo, JOURNAL_LEN>>,
    journal: RefCell<Deque<(usize, u32), JOURNAL_LEN>>,
    writes: Cell<usize>,
}

impl SimPage {
    pub fn new(phys_base: u64, model: SimModel) -> Self {
        Self {
            phys_base,
            model,
            mem: RefCell::new([0; PAGE_SIZE]),
            tx: RefCell::new(Deque::new()),
            rx: RefCell::new(Deque::new()),
            shifted: Cell::new(0),
            fifo_trace: RefCell::new(Deque::new()),
            journal: RefCell::new(Deque::new()),
            writes: Cell::new(0),
        }
    }

    pub fn phys_base(&self) -> u64 {
        self.phys_base
    }

    /// Total number of bus writes, of any width.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// The most recent writes as `(offset, value)`, oldest first.
    pub fn journal(&self) -> Vec<(usize, u32), JOURNAL_LEN> {
        self.journal.borrow().iter().copied().collect()
    }

    pub fn last_write(&self) -> Option<(usize, u32)> {
        self.journal.borrow().back().copied()
    }

    /// Sets a word behind the bus, without journaling or side effects.
    pub fn poke(&self, offset: usize, value: u32) {
        self.mem.borrow_mut()[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Reads a word behind the bus, without side effects.
    pub fn peek(&self, offset: usize) -> u32 {
        let mem = self.mem.borrow();
        let mut word = [0u8; 4];
        word.copy_from_slice(&mem[offset..offset + 4]);
        u32::from_le_bytes(word)
    }

    /// Queues a byte in the simulated SPI receive FIFO.
    pub fn push_rx(&self, byte: u8) {
        self.rx.borrow_mut().push_back(byte).unwrap();
    }

    /// The most recent SPI FIFO accesses, oldest first.
    pub fn fifo_trace(&self) -> Vec<Fifo, JOURNAL_LEN> {
        self.fifo_trace.borrow().iter().copied().collect()
    }

    fn trace(&self, access: Fifo) {
        let mut trace = self.fifo_trace.borrow_mut();
        if trace.is_full() {
            trace.pop_front();
        }
        trace.push_back(access).unwrap();
    }

    fn shift(&self, echo: fn(u8) -> u8) {
        let mut tx = self.tx.borrow_mut();
        let mut rx = self.rx.borrow_mut();
        while let Some(byte) = tx.pop_front() {
            let _ = rx.push_back(echo(byte));
            self.shifted.set(self.shifted.get() + 1);
        }
    }

    fn record(&self, offset: usize, value: u32) {
        self.writes.set(self.writes.get() + 1);
        let mut journal = self.journal.borrow_mut();
        if journal.is_full() {
            journal.pop_front();
        }
        journal.push_back((offset, value)).unwrap();
    }

    fn store(&self, offset: usize, bytes: &[u8]) {
        self.mem.borrow_mut()[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

impl MappedPage for SimPage {
    fn len(&self) -> usize {
        PAGE_SIZE
    }

    fn read_u8(&self, offset: usize) -> u8 {
        self.mem.borrow()[offset]
    }

    fn read_u16(&self, offset: usize) -> u16 {
        let mem = self.mem.borrow();
        u16::from_le_bytes([mem[offset], mem[offset + 1]])
    }

    fn read_u32(&self, offset: usize) -> u32 {
        match self.model {
            SimModel::Spi { echo, stalled } if offset == 0x00 => {
                let cs = self.peek(0x00);
                let active = cs & CS_TA != 0;
                if active {
                    self.shift(echo);
                }

                let tx_empty = self.tx.borrow().is_empty();
                let mut status = 0;
                if !stalled && !self.tx.borrow().is_full() {
                    status |= CS_TXD;
                }
                if !self.rx.borrow().is_empty() {
                    status |= CS_RXD;
                }
                if active && tx_empty && self.shifted.get() > 0 {
                    status |= CS_DONE;
                }
                cs | status
            }
            SimModel::Spi { .. } if offset == 0x04 => {
                let byte = self.rx.borrow_mut().pop_front().unwrap_or(0);
                self.trace(Fifo::Rx(byte));
                byte as u32
            }
            _ => self.peek(offset),
        }
    }

    fn write_u8(&self, offset: usize, value: u8) {
        self.record(offset, value as u32);
        self.store(offset, &[value]);
    }

    fn write_u16(&self, offset: usize, value: u16) {
        self.record(offset, value as u32);
        self.store(offset, &value.to_le_bytes());
    }

    fn write_u32(&self, offset: usize, value: u32) {
        self.record(offset, value);
        match self.model {
            SimModel::Plain => self.poke(offset, value),
            SimModel::Clock => {
                if value & 0xFF00_0000 != PASSWORD {
                    return;
                }
                let mut stored = value & 0x00FF_FFFF;
                // control registers sit on 8-byte boundaries, divisors after them
                if offset % 8 == 0 {
                    stored &= !CTL_BUSY;
                    if stored & CTL_ENAB != 0 {
                        stored |= CTL_BUSY;
                    }
                }
                self.poke(offset, stored);
            }
            SimModel::Spi { .. } => match offset {
                0x00 => {
                    if value & CS_CLEAR != 0 {
                        self.tx.borrow_mut().clear();
                        self.rx.borrow_mut().clear();
                    }
                    if value & CS_TA != 0 && self.peek(0x00) & CS_TA == 0 {
                        self.shifted.set(0);
                    }
                    self.poke(0x00, value & !(CS_CLEAR | CS_STATUS));
                }
                0x04 => {
                    if self.peek(0x00) & CS_TA != 0 {
                        let byte = value as u8;
                        if self.tx.borrow_mut().push_back(byte).is_ok() {
                            self.trace(Fifo::Tx(byte));
                        }
                    }
                }
                _ => self.poke(offset, value),
            },
        }
    }
}

#[derive(Debug)]
pub enum SimMapError {
    UnknownAddress(u64),
    Refused(Peripheral),
}

/// Mapper handing out [`SimPage`]s for the peripheral window of one SoC.
pub struct SimMapper {
    base: u64,
    failing: Option<Peripheral>,
    echo: fn(u8) -> u8,
    stalled: bool,
    mapped: usize,
    unmapped: usize,
}

fn identity(byte: u8) -> u8 {
    byte
}

impl SimMapper {
    pub fn new() -> Self {
        Self::for_soc(Soc::default())
    }

    pub fn for_soc(soc: Soc) -> Self {
        Self {
            base: soc.peripheral_base(),
            failing: None,
            echo: identity,
            stalled: false,
            mapped: 0,
            unmapped: 0,
        }
    }

    /// Refuses to map the page of `peripheral`.
    pub fn failing(mut self, peripheral: Peripheral) -> Self {
        self.failing = Some(peripheral);
        self
    }

    pub fn spi_echo(mut self, echo: fn(u8) -> u8) -> Self {
        self.echo = echo;
        self
    }

    pub fn spi_stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    pub fn mapped(&self) -> usize {
        self.mapped
    }

    pub fn unmapped(&self) -> usize {
        self.unmapped
    }
}

impl PageMapper for SimMapper {
    type Page = SimPage;
    type Error = SimMapError;

    fn map(&mut self, phys_base: u64, len: usize) -> Result<SimPage, SimMapError> {
        assert_eq!(len, PAGE_SIZE);
        let peripheral = Peripheral::ALL
            .into_iter()
            .find(|p| self.base + p.offset() == phys_base)
            .ok_or(SimMapError::UnknownAddress(phys_base))?;
        if self.failing == Some(peripheral) {
            return Err(SimMapError::Refused(peripheral));
        }

        let model = match peripheral {
            Peripheral::Clock => SimModel::Clock,
            Peripheral::Spi0 => SimModel::Spi {
                echo: self.echo,
                stalled: self.stalled,
            },
            _ => SimModel::Plain,
        };
        self.mapped += 1;
        Ok(SimPage::new(phys_base, model))
    }

    fn unmap(&mut self, _page: SimPage) {
        self.unmapped += 1;
    }
}

/// Delay that only counts how often and how long it was asked to sleep.
#[derive(Default)]
pub struct CountingDelay {
    sleeps: Cell<u32>,
    slept_ns: Cell<u64>,
}

impl CountingDelay {
    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }

    pub fn slept_ns(&self) -> u64 {
        self.slept_ns.get()
    }
}

impl Delay for CountingDelay {
    fn sleep(&self, secs: u32, nanos: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.slept_ns
            .set(self.slept_ns.get() + secs as u64 * 1_000_000_000 + nanos as u64);
    }
}

/// Helper to open a fully simulated context with default polling.
pub fn sim_peripherals() -> TestPeripherals {
    sim_peripherals_with(&mut SimMapper::new(), PollPolicy::default())
}

pub fn sim_peripherals_with(mapper: &mut SimMapper, poll: PollPolicy) -> TestPeripherals {
    PeripheralsBuilder::new()
        .poll_policy(poll)
        .delay(CountingDelay::default())
        .open(mapper)
}

/// The simulated page of `peripheral`. Panics if it is not mapped.
pub fn sim_page(periph: &TestPeripherals, peripheral: Peripheral) -> &SimPage {
    periph.page(peripheral).unwrap()
}

/// Writes issued to all pages together.
pub fn total_writes(periph: &TestPeripherals) -> usize {
    Peripheral::ALL
        .into_iter()
        .filter_map(|p| periph.page(p).ok())
        .map(SimPage::writes)
        .sum()
}
