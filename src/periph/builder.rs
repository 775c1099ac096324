use core::marker::PhantomData;

use crate::periph::{Delay, PageMapper, Peripherals, PollPolicy, Soc};

// Builder states
pub struct NeedDelay;
pub struct Ready;

/// Configures and opens a [`Peripherals`] context.
///
/// The timing primitive is mandatory, so [`open`](PeripheralsBuilder::open)
/// only exists once [`delay`](PeripheralsBuilder::delay) has been called.
/// Everything else has a default: BCM2835 base address and unbounded
/// polling every 5 ns.
///
/// ```
/// use bcm_periph::periph::{PeripheralsBuilder, Soc};
///
/// let builder = PeripheralsBuilder::new().soc(Soc::Bcm2837).poll_limit(1_000);
/// # let _ = builder;
/// ```
pub struct PeripheralsBuilder<D, State> {
    base: u64,
    poll: PollPolicy,
    delay: D,
    _phantom: PhantomData<State>,
}

// Start the builder
impl PeripheralsBuilder<(), NeedDelay> {
    pub fn new() -> Self {
        PeripheralsBuilder {
            base: Soc::default().peripheral_base(),
            poll: PollPolicy::default(),
            delay: (),
            _phantom: PhantomData,
        }
    }
}

impl Default for PeripheralsBuilder<(), NeedDelay> {
    fn default() -> Self {
        Self::new()
    }
}

// Settings accepted in every state
impl<D, State> PeripheralsBuilder<D, State> {
    /// Selects the peripheral base address of a SoC family.
    pub fn soc(self, soc: Soc) -> Self {
        self.peripheral_base(soc.peripheral_base())
    }

    /// Uses a raw physical peripheral base address.
    pub fn peripheral_base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Time slept between two reads of a status flag.
    pub fn poll_interval_ns(mut self, interval_ns: u32) -> Self {
        self.poll = self.poll.with_interval(interval_ns);
        self
    }

    /// Gives up on a status flag after `polls` reads.
    pub fn poll_limit(mut self, polls: u32) -> Self {
        self.poll = self.poll.with_limit(polls);
        self
    }

    pub fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll = policy;
        self
    }
}

// Set the timing primitive
impl PeripheralsBuilder<(), NeedDelay> {
    pub fn delay<D: Delay>(self, delay: D) -> PeripheralsBuilder<D, Ready> {
        PeripheralsBuilder {
            base: self.base,
            poll: self.poll,
            delay,
            _phantom: PhantomData,
        }
    }

    /// Sleeps with [`std::thread::sleep`].
    #[cfg(feature = "std")]
    pub fn std_delay(self) -> PeripheralsBuilder<crate::periph::StdDelay, Ready> {
        self.delay(crate::periph::StdDelay)
    }
}

// Open the context
impl<D: Delay> PeripheralsBuilder<D, Ready> {
    /// Maps every peripheral page through `mapper`.
    ///
    /// A page that fails to map is logged and left out; registers on it
    /// report [`PeriphError::MapUnavailable`](crate::periph::PeriphError::MapUnavailable).
    pub fn open<M: PageMapper>(self, mapper: &mut M) -> Peripherals<M::Page, D> {
        Peripherals::open(mapper, self.base, self.delay, self.poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periph::{
        Peripheral,
        test_support::{CountingDelay, SimMapper},
    };

    #[test]
    fn defaults() {
        let mut mapper = SimMapper::new();
        let periph = PeripheralsBuilder::new()
            .delay(CountingDelay::default())
            .open(&mut mapper);

        assert_eq!(periph.peripheral_base(), 0x2000_0000);
        assert_eq!(periph.poll_policy(), PollPolicy::unbounded());
        assert_eq!(mapper.mapped(), 6);
    }

    #[test]
    fn soc_and_polling() {
        let mut mapper = SimMapper::for_soc(Soc::Bcm2711);
        let periph = PeripheralsBuilder::new()
            .soc(Soc::Bcm2711)
            .poll_interval_ns(50)
            .delay(CountingDelay::default())
            .poll_limit(10)
            .open(&mut mapper);

        assert_eq!(periph.peripheral_base(), 0xFE00_0000);
        assert_eq!(
            periph.poll_policy(),
            PollPolicy {
                interval_ns: 50,
                limit: Some(10)
            }
        );
        assert!(periph.is_mapped(Peripheral::Spi0));
    }

    #[test]
    fn raw_base() {
        let mut mapper = SimMapper::new();
        let periph = PeripheralsBuilder::new()
            .peripheral_base(0x3F00_0000)
            .delay(CountingDelay::default())
            .open(&mut mapper);

        // the mapper only recognises the BCM2835 window
        assert_eq!(periph.peripheral_base(), 0x3F00_0000);
        assert!(!periph.is_mapped(Peripheral::Gpio));
    }
}
