/// Blocking sleep used between hardware polls and settle delays.
pub trait Delay {
    /// Blocks the calling thread for `secs` seconds plus `nanos` nanoseconds.
    fn sleep(&self, secs: u32, nanos: u32);
}

impl<D: Delay + ?Sized> Delay for &D {
    #[inline]
    fn sleep(&self, secs: u32, nanos: u32) {
        (**self).sleep(secs, nanos)
    }
}

/// [`Delay`] backed by [`std::thread::sleep`].
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn sleep(&self, secs: u32, nanos: u32) {
        std::thread::sleep(core::time::Duration::new(secs.into(), nanos));
    }
}

/// How status flags are polled.
///
/// Between two reads of a flag the caller sleeps for `interval_ns`. With a
/// `limit`, a flag that has not changed after that many reads turns into
/// [`PeriphError::Timeout`](crate::periph::PeriphError::Timeout); without
/// one, polling blocks until the hardware responds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval_ns: u32,
    pub limit: Option<u32>,
}

impl PollPolicy {
    /// Interval used when none is configured.
    pub const DEFAULT_INTERVAL_NS: u32 = 5;

    /// Polls forever with the default interval.
    pub const fn unbounded() -> Self {
        Self {
            interval_ns: Self::DEFAULT_INTERVAL_NS,
            limit: None,
        }
    }

    pub const fn with_interval(mut self, interval_ns: u32) -> Self {
        self.interval_ns = interval_ns;
        self
    }

    /// Gives up after `polls` reads of the flag.
    pub const fn with_limit(mut self, polls: u32) -> Self {
        self.limit = Some(polls);
        self
    }

    /// Returns true once `polls` reads have used up the limit.
    #[inline]
    pub fn exhausted(&self, polls: u32) -> bool {
        self.limit.is_some_and(|limit| polls >= limit)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}
