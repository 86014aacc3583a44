#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Ksuid, KsuidGenerator, Precision, RandSource, Strategy, TimeSource, Timestamp,
    generator::strategy::Variant,
};

/// A KSUID generator bound to a clock, an entropy source and a
/// [`Strategy`].
///
/// Factories are plain values: build one at the composition root and share it
/// by reference. Every strategy is safe to call from many threads; only
/// [`Strategy::Monotonic`] keeps state, guarded by a lock, so two
/// factories never coordinate with each other.
///
/// ## Features
/// - ✅ Thread-safe (`Sync` when the clock and entropy source are)
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered to the second, or finer with a sub-second strategy
/// - ✅ Strictly increasing per factory with [`Strategy::Monotonic`]
///
/// # Example
/// ```
/// use ksuid::{KsuidFactory, Strategy, SystemClock, ThreadRandom};
///
/// let factory = KsuidFactory::new(Strategy::Monotonic, SystemClock, ThreadRandom);
/// let a = factory.create();
/// let b = factory.create();
/// assert!(a < b);
/// ```
pub struct KsuidFactory<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    variant: Variant,
    time: T,
    rng: R,
}

impl<T, R> KsuidFactory<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a factory using `strategy`.
    ///
    /// # Parameters
    /// - `strategy`: how identifiers are derived from an instant
    /// - `time`: A [`TimeSource`] used to retrieve the current instant
    /// - `rng`: A [`RandSource`] used to fill payloads
    pub fn new(strategy: Strategy, time: T, rng: R) -> Self {
        Self {
            variant: Variant::new(strategy),
            time,
            rng,
        }
    }

    /// Creates a factory with a second-resolution time field and fully random
    /// payloads.
    pub fn plain(time: T, rng: R) -> Self {
        Self::new(Strategy::Plain, time, rng)
    }

    /// Creates a factory embedding the given sub-second precision.
    pub fn with_precision(precision: Precision, time: T, rng: R) -> Self {
        Self::new(precision.into(), time, rng)
    }

    /// Creates a factory embedding the finest sub-second precision that `time`
    /// actually produces, as found by [`Precision::detect`].
    ///
    /// Detection runs once, here; the result is fixed for the factory's
    /// lifetime.
    pub fn subsecond(time: T, rng: R) -> Self {
        let precision = Precision::detect(&time);
        Self::with_precision(precision, time, rng)
    }

    /// Creates a factory whose identifiers strictly increase, even when many
    /// are requested within one second or the clock drifts backward slightly.
    pub fn monotonic(time: T, rng: R) -> Self {
        Self::new(Strategy::Monotonic, time, rng)
    }

    /// The strategy this factory was built with.
    pub const fn strategy(&self) -> Strategy {
        self.variant.strategy()
    }

    /// Generates an identifier for the current instant of the factory's clock.
    pub fn create(&self) -> Ksuid {
        self.create_at(self.time.now())
    }

    /// Generates an identifier for `ts`.
    ///
    /// For [`Strategy::Monotonic`] the result also depends on the previous
    /// identifier this factory returned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create_at(&self, ts: Timestamp) -> Ksuid {
        self.variant.generate(ts, &self.rng)
    }
}

#[cfg(feature = "std")]
impl KsuidFactory<crate::SystemClock, crate::ThreadRandom> {
    /// A factory on the system clock and the thread-local CSPRNG.
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self::new(strategy, crate::SystemClock, crate::ThreadRandom)
    }
}

#[cfg(feature = "std")]
impl Default for KsuidFactory<crate::SystemClock, crate::ThreadRandom> {
    fn default() -> Self {
        Self::with_strategy(Strategy::Plain)
    }
}

impl<T, R> core::fmt::Debug for KsuidFactory<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KsuidFactory")
            .field("strategy", &self.strategy())
            .finish_non_exhaustive()
    }
}

impl<T, R> KsuidGenerator for KsuidFactory<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn next_id(&self) -> Ksuid {
        self.create()
    }

    fn next_id_at(&self, ts: Timestamp) -> Ksuid {
        self.create_at(ts)
    }
}
