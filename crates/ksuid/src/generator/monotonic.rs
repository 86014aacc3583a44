use crate::{
    Ksuid, PAYLOAD_BYTES, RandSource,
    generator::mutex::{Mutex, lock},
};

/// Backward clock movement, in seconds, absorbed by the monotonic strategy.
///
/// Within this window the time field is frozen and the payload incremented;
/// a larger drop is treated as a clock reset.
pub const DRIFT_TOLERANCE: i64 = 10;

#[cfg(feature = "cache-padded")]
type Slot = crossbeam_utils::CachePadded<Mutex<Option<Ksuid>>>;
#[cfg(not(feature = "cache-padded"))]
type Slot = Mutex<Option<Ksuid>>;

/// The last identifier handed out by a monotonic factory.
pub(crate) struct MonotonicState {
    last: Slot,
}

impl MonotonicState {
    pub(crate) fn new() -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            last: crossbeam_utils::CachePadded::new(Mutex::new(None)),
            #[cfg(not(feature = "cache-padded"))]
            last: Mutex::new(None),
        }
    }

    fn slot(&self) -> &Mutex<Option<Ksuid>> {
        &self.last
    }

    /// Produces the identifier following the last one for a clock reading of
    /// `seconds`.
    ///
    /// The whole read-decide-write cycle runs under the lock, so concurrent
    /// callers never derive their value from the same predecessor.
    pub(crate) fn next<R>(&self, seconds: i64, rng: &R) -> Ksuid
    where
        R: RandSource,
    {
        let mut last = lock(self.slot());
        let next = match *last {
            Some(prev) => Self::advance(prev, seconds, rng),
            None => Ksuid::from_parts(seconds, rng.payload()),
        };
        *last = Some(next);
        next
    }

    fn advance<R>(prev: Ksuid, seconds: i64, rng: &R) -> Ksuid
    where
        R: RandSource,
    {
        let delta = Self::delta(prev, seconds);
        if delta > 0 {
            return Ksuid::from_parts(seconds, rng.payload());
        }
        if delta > -DRIFT_TOLERANCE {
            #[cfg(feature = "tracing")]
            if delta < 0 {
                tracing::trace!(delta, "absorbing backward clock drift");
            }
            return prev.increment();
        }
        Self::cold_clock_reset(seconds, delta, rng)
    }

    /// Signed distance from `prev` to `seconds`, measured on the wrapped
    /// 32-bit time field so readings outside the representable window still
    /// compare equal to themselves.
    fn delta(prev: Ksuid, seconds: i64) -> i64 {
        let time = Ksuid::from_parts(seconds, [0; PAYLOAD_BYTES]).time();
        i64::from(time.wrapping_sub(prev.time()) as i32)
    }

    #[cold]
    #[inline(never)]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn cold_clock_reset<R>(seconds: i64, delta: i64, rng: &R) -> Ksuid
    where
        R: RandSource,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            delta,
            tolerance = DRIFT_TOLERANCE,
            "clock moved backward beyond tolerance, resetting"
        );
        Ksuid::from_parts(seconds, rng.payload())
    }
}
