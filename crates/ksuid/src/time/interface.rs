/// Nanoseconds per second.
pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// An instant as whole Unix seconds plus a sub-second nanosecond component.
///
/// `nanos` is always below [`NANOS_PER_SEC`]; the constructor carries any
/// excess into `seconds`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    /// Builds a timestamp, carrying whole seconds out of `nanos`.
    #[must_use]
    pub const fn new(seconds: i64, nanos: u32) -> Self {
        Self {
            seconds: seconds.wrapping_add((nanos / NANOS_PER_SEC) as i64),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// An instant on a whole second.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Whole seconds since the Unix epoch (negative before 1970).
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds within the second, in `0..1_000_000_000`.
    #[must_use]
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Milliseconds within the second.
    #[must_use]
    pub const fn millis(&self) -> u32 {
        self.nanos / 1_000_000
    }

    /// Microseconds within the second.
    #[must_use]
    pub const fn micros(&self) -> u32 {
        self.nanos / 1_000
    }
}

/// A trait for clocks that report the current wall-clock instant.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests.
///
/// # Example
///
/// ```
/// use ksuid::{TimeSource, Timestamp};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> Timestamp {
///         Timestamp::new(1_700_000_000, 250_000_000)
///     }
/// }
///
/// assert_eq!(FixedTime.now().millis(), 250);
/// ```
pub trait TimeSource {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}
