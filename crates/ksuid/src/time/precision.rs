use crate::{ParseNameError, TimeSource, Timestamp};
use core::{fmt, str::FromStr};

/// How many clock samples [`Precision::detect`] takes.
const SAMPLES: usize = 3;

/// Sub-second resolution a clock offers, ordered from coarsest to finest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    /// 10 bits, `0..1_000`.
    Millisecond,
    /// 20 bits, `0..1_000_000`.
    Microsecond,
    /// 30 bits, `0..1_000_000_000`.
    Nanosecond,
}

impl Precision {
    /// Classifies a single nanosecond reading by its trailing zeros.
    ///
    /// Readings that are whole milliseconds (including zero) count as
    /// [`Precision::Millisecond`]; there is no coarser result.
    #[must_use]
    pub const fn of(nanos: u32) -> Self {
        if nanos % 1_000 != 0 {
            Self::Nanosecond
        } else if nanos % 1_000_000 != 0 {
            Self::Microsecond
        } else {
            Self::Millisecond
        }
    }

    /// Determines the finest resolution `clock` actually produces.
    ///
    /// A clock may report nanoseconds while only ticking every millisecond.
    /// The clock is sampled three times, pausing briefly between samples, and
    /// the finest classification wins: one reading with non-zero low digits
    /// proves the resolution exists.
    pub fn detect<T>(clock: &T) -> Self
    where
        T: TimeSource,
    {
        Self::detect_with(clock, || {
            std::thread::sleep(core::time::Duration::from_nanos(1));
        })
    }

    /// [`Self::detect`] with a caller-supplied pause between samples.
    pub fn detect_with<T, P>(clock: &T, mut pause: P) -> Self
    where
        T: TimeSource,
        P: FnMut(),
    {
        let mut best = Self::Millisecond;
        for i in 0..SAMPLES {
            if i > 0 {
                pause();
            }
            best = best.max(Self::of(clock.now().nanos()));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(precision = %best, "detected clock precision");

        best
    }

    /// Number of leading payload bits holding the sub-second fraction.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Millisecond => 10,
            Self::Microsecond => 20,
            Self::Nanosecond => 30,
        }
    }

    /// The sub-second fraction of `ts` in this precision's unit.
    #[must_use]
    pub const fn fraction(self, ts: Timestamp) -> u32 {
        match self {
            Self::Millisecond => ts.millis(),
            Self::Microsecond => ts.micros(),
            Self::Nanosecond => ts.nanos(),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
        })
    }
}

impl FromStr for Precision {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ms" | "milli" | "millis" | "millisecond" => Ok(Self::Millisecond),
            "us" | "micro" | "micros" | "microsecond" => Ok(Self::Microsecond),
            "ns" | "nano" | "nanos" | "nanosecond" => Ok(Self::Nanosecond),
            _ => Err(ParseNameError {
                kind: "precision",
                name: s.to_owned(),
            }),
        }
    }
}
