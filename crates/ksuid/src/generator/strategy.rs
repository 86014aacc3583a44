use crate::{
    Ksuid, ParseNameError, Precision, RandSource, Timestamp,
    generator::{monotonic::MonotonicState, subsec},
};
use core::{fmt, str::FromStr};

/// How a [`crate::KsuidFactory`] derives identifiers from an instant.
///
/// Chosen once when the factory is built.
///
/// | Strategy      | Time field | Payload                                        |
/// |---------------|------------|------------------------------------------------|
/// | `Plain`       | second     | 128 random bits                                |
/// | `Millisecond` | second     | 10-bit milliseconds, then 118 random bits      |
/// | `Microsecond` | second     | 20-bit microseconds, then 108 random bits      |
/// | `Nanosecond`  | second     | 30-bit nanoseconds, then 98 random bits        |
/// | `Monotonic`   | second\*   | random, incremented within a second            |
///
/// \* frozen while the clock drifts backward by less than
/// [`crate::DRIFT_TOLERANCE`] seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Whole-second time, fully random payload.
    #[default]
    Plain,
    /// Milliseconds in the leading 10 payload bits.
    Millisecond,
    /// Microseconds in the leading 20 payload bits.
    Microsecond,
    /// Nanoseconds in the leading 30 payload bits.
    Nanosecond,
    /// Strictly increasing output from a shared last value.
    Monotonic,
}

impl Strategy {
    /// The sub-second precision embedded by this strategy, if any.
    #[must_use]
    pub const fn precision(self) -> Option<Precision> {
        match self {
            Self::Millisecond => Some(Precision::Millisecond),
            Self::Microsecond => Some(Precision::Microsecond),
            Self::Nanosecond => Some(Precision::Nanosecond),
            Self::Plain | Self::Monotonic => None,
        }
    }
}

impl From<Precision> for Strategy {
    fn from(precision: Precision) -> Self {
        match precision {
            Precision::Millisecond => Self::Millisecond,
            Precision::Microsecond => Self::Microsecond,
            Precision::Nanosecond => Self::Nanosecond,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision() {
            Some(precision) => fmt::Display::fmt(&precision, f),
            None if *self == Self::Monotonic => f.pad("monotonic"),
            None => f.pad("plain"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "default" => Ok(Self::Plain),
            "monotonic" | "mono" => Ok(Self::Monotonic),
            _ => s.parse::<Precision>().map(Self::from).map_err(|_| ParseNameError {
                kind: "strategy",
                name: s.to_owned(),
            }),
        }
    }
}

/// A [`Strategy`] together with the state it needs.
pub(crate) enum Variant {
    Plain,
    Millisecond,
    Microsecond,
    Nanosecond,
    Monotonic(MonotonicState),
}

impl Variant {
    pub(crate) fn new(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Plain => Self::Plain,
            Strategy::Millisecond => Self::Millisecond,
            Strategy::Microsecond => Self::Microsecond,
            Strategy::Nanosecond => Self::Nanosecond,
            Strategy::Monotonic => Self::Monotonic(MonotonicState::new()),
        }
    }

    pub(crate) const fn strategy(&self) -> Strategy {
        match self {
            Self::Plain => Strategy::Plain,
            Self::Millisecond => Strategy::Millisecond,
            Self::Microsecond => Strategy::Microsecond,
            Self::Nanosecond => Strategy::Nanosecond,
            Self::Monotonic(_) => Strategy::Monotonic,
        }
    }

    pub(crate) fn generate<R>(&self, ts: Timestamp, rng: &R) -> Ksuid
    where
        R: RandSource,
    {
        match self {
            Self::Plain => Ksuid::from_parts(ts.seconds(), rng.payload()),
            Self::Millisecond => subsec::generate(Precision::Millisecond, ts, rng),
            Self::Microsecond => subsec::generate(Precision::Microsecond, ts, rng),
            Self::Nanosecond => subsec::generate(Precision::Nanosecond, ts, rng),
            Self::Monotonic(state) => state.next(ts.seconds(), rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for strategy in [
            Strategy::Plain,
            Strategy::Millisecond,
            Strategy::Microsecond,
            Strategy::Nanosecond,
            Strategy::Monotonic,
        ] {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
            assert_eq!(Variant::new(strategy).strategy(), strategy);
        }
        assert_eq!("MS".parse(), Ok(Strategy::Millisecond));
        assert_eq!(
            "hourly".parse::<Strategy>(),
            Err(ParseNameError {
                kind: "strategy",
                name: "hourly".to_owned()
            })
        );
    }

    #[test]
    fn precision_mapping() {
        assert_eq!(Strategy::Plain.precision(), None);
        assert_eq!(Strategy::Monotonic.precision(), None);
        assert_eq!(
            Strategy::from(Precision::Microsecond).precision(),
            Some(Precision::Microsecond)
        );
        assert_eq!(Strategy::default(), Strategy::Plain);
    }
}
