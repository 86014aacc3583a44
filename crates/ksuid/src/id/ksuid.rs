use crate::{
    BASE62_CHARS, Error, Result, WORDS, Words, decode_base62, encode_base62, is_valid_base62,
};
use core::{fmt, str::FromStr};

/// Seconds between the Unix epoch and the KSUID epoch (2014-05-13T16:53:20Z).
///
/// With a 32-bit time field this postpones rollover until 2150-06-19.
pub const EPOCH_OFFSET: i64 = 1_400_000_000;

/// Length of the canonical string form.
pub const KSUID_CHARS: usize = BASE62_CHARS;

/// Length of the binary form.
pub const KSUID_BYTES: usize = 20;

/// Length of the big-endian time field in the binary form.
pub const TIME_BYTES: usize = 4;

/// Length of the payload.
pub const PAYLOAD_BYTES: usize = 16;

/// A K-Sortable Unique Identifier.
///
/// A 32-bit time field (seconds since [`EPOCH_OFFSET`]) followed by a 16-byte
/// payload:
///
/// ```text
///  Byte Index:  0        3 4                    19
///               +---------+-----------------------+
///  Field:       | time(4) |      payload (16)     |
///               +---------+-----------------------+
///               |<-- MSB -- 160 bits -- LSB ---->|
/// ```
///
/// Values are immutable. Ordering compares the time field as an unsigned
/// integer, then the payload byte-wise, which is the same order as both the
/// binary and the base-62 string forms.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ksuid {
    // Field order drives the derived `Ord`.
    time: u32,
    payload: [u8; PAYLOAD_BYTES],
}

impl Ksuid {
    /// The smallest identifier: `000000000000000000000000000`.
    pub const MIN: Self = Self {
        time: 0,
        payload: [0; PAYLOAD_BYTES],
    };

    /// The largest identifier: `aWgEPTl1tmebfsQzFP4bxwgy80V`.
    pub const MAX: Self = Self {
        time: u32::MAX,
        payload: [u8::MAX; PAYLOAD_BYTES],
    };

    /// Builds an identifier from a raw time field and payload.
    #[must_use]
    pub const fn from_raw(time: u32, payload: [u8; PAYLOAD_BYTES]) -> Self {
        Self { time, payload }
    }

    /// Builds an identifier from Unix seconds and a payload.
    ///
    /// The time field is `(unix_seconds - EPOCH_OFFSET) mod 2^32`: instants
    /// outside the representable window wrap around instead of failing.
    #[must_use]
    pub const fn from_parts(unix_seconds: i64, payload: [u8; PAYLOAD_BYTES]) -> Self {
        Self {
            time: to_ksuid_time(unix_seconds),
            payload,
        }
    }

    /// Slice-based variant of [`Self::from_parts`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `payload` is not exactly
    /// [`PAYLOAD_BYTES`] long.
    pub fn from_time_and_payload(unix_seconds: i64, payload: &[u8]) -> Result<Self> {
        let payload = <[u8; PAYLOAD_BYTES]>::try_from(payload).map_err(|_| {
            Error::InvalidLength {
                expected: PAYLOAD_BYTES,
                actual: payload.len(),
            }
        })?;
        Ok(Self::from_parts(unix_seconds, payload))
    }

    /// Builds an identifier from its 20-byte binary form.
    #[must_use]
    pub const fn from_byte_array(bytes: [u8; KSUID_BYTES]) -> Self {
        let time = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let mut payload = [0; PAYLOAD_BYTES];
        let mut i = 0;
        while i < PAYLOAD_BYTES {
            payload[i] = bytes[TIME_BYTES + i];
            i += 1;
        }
        Self { time, payload }
    }

    /// Builds an identifier from a byte slice holding the binary form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `bytes` is not exactly
    /// [`KSUID_BYTES`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = <[u8; KSUID_BYTES]>::try_from(bytes).map_err(|_| Error::InvalidLength {
            expected: KSUID_BYTES,
            actual: bytes.len(),
        })?;
        Ok(Self::from_byte_array(bytes))
    }

    /// Parses the canonical 27-character base-62 form.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if `s` is not 27 base-62 characters
    /// - [`Error::InvalidOverflow`] if `s` denotes a value of 2^160 or more
    pub fn decode(s: &str) -> Result<Self> {
        decode_base62(s).map(Self::from_words)
    }

    /// Returns `true` if `s` is 27 characters of the base-62 alphabet.
    ///
    /// Overflow is not checked here; [`Self::decode`] may still reject a
    /// string accepted by this function.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        is_valid_base62(s)
    }

    /// Returns the 20-byte big-endian binary form.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; KSUID_BYTES] {
        let mut bytes = [0; KSUID_BYTES];
        let time = self.time.to_be_bytes();
        let mut i = 0;
        while i < TIME_BYTES {
            bytes[i] = time[i];
            i += 1;
        }
        let mut i = 0;
        while i < PAYLOAD_BYTES {
            bytes[TIME_BYTES + i] = self.payload[i];
            i += 1;
        }
        bytes
    }

    /// Encodes this identifier into its 27-byte ASCII form without allocating.
    #[must_use]
    pub fn encode_to_buf(&self) -> [u8; KSUID_CHARS] {
        encode_base62(&self.to_words())
    }

    /// Encodes this identifier into its canonical base-62 string.
    #[must_use]
    pub fn encode(&self) -> String {
        self.encode_to_buf().iter().map(|&b| char::from(b)).collect()
    }

    /// The raw time field: seconds since [`EPOCH_OFFSET`].
    #[must_use]
    pub const fn time(&self) -> u32 {
        self.time
    }

    /// Seconds since the Unix epoch.
    ///
    /// Always in `EPOCH_OFFSET..=EPOCH_OFFSET + u32::MAX`.
    #[must_use]
    pub const fn unix_time(&self) -> i64 {
        self.time as i64 + EPOCH_OFFSET
    }

    /// A copy of the 16-byte payload.
    #[must_use]
    pub const fn payload(&self) -> [u8; PAYLOAD_BYTES] {
        self.payload
    }

    /// Returns the next identifier in sort order.
    ///
    /// The payload is treated as a 128-bit big-endian integer and incremented.
    /// When it overflows it wraps to zero and the time field is incremented,
    /// which itself wraps at 2^32 (only reachable from [`Self::MAX`]).
    #[must_use]
    pub const fn increment(&self) -> Self {
        let (payload, overflow) = u128::from_be_bytes(self.payload).overflowing_add(1);
        let time = if overflow {
            self.time.wrapping_add(1)
        } else {
            self.time
        };
        Self {
            time,
            payload: payload.to_be_bytes(),
        }
    }

    #[cfg(feature = "std")]
    /// The time field as a [`std::time::SystemTime`], with second precision.
    #[must_use]
    pub fn instant(&self) -> std::time::SystemTime {
        std::time::UNIX_EPOCH + core::time::Duration::from_secs(self.unix_time().unsigned_abs())
    }

    /// Unix seconds of the identifier encoded in `s`.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::decode`].
    pub fn unix_time_of(s: &str) -> Result<i64> {
        Self::decode(s).map(|id| id.unix_time())
    }

    /// Payload of the identifier encoded in `s`.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::decode`].
    pub fn payload_of(s: &str) -> Result<[u8; PAYLOAD_BYTES]> {
        Self::decode(s).map(|id| id.payload())
    }

    #[cfg(feature = "std")]
    /// [`Self::instant`] of the identifier encoded in `s`.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::decode`].
    pub fn instant_of(s: &str) -> Result<std::time::SystemTime> {
        Self::decode(s).map(|id| id.instant())
    }

    #[cfg(feature = "std")]
    /// Generates an identifier for the current second with a fresh random
    /// payload from [`crate::ThreadRandom`].
    ///
    /// This keeps no state; use a [`crate::KsuidFactory`] for sub-second or
    /// monotonic ordering.
    #[must_use]
    pub fn now() -> Self {
        use crate::{RandSource, SystemClock, ThreadRandom, TimeSource};
        Self::from_parts(SystemClock.now().seconds(), ThreadRandom.payload())
    }

    pub(crate) const fn from_words(words: Words) -> Self {
        let mut payload = [0; PAYLOAD_BYTES];
        let mut w = 1;
        while w < WORDS {
            let chunk = words[w].to_be_bytes();
            let offset = (w - 1) * 4;
            payload[offset] = chunk[0];
            payload[offset + 1] = chunk[1];
            payload[offset + 2] = chunk[2];
            payload[offset + 3] = chunk[3];
            w += 1;
        }
        Self {
            time: words[0],
            payload,
        }
    }

    pub(crate) const fn to_words(&self) -> Words {
        let mut words = [self.time, 0, 0, 0, 0];
        let mut w = 1;
        while w < WORDS {
            let offset = (w - 1) * 4;
            words[w] = u32::from_be_bytes([
                self.payload[offset],
                self.payload[offset + 1],
                self.payload[offset + 2],
                self.payload[offset + 3],
            ]);
            w += 1;
        }
        words
    }
}

const fn to_ksuid_time(unix_seconds: i64) -> u32 {
    // Truncation is the rollover rule.
    unix_seconds.wrapping_sub(EPOCH_OFFSET) as u32
}

impl Default for Ksuid {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.encode_to_buf();
        // Base-62 output is always ASCII
        match core::str::from_utf8(&buf) {
            Ok(s) => f.pad(s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Hex<'a>(&'a [u8]);
        impl fmt::Debug for Hex<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.iter().try_for_each(|b| write!(f, "{b:02X}"))
            }
        }

        f.debug_struct("Ksuid")
            .field("id", &format_args!("{self}"))
            .field("time", &format_args!("{} (unix {})", self.time, self.unix_time()))
            .field("payload", &Hex(&self.payload))
            .finish()
    }
}

impl FromStr for Ksuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Ksuid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&[u8]> for Ksuid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<[u8; KSUID_BYTES]> for Ksuid {
    fn from(bytes: [u8; KSUID_BYTES]) -> Self {
        Self::from_byte_array(bytes)
    }
}

impl From<Ksuid> for [u8; KSUID_BYTES] {
    fn from(id: Ksuid) -> Self {
        id.to_bytes()
    }
}

impl From<Ksuid> for String {
    fn from(id: Ksuid) -> Self {
        id.encode()
    }
}

impl PartialEq<str> for Ksuid {
    fn eq(&self, other: &str) -> bool {
        self.encode_to_buf() == other.as_bytes()
    }
}

impl PartialEq<&str> for Ksuid {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<Ksuid> for &str {
    fn eq(&self, other: &Ksuid) -> bool {
        other == *self
    }
}
