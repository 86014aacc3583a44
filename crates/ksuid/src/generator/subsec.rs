use crate::{Ksuid, PAYLOAD_BYTES, Precision, RandSource, Timestamp};

impl Precision {
    /// Width in bytes of the payload prefix touched by [`Self::embed`].
    const fn prefix_len(self) -> usize {
        self.bits().div_ceil(8) as usize
    }

    /// Random low-order bits kept inside the prefix.
    const fn shift(self) -> u32 {
        self.prefix_len() as u32 * 8 - self.bits()
    }

    /// Overwrites the leading [`Self::bits`] of `payload` with `fraction`.
    ///
    /// The prefix is the smallest whole number of bytes covering those bits
    /// (2, 3 or 4); its remaining low-order bits keep their random value.
    ///
    /// ```text
    ///  Millisecond:  | millis (10) | rand (6) | rand ... |
    ///  Microsecond:  | micros (20) | rand (4) | rand ... |
    ///  Nanosecond:   | nanos  (30) | rand (2) | rand ... |
    /// ```
    pub fn embed(self, payload: &mut [u8; PAYLOAD_BYTES], fraction: u32) {
        let len = self.prefix_len();
        let shift = self.shift();
        let fraction = fraction & ((1 << self.bits()) - 1);

        let random = read_prefix(payload, len) & ((1 << shift) - 1);
        let value = (fraction << shift) | random;
        payload[..len].copy_from_slice(&value.to_be_bytes()[4 - len..]);
    }

    /// Recovers the fraction written by [`Self::embed`].
    #[must_use]
    pub fn extract(self, payload: &[u8; PAYLOAD_BYTES]) -> u32 {
        read_prefix(payload, self.prefix_len()) >> self.shift()
    }
}

fn read_prefix(payload: &[u8; PAYLOAD_BYTES], len: usize) -> u32 {
    let mut word = [0_u8; 4];
    word[4 - len..].copy_from_slice(&payload[..len]);
    u32::from_be_bytes(word)
}

/// Draws a random payload and embeds the sub-second part of `ts` in it.
pub(crate) fn generate<R>(precision: Precision, ts: Timestamp, rng: &R) -> Ksuid
where
    R: RandSource,
{
    let mut payload = rng.payload();
    precision.embed(&mut payload, precision.fraction(ts));
    Ksuid::from_parts(ts.seconds(), payload)
}
