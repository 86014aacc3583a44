use crate::PAYLOAD_BYTES;

/// A trait for entropy sources that fill byte buffers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Any `Fn(&mut [u8])` closure is a `RandSource`.
///
/// # Example
/// ```
/// use ksuid::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn fill_bytes(&self, dest: &mut [u8]) {
///         dest.fill(0xAB);
///     }
/// }
///
/// assert_eq!(FixedRand.payload(), [0xAB; 16]);
/// ```
pub trait RandSource {
    /// Fills `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);

    /// Returns a fresh 16-byte payload.
    fn payload(&self) -> [u8; PAYLOAD_BYTES] {
        let mut payload = [0; PAYLOAD_BYTES];
        self.fill_bytes(&mut payload);
        payload
    }
}

impl<F> RandSource for F
where
    F: Fn(&mut [u8]),
{
    fn fill_bytes(&self, dest: &mut [u8]) {
        self(dest);
    }
}

/// Adapts a source of random `u64` values into a [`RandSource`].
///
/// Buffers are filled with big-endian words; a trailing partial word takes
/// its leading bytes.
///
/// ```
/// use ksuid::{RandSource, U64Random};
///
/// let rng = U64Random::new(|| 0x0102_0304_0506_0708);
/// let payload = rng.payload();
/// assert_eq!(payload[..8], [1, 2, 3, 4, 5, 6, 7, 8]);
/// assert_eq!(payload[8..], [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
#[derive(Clone, Debug)]
pub struct U64Random<F> {
    next: F,
}

impl<F> U64Random<F>
where
    F: Fn() -> u64,
{
    /// Wraps a function returning 64 random bits per call.
    pub const fn new(next: F) -> Self {
        Self { next }
    }
}

impl<F> RandSource for U64Random<F>
where
    F: Fn() -> u64,
{
    fn fill_bytes(&self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = (self.next)().to_be_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}
