use crate::RandSource;
use rand::{RngCore, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is cryptographically secure (ChaCha-based) and automatically
/// reseeded periodically. It is the default entropy source.
///
/// ⚠️ NOTE: The underlying `ThreadRng` is not `Send` or `Sync`. This type
/// does not store it; it accesses the thread-local generator on each call,
/// so it may be freely shared across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rng().fill_bytes(dest);
    }
}
