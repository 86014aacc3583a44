use crate::RandSource;
use core::cell::RefCell;
use rand::{RngCore, SeedableRng, rng, rngs::SmallRng};

std::thread_local! {
    static SMALL_RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_rng(&mut rng()));
}

/// A fast, **non-cryptographic** `RandSource`.
///
/// Backed by a thread-local [`SmallRng`] seeded once per thread from the
/// thread RNG. Payloads are not suitable where identifiers must be
/// unguessable; prefer [`crate::ThreadRandom`] unless generation throughput
/// matters more.
#[derive(Default, Clone, Copy, Debug)]
pub struct FastRandom;

impl RandSource for FastRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        SMALL_RNG.with(|small| small.borrow_mut().fill_bytes(dest));
    }
}
