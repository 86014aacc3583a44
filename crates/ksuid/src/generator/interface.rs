use crate::{Ksuid, Timestamp};

/// A minimal interface for generating KSUIDs
pub trait KsuidGenerator {
    /// Returns an identifier for the current instant of the generator's clock.
    fn next_id(&self) -> Ksuid;

    /// Returns an identifier for the given instant.
    fn next_id_at(&self, ts: Timestamp) -> Ksuid;
}
