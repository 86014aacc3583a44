use crate::{TimeSource, Timestamp};
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

/// A [`TimeSource`] reading the host's wall clock.
///
/// Instants before the Unix epoch are reported with negative seconds and a
/// non-negative nanosecond component.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => Timestamp::new(since.as_secs() as i64, since.subsec_nanos()),
            Err(err) => {
                let before = err.duration();
                let seconds = -(before.as_secs() as i64);
                match before.subsec_nanos() {
                    0 => Timestamp::from_seconds(seconds),
                    nanos => Timestamp::new(seconds - 1, 1_000_000_000 - nanos),
                }
            }
        }
    }
}
