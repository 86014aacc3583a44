use crate::{
    EPOCH_OFFSET, Ksuid, KsuidFactory, KsuidGenerator, PAYLOAD_BYTES, Precision, RandSource,
    Strategy, TimeSource, Timestamp,
};
use core::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Mutex;
use std::thread::scope;

const T: i64 = 1_700_000_000;

struct MockTime {
    ts: Timestamp,
}

impl TimeSource for MockTime {
    fn now(&self) -> Timestamp {
        self.ts
    }
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

struct MockStepTime {
    values: Vec<i64>,
    index: Cell<usize>,
}

impl SharedMockStepTime {
    fn new(values: Vec<i64>) -> Self {
        Self {
            clock: Rc::new(MockStepTime {
                values,
                index: Cell::new(0),
            }),
        }
    }

    fn advance(&self) {
        self.clock.index.set(self.clock.index.get() + 1);
    }
}

impl TimeSource for SharedMockStepTime {
    fn now(&self) -> Timestamp {
        Timestamp::from_seconds(self.clock.values[self.clock.index.get()])
    }
}

struct MockRand {
    byte: u8,
}

impl RandSource for MockRand {
    fn fill_bytes(&self, dest: &mut [u8]) {
        dest.fill(self.byte);
    }
}

/// Hands out 1, 2, 3, ... in the last payload byte so each draw is
/// distinguishable.
struct CountingRand {
    draws: Cell<u8>,
}

impl CountingRand {
    fn new() -> Self {
        Self {
            draws: Cell::new(0),
        }
    }
}

impl RandSource for CountingRand {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.draws.set(self.draws.get() + 1);
        dest.fill(0);
        if let Some(last) = dest.last_mut() {
            *last = self.draws.get();
        }
    }
}

/// Draws 0xFF.., 0xFE.., 0xFD.., so any fresh draw sorts before the last.
struct DecreasingRand {
    next: Cell<u8>,
}

impl DecreasingRand {
    fn new() -> Self {
        Self {
            next: Cell::new(0xFF),
        }
    }
}

impl RandSource for DecreasingRand {
    fn fill_bytes(&self, dest: &mut [u8]) {
        dest.fill(self.next.get());
        self.next.set(self.next.get().wrapping_sub(1));
    }
}

fn run_ids_strictly_increase<G>(generator: &G, count: usize)
where
    G: KsuidGenerator,
{
    let mut last = generator.next_id();
    for _ in 1..count {
        let id = generator.next_id();
        assert!(id > last, "{id:?} <= {last:?}");
        assert!(id.encode() > last.encode());
        last = id;
    }
}

fn run_unique_across_threads<G>(generator: &G, ts: Timestamp)
where
    G: KsuidGenerator + Sync,
{
    const IDS_PER_THREAD: usize = 10_000;
    let threads = num_cpus::get().clamp(2, 8);
    let seen = Mutex::new(HashSet::with_capacity(threads * IDS_PER_THREAD));

    scope(|s| {
        for _ in 0..threads {
            s.spawn(|| {
                let ids: Vec<Ksuid> = (0..IDS_PER_THREAD)
                    .map(|_| generator.next_id_at(ts))
                    .collect();
                let mut seen = seen.lock().unwrap();
                for id in ids {
                    assert!(seen.insert(id), "duplicate {id:?}");
                }
            });
        }
    });

    assert_eq!(seen.into_inner().unwrap().len(), threads * IDS_PER_THREAD);
}

#[test]
fn plain_uses_second_and_fresh_payload() {
    let factory = KsuidFactory::plain(
        MockTime {
            ts: Timestamp::new(T, 999_999_999),
        },
        CountingRand::new(),
    );
    let a = factory.create();
    let b = factory.create();
    assert_eq!(a.unix_time(), T);
    assert_eq!(b.unix_time(), T);
    assert_eq!(a.payload()[15], 1);
    assert_eq!(b.payload()[15], 2);
    assert_eq!(factory.strategy(), Strategy::Plain);
}

#[test]
fn sub_second_strategies_embed_fraction() {
    let ts = Timestamp::new(T, 999_999_999);
    for (precision, expected) in [
        (Precision::Millisecond, 999),
        (Precision::Microsecond, 999_999),
        (Precision::Nanosecond, 999_999_999),
    ] {
        let factory =
            KsuidFactory::with_precision(precision, MockTime { ts }, MockRand { byte: 0 });
        let id = factory.create();
        assert_eq!(id.unix_time(), T);
        assert_eq!(precision.extract(&id.payload()), expected, "{precision}");
        assert_eq!(factory.strategy().precision(), Some(precision));
    }
}

#[test]
fn millisecond_strategy_leading_bytes() {
    let factory = KsuidFactory::new(
        Strategy::Millisecond,
        MockTime {
            ts: Timestamp::new(T, 999_000_000),
        },
        MockRand { byte: 0 },
    );
    let p = factory.create().payload();
    assert_eq!((u32::from(p[0]) << 8 | u32::from(p[1])) >> 6, 999);
}

#[test]
fn sub_second_ids_sort_within_a_second() {
    let factory = KsuidFactory::new(
        Strategy::Microsecond,
        MockTime {
            ts: Timestamp::new(T, 0),
        },
        MockRand { byte: 0xFF },
    );
    let mut last = factory.create_at(Timestamp::new(T, 0));
    for micros in [1_u32, 2, 500, 999_999] {
        let id = factory.create_at(Timestamp::new(T, micros * 1_000));
        assert!(id > last);
        last = id;
    }
}

#[test]
fn subsecond_detects_precision_from_clock() {
    let factory = KsuidFactory::subsecond(
        MockTime {
            ts: Timestamp::new(T, 1_234_000),
        },
        MockRand { byte: 0 },
    );
    assert_eq!(factory.strategy(), Strategy::Microsecond);

    let factory = KsuidFactory::subsecond(
        MockTime {
            ts: Timestamp::new(T, 0),
        },
        MockRand { byte: 0 },
    );
    assert_eq!(factory.strategy(), Strategy::Millisecond);
}

#[test]
fn monotonic_same_second_increments() {
    let factory = KsuidFactory::monotonic(
        MockTime {
            ts: Timestamp::from_seconds(T),
        },
        MockRand { byte: 0x42 },
    );
    let first = factory.create();
    assert_eq!(first.payload(), [0x42; PAYLOAD_BYTES]);
    run_ids_strictly_increase(&factory, 4096);
    assert_eq!(factory.create().unix_time(), T);
}

#[test]
fn monotonic_carries_into_time_on_payload_overflow() {
    let factory = KsuidFactory::monotonic(
        MockTime {
            ts: Timestamp::from_seconds(T),
        },
        MockRand { byte: 0xFF },
    );
    let first = factory.create();
    let second = factory.create();
    assert_eq!(second.unix_time(), T + 1);
    assert_eq!(second.payload(), [0; PAYLOAD_BYTES]);
    assert!(second > first);

    // Clock still reads T, which is now one second behind: absorbed as drift
    let third = factory.create();
    assert_eq!(third.unix_time(), T + 1);
    assert!(third > second);
}

#[test]
fn monotonic_clock_drift_scenario() {
    let tolerance = crate::DRIFT_TOLERANCE;
    let readings = vec![
        T,
        T,
        T + 1,
        T + 2,
        T + 3 - tolerance,
        T + 4 - tolerance,
        T + 5,
    ];
    let expected = [T, T, T + 1, T + 2, T + 2, T + 2, T + 5];

    let clock = SharedMockStepTime::new(readings);
    let factory = KsuidFactory::monotonic(clock.clone(), CountingRand::new());

    let mut previous: Option<Ksuid> = None;
    for (i, want) in expected.into_iter().enumerate() {
        if i > 0 {
            clock.advance();
        }
        let id = factory.create();
        assert_eq!(id.unix_time(), want, "call {}", i + 1);
        if let Some(prev) = previous {
            assert!(id > prev, "call {} regressed", i + 1);
        }
        previous = Some(id);
    }
}

#[test]
fn monotonic_resets_after_large_backward_jump() {
    let clock = SharedMockStepTime::new(vec![T, T - 3600]);
    let rng = CountingRand::new();
    let factory = KsuidFactory::monotonic(clock.clone(), rng);

    let first = factory.create();
    clock.advance();
    let second = factory.create();
    assert_eq!(second.unix_time(), T - 3600);
    assert_eq!(second.payload()[15], 2);
    assert!(second < first);
}

#[test]
fn monotonic_clock_below_epoch_increments() {
    let factory = KsuidFactory::monotonic(
        MockTime {
            ts: Timestamp::from_seconds(1_000),
        },
        DecreasingRand::new(),
    );
    let first = factory.create();
    assert_eq!(first.payload(), [0xFF; PAYLOAD_BYTES]);
    let second = factory.create();
    assert_eq!(second, first.increment());
    run_ids_strictly_increase(&factory, 64);
}

#[test]
fn monotonic_drift_across_time_field_rollover() {
    let top = EPOCH_OFFSET + i64::from(u32::MAX);
    let clock = SharedMockStepTime::new(vec![top + 1, top]);
    let factory = KsuidFactory::monotonic(clock.clone(), DecreasingRand::new());

    let first = factory.create();
    assert_eq!(first.time(), 0);
    clock.advance();
    let second = factory.create();
    assert_eq!(second, first.increment());
}

#[test]
fn monotonic_unique_across_threads() {
    let factory = KsuidFactory::monotonic(
        MockTime {
            ts: Timestamp::from_seconds(T),
        },
        |dest: &mut [u8]| dest.fill(0),
    );
    run_unique_across_threads(&factory, Timestamp::from_seconds(T));
}

#[test]
fn factories_share_no_state() {
    let ts = Timestamp::from_seconds(T);
    let a = KsuidFactory::monotonic(MockTime { ts }, MockRand { byte: 1 });
    let b = KsuidFactory::monotonic(MockTime { ts }, MockRand { byte: 1 });
    a.create();
    a.create();
    assert_eq!(b.create().payload(), [1; PAYLOAD_BYTES]);
}

#[test]
fn time_outside_window_wraps() {
    let factory = KsuidFactory::plain(
        MockTime {
            ts: Timestamp::from_seconds(EPOCH_OFFSET - 1),
        },
        MockRand { byte: 0 },
    );
    assert_eq!(factory.create().time(), u32::MAX);
}

#[cfg(feature = "std")]
mod system {
    use super::*;
    use crate::{FastRandom, SystemClock, ThreadRandom};

    #[test]
    fn default_factory_is_plain() {
        let factory: KsuidFactory<SystemClock, ThreadRandom> = KsuidFactory::default();
        assert_eq!(factory.strategy(), Strategy::Plain);
        assert_ne!(factory.create(), factory.create());
    }

    #[test]
    fn monotonic_system_clock_increases() {
        let factory = KsuidFactory::<SystemClock, ThreadRandom>::with_strategy(Strategy::Monotonic);
        run_ids_strictly_increase(&factory, 100_000);
    }

    #[test]
    fn monotonic_system_clock_unique_across_threads() {
        let factory = KsuidFactory::new(Strategy::Monotonic, SystemClock, FastRandom);
        run_unique_across_threads(&factory, SystemClock.now());
    }

    #[test]
    fn plain_system_clock_unique_across_threads() {
        let factory = KsuidFactory::plain(SystemClock, ThreadRandom);
        run_unique_across_threads(&factory, SystemClock.now());
    }

    #[test]
    fn subsecond_system_clock_is_sub_second() {
        let factory = KsuidFactory::subsecond(SystemClock, ThreadRandom);
        assert!(factory.strategy().precision().is_some());
        let id = factory.create();
        assert!(Ksuid::is_valid(&id.encode()));
    }

    #[test]
    fn debug_names_strategy() {
        let factory =
            KsuidFactory::<SystemClock, ThreadRandom>::with_strategy(Strategy::Nanosecond);
        assert_eq!(
            format!("{factory:?}"),
            "KsuidFactory { strategy: Nanosecond, .. }"
        );
    }
}
