//! Property tests over arbitrary seeds and kinds.

use chaosrng_core::{BitGenerator, Generator, GeneratorKind, Rng, SeedSequence, Stateful};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = GeneratorKind> {
    (0..GeneratorKind::ALL.len()).prop_map(|i| GeneratorKind::ALL[i])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Restoring a snapshot replays exactly the values drawn after it.
    #[test]
    fn prop_restore_replays_stream(
        kind in kind_strategy(),
        seed in any::<u64>(),
        skip in 0..1500usize,
    ) {
        let mut g = Generator::from_seed(kind, seed);
        for _ in 0..skip {
            g.next();
        }
        let snap = g.save_state().unwrap();
        let expected: Vec<u64> = (0..64).map(|_| g.next()).collect();
        g.restore_state(&snap).unwrap();
        let replay: Vec<u64> = (0..64).map(|_| g.next()).collect();
        prop_assert_eq!(replay, expected);
    }

    /// A clone continues the same stream as its source.
    #[test]
    fn prop_clone_is_equivalent(kind in kind_strategy(), seed in any::<u64>()) {
        let mut a = Rng::new(kind, seed);
        a.next();
        let mut b = a.clone();
        for _ in 0..32 {
            prop_assert_eq!(a.next_float(), b.next_float());
        }
    }

    /// `int` stays inside its inclusive bounds in either argument order.
    #[test]
    fn prop_int_within_bounds(
        kind in kind_strategy(),
        seed in any::<u64>(),
        x in any::<i64>(),
        y in any::<i64>(),
    ) {
        let mut rng = Rng::new(kind, seed);
        let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
        for _ in 0..16 {
            let v = rng.int(x, y).unwrap();
            prop_assert!(lo <= v && v <= hi, "{} not in [{}, {}]", v, lo, hi);
        }
    }

    /// `next_int` never reaches its bound.
    #[test]
    fn prop_next_int_below_max(
        kind in kind_strategy(),
        seed in any::<u64>(),
        max in 1..=u64::MAX,
    ) {
        let mut g = Generator::from_seed(kind, seed);
        for _ in 0..16 {
            prop_assert!(g.next_int(max).unwrap() < max);
        }
    }

    /// Spawned seeds are pairwise distinct.
    #[test]
    fn prop_spawned_seeds_distinct(seed in any::<u64>(), n in 1..200usize) {
        let seeds = SeedSequence::new(seed).unwrap().spawn(n).unwrap();
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), n);
    }
}
