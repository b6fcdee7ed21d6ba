use std::thread;

use dj_solver::oracle::{BitOracle, ConstantOracle, CountingOracle, ParityOracle, ThresholdOracle};
use dj_solver::{
    assert_approx_eq, classify, decide_exact, decide_paired, Decision, DecisionError, Oracle,
    Promise, Solver,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

type Result<T> = std::result::Result<T, DecisionError>;

/// Every truth table over `bits` inputs with exactly half the entries set.
fn balanced_masks(bits: u32) -> impl Iterator<Item = u64> {
    let size = 1u64 << bits;
    (0..1u64 << size).filter(move |mask| u64::from(mask.count_ones()) == size / 2)
}

fn table(mask: u64) -> impl Fn(u64) -> bool {
    move |x| (mask >> x) & 1 == 1
}

#[test]
fn test_exact_on_every_balanced_function() -> Result<()> {
    for bits in 1..=4 {
        let mut checked = 0;
        for mask in balanced_masks(bits) {
            let f = CountingOracle::new(table(mask));
            assert_eq!(
                Decision::Balanced,
                decide_exact(&f, bits)?,
                "mask {:b} over {} bits",
                mask,
                bits
            );
            assert!(f.queries() >= 2);
            assert!(f.queries() <= (1 << (bits - 1)) + 1);
            checked += 1;
        }
        assert!(checked > 0);
    }
    Ok(())
}

#[test]
fn test_exact_on_constant_functions() -> Result<()> {
    for bits in 1..=12 {
        for value in [false, true] {
            let f = CountingOracle::new(ConstantOracle(value));
            assert_eq!(Decision::Constant, decide_exact(&f, bits)?);
            assert_eq!((1 << (bits - 1)) + 1, f.queries());
        }
    }
    Ok(())
}

#[test]
fn test_known_scenarios() -> Result<()> {
    let even = |x: u64| x % 2 == 0;
    assert_eq!(Decision::Balanced, decide_exact(&even, 3)?);
    assert_eq!(Decision::Constant, decide_exact(&|_: u64| 1, 3)?);
    assert_eq!(
        Decision::Balanced,
        decide_exact(&|x: u64| if x < 4 { 1 } else { 0 }, 3)?
    );

    // x < 10 is true on all of {0..7}
    assert_eq!(
        Decision::Constant,
        decide_paired(&ThresholdOracle { threshold: 10 }, 3)?
    );
    Ok(())
}

#[test]
fn test_bit_oracles_are_balanced() -> Result<()> {
    for bits in 1..=10 {
        for bit in 0..bits {
            let f = BitOracle { bit };
            assert_eq!(Promise::Balanced, classify(&f, bits)?);
            assert_eq!(Decision::Balanced, decide_exact(&f, bits)?);
        }
    }
    Ok(())
}

#[test]
fn test_paired_catches_mirror_asymmetry() -> Result<()> {
    // The top bit always differs between i and 2^n - 1 - i
    for bits in 1..=16 {
        let f = BitOracle { bit: bits - 1 };
        assert_eq!(Decision::Balanced, decide_paired(&f, bits)?);
    }
    Ok(())
}

#[test]
fn test_deterministic_strategies_are_repeatable() -> Result<()> {
    for mask in balanced_masks(3) {
        let f = table(mask);
        let first = (decide_exact(&f, 3)?, decide_paired(&f, 3)?);
        for _ in 0..5 {
            assert_eq!(first, (decide_exact(&f, 3)?, decide_paired(&f, 3)?));
        }
    }
    Ok(())
}

#[test]
fn test_concurrent_exact_decisions() {
    thread::scope(|scope| {
        let handles = (1..=8)
            .map(|bits| scope.spawn(move || decide_exact(&ParityOracle, bits)))
            .collect::<Vec<_>>();
        for handle in handles {
            let decision = handle.join().unwrap().unwrap();
            assert_eq!(Decision::Balanced, decision);
        }
    });
}

fn balanced_rate<O: Oracle>(f: &O, bits: u32, runs: usize, seed: u64) -> Result<f64> {
    let solver = Solver::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut balanced = 0;
    for _ in 0..runs {
        if solver.decide_randomized(f, bits, &mut rng)?.is_balanced() {
            balanced += 1;
        }
    }
    Ok(balanced as f64 / runs as f64)
}

#[test]
fn test_randomized_statistics() -> Result<()> {
    // Parity over 8 inputs: a distinct pair disagrees with probability 4/7,
    // so Balanced comes up 4/7 + 3/7 * 1/3 = 5/7 of the time.
    let rate = balanced_rate(&ParityOracle, 3, 10_000, 17)?;
    assert!(rate > 0.5);
    assert_approx_eq!(5.0 / 7.0, rate, 0.03);

    let rate = balanced_rate(&ConstantOracle(1), 3, 10_000, 18)?;
    assert_approx_eq!(2.0 / 3.0, 1.0 - rate, 0.03);
    Ok(())
}

fn amplified_error_rate<O: Oracle>(
    f: &O,
    bits: u32,
    trials: usize,
    expected: Decision,
    seed: u64,
) -> Result<f64> {
    let solver = Solver::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let batch = 4_000;
    let mut wrong = 0;
    for _ in 0..batch {
        if solver.decide_amplified(f, bits, trials, &mut rng)? != expected {
            wrong += 1;
        }
    }
    Ok(wrong as f64 / batch as f64)
}

#[test]
fn test_amplification_error_is_non_increasing() -> Result<()> {
    let trial_counts = [1, 3, 7, 15, 31];

    let rates = trial_counts
        .iter()
        .map(|&k| {
            amplified_error_rate(&ConstantOracle(false), 4, k, Decision::Constant, 100)
        })
        .collect::<Result<Vec<_>>>()?;
    for pair in rates.windows(2) {
        assert!(pair[1] <= pair[0] + 0.01, "rates {:?}", rates);
    }
    assert!(rates[4] < 0.06, "rates {:?}", rates);

    let rates = trial_counts
        .iter()
        .map(|&k| amplified_error_rate(&ParityOracle, 3, k, Decision::Balanced, 200))
        .collect::<Result<Vec<_>>>()?;
    for pair in rates.windows(2) {
        assert!(pair[1] <= pair[0] + 0.01, "rates {:?}", rates);
    }
    assert!(rates[4] < 0.015, "rates {:?}", rates);
    Ok(())
}
