//! Runs every decision strategy over a handful of promised oracles, including
//! the 2-bit `x1 == x0` and 8-bit `f(x) = x_3` functions from the classic
//! circuit demonstration.

use anyhow::Result;
use dj_solver::{
    classify,
    oracle::{BitOracle, ConstantOracle, ParityOracle, ThresholdOracle},
    Oracle, Solver,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run<O: Oracle>(name: &str, f: &O, bits: u32, solver: &Solver, rng: &mut StdRng) -> Result<()> {
    let promise = classify(f, bits)?;
    let exact = solver.decide_exact(f, bits)?;
    let paired = solver.decide_paired(f, bits)?;
    let randomized = solver.decide_randomized(f, bits, rng)?;
    let amplified = solver.decide_amplified(f, bits, 25, rng)?;

    println!(
        "{:<12} n={} promise={:<8} exact={:<8} paired={:<8} randomized={:<8} amplified={}",
        name,
        bits,
        format!("{:?}", promise),
        exact,
        paired,
        randomized,
        amplified
    );
    Ok(())
}

fn main() -> Result<()> {
    let solver = Solver::default();
    let mut rng = StdRng::seed_from_u64(2018);

    run("even", &|x: u64| x % 2 == 0, 3, &solver, &mut rng)?;
    run("one", &ConstantOracle(1), 3, &solver, &mut rng)?;
    run("x < 10", &ThresholdOracle { threshold: 10 }, 3, &solver, &mut rng)?;
    run("x < 4", &ThresholdOracle { threshold: 4 }, 3, &solver, &mut rng)?;
    run("parity", &ParityOracle, 5, &solver, &mut rng)?;
    run("x1 == x0", &|x: u64| (x & 1) == (x >> 1 & 1), 2, &solver, &mut rng)?;
    run("x_3", &BitOracle { bit: 3 }, 8, &solver, &mut rng)?;

    Ok(())
}
