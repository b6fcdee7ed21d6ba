//! Constant-vs-balanced decision procedures.
//!
//! Every strategy assumes the Deutsch-Jozsa promise: the oracle is either
//! constant on `[0, 2^n)` or maps exactly half of the domain to each of two
//! values. Oracles breaking the promise are not detected and may get either
//! answer. Use [`crate::oracle::classify`] to check a small oracle by brute
//! force.

use rand::Rng;
use rand_distr::Bernoulli;
use tracing::{debug, trace};

use crate::cancel::CancelToken;
use crate::config::SolverConfig;
use crate::decision::{Decision, Tally};
use crate::error::{ConfigError, DecisionError};
use crate::oracle::Oracle;

pub type Result<T> = std::result::Result<T, DecisionError>;

/// Largest bit width whose domain still fits in a `u64`.
pub const MAX_BITS: u32 = 63;

pub fn domain_size(bits: u32) -> Result<u64> {
    if bits == 0 || bits > MAX_BITS {
        return Err(DecisionError::InvalidBitWidth { bits });
    }
    Ok(1 << bits)
}

pub(crate) fn query<O>(f: &O, input: u64) -> Result<O::Output>
where
    O: Oracle + ?Sized,
{
    f.evaluate(input)
        .map_err(|source| DecisionError::OracleFailure { input, source })
}

#[derive(Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Deterministic Deutsch-Jozsa bound: compares `f(1) ..= f(2^(n-1))`
    /// against `f(0)`.
    ///
    /// A balanced function cannot agree on `2^(n-1) + 1` inputs, so under the
    /// promise the answer is exact. Uses at least 2 and at most
    /// `2^(n-1) + 1` queries.
    pub fn decide_exact<O>(&self, f: &O, bits: u32) -> Result<Decision>
    where
        O: Oracle + ?Sized,
    {
        exact(f, bits, None)
    }

    /// Same as [`Solver::decide_exact`], checking `cancel` before each query.
    ///
    /// Stops with [`DecisionError::Cancelled`] once the token is tripped.
    pub fn decide_exact_with_cancel<O>(
        &self,
        f: &O,
        bits: u32,
        cancel: &CancelToken,
    ) -> Result<Decision>
    where
        O: Oracle + ?Sized,
    {
        exact(f, bits, Some(cancel))
    }

    /// Compares `f(i)` with `f(2^n - 1 - i)` for `i` in `0 ..= n / 4`.
    ///
    /// This is a heuristic. It looks at far fewer inputs than
    /// [`Solver::decide_exact`] and can report `Constant` for a balanced
    /// function whose disagreements all fall outside the sampled pairs.
    pub fn decide_paired<O>(&self, f: &O, bits: u32) -> Result<Decision>
    where
        O: Oracle + ?Sized,
    {
        let last = domain_size(bits)? - 1;
        let pairs = u64::from(bits / 4);

        for i in 0..=pairs {
            let low = query(f, i)?;
            let high = query(f, last - i)?;
            let agree = low == high;
            trace!(i, mirror = last - i, agree, "paired sample");
            if !agree {
                debug!(bits, queries = 2 * (i + 1), "paired: balanced");
                return Ok(Decision::Balanced);
            }
        }

        debug!(bits, queries = 2 * (pairs + 1), "paired: constant");
        Ok(Decision::Constant)
    }

    /// Queries one random pair of distinct inputs.
    ///
    /// Disagreement proves `Balanced`. Agreement is only weak evidence, so the
    /// answer is then a biased coin: `Balanced` with the configured
    /// probability (1/3 by default), `Constant` otherwise. A constant oracle
    /// is therefore misreported a third of the time; see
    /// [`Solver::decide_amplified`].
    pub fn decide_randomized<O, R>(&self, f: &O, bits: u32, rng: &mut R) -> Result<Decision>
    where
        O: Oracle + ?Sized,
        R: Rng,
    {
        let (a, b) = self.distinct_pair(bits, rng)?;
        let fa = query(f, a)?;
        let fb = query(f, b)?;

        if fa != fb {
            trace!(a, b, "randomized: pair disagrees");
            return Ok(Decision::Balanced);
        }

        let decision = if rng.sample(self.coin()?) {
            Decision::Balanced
        } else {
            Decision::Constant
        };
        trace!(a, b, %decision, "randomized: pair agrees, guessing");
        Ok(decision)
    }

    /// Majority vote over `trials` independent [`Solver::decide_randomized`]
    /// runs. Ties go to `Constant`.
    pub fn decide_amplified<O, R>(
        &self,
        f: &O,
        bits: u32,
        trials: usize,
        rng: &mut R,
    ) -> Result<Decision>
    where
        O: Oracle + ?Sized,
        R: Rng,
    {
        Ok(self.amplified_tally(f, bits, trials, rng)?.majority())
    }

    /// Runs exactly `trials` randomized decisions and returns the vote split.
    pub fn amplified_tally<O, R>(
        &self,
        f: &O,
        bits: u32,
        trials: usize,
        rng: &mut R,
    ) -> Result<Tally>
    where
        O: Oracle + ?Sized,
        R: Rng,
    {
        if trials == 0 {
            return Err(DecisionError::InvalidTrialCount { trials });
        }
        domain_size(bits)?;

        let mut tally = Tally::default();
        for _ in 0..trials {
            tally.record(self.decide_randomized(f, bits, rng)?);
        }

        debug!(
            bits,
            trials,
            balanced = tally.balanced,
            constant = tally.constant,
            "amplified vote"
        );
        Ok(tally)
    }

    fn coin(&self) -> Result<Bernoulli> {
        Bernoulli::new(self.config.balanced_guess_probability)
            .map_err(|err| ConfigError::Invalid(err.to_string()).into())
    }

    fn distinct_pair<R>(&self, bits: u32, rng: &mut R) -> Result<(u64, u64)>
    where
        R: Rng,
    {
        let size = domain_size(bits)?;
        let attempts = self.config.max_resamples;

        for _ in 0..attempts {
            let a = rng.random_range(0..size);
            let b = rng.random_range(0..size);
            if a != b {
                return Ok((a, b));
            }
        }

        Err(DecisionError::ResampleLimitExceeded { attempts })
    }
}

fn exact<O>(f: &O, bits: u32, cancel: Option<&CancelToken>) -> Result<Decision>
where
    O: Oracle + ?Sized,
{
    let half = domain_size(bits)? / 2;
    let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

    if cancelled() {
        return Err(DecisionError::Cancelled { queried: 0 });
    }
    let reference = query(f, 0)?;

    for c in 1..=half {
        if cancelled() {
            return Err(DecisionError::Cancelled { queried: c });
        }
        if query(f, c)? != reference {
            debug!(bits, queries = c + 1, "exact: balanced");
            return Ok(Decision::Balanced);
        }
    }

    debug!(bits, queries = half + 1, "exact: constant");
    Ok(Decision::Constant)
}

/// [`Solver::decide_exact`] with the default configuration.
pub fn decide_exact<O>(f: &O, bits: u32) -> Result<Decision>
where
    O: Oracle + ?Sized,
{
    exact(f, bits, None)
}

/// [`Solver::decide_paired`] with the default configuration.
pub fn decide_paired<O>(f: &O, bits: u32) -> Result<Decision>
where
    O: Oracle + ?Sized,
{
    Solver::default().decide_paired(f, bits)
}

/// [`Solver::decide_randomized`] with the default configuration and the
/// thread-local RNG.
pub fn decide_randomized<O>(f: &O, bits: u32) -> Result<Decision>
where
    O: Oracle + ?Sized,
{
    Solver::default().decide_randomized(f, bits, &mut rand::rng())
}

/// [`Solver::decide_amplified`] with the default configuration and the
/// thread-local RNG.
pub fn decide_amplified<O>(f: &O, bits: u32, trials: usize) -> Result<Decision>
where
    O: Oracle + ?Sized,
{
    Solver::default().decide_amplified(f, bits, trials, &mut rand::rng())
}
