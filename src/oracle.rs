use std::cell::Cell;
use std::str::FromStr;

use anyhow::Result;

use crate::error::{DecisionError, OracleError};
use crate::solver::{domain_size, query};

/// A black-box function over the n-bit domain `[0, 2^n)`.
///
/// Implementations are expected to be pure: the same input always yields the
/// same output. The decision procedures rely on this and never cache results.
pub trait Oracle {
    type Output: PartialEq;

    fn evaluate(&self, input: u64) -> Result<Self::Output>;
}

impl<F, T> Oracle for F
where
    F: Fn(u64) -> T,
    T: PartialEq,
{
    type Output = T;

    fn evaluate(&self, input: u64) -> Result<T> {
        Ok(self(input))
    }
}

/// Wraps a fallible closure.
pub struct TryFnOracle<F>(pub F);

impl<F, T> Oracle for TryFnOracle<F>
where
    F: Fn(u64) -> Result<T>,
    T: PartialEq,
{
    type Output = T;

    fn evaluate(&self, input: u64) -> Result<T> {
        (self.0)(input)
    }
}

#[derive(Clone, Debug)]
pub struct ConstantOracle<T>(pub T);

impl<T: PartialEq + Clone> Oracle for ConstantOracle<T> {
    type Output = T;

    fn evaluate(&self, _input: u64) -> Result<T> {
        Ok(self.0.clone())
    }
}

/// `x mod 2`, balanced for every bit width.
#[derive(Clone, Copy, Debug)]
pub struct ParityOracle;

impl Oracle for ParityOracle {
    type Output = bool;

    fn evaluate(&self, input: u64) -> Result<bool> {
        Ok(input % 2 == 1)
    }
}

/// Value of a single input bit, `f(x) = x_bit`. Balanced whenever `bit < n`.
#[derive(Clone, Copy, Debug)]
pub struct BitOracle {
    pub bit: u32,
}

impl Oracle for BitOracle {
    type Output = bool;

    fn evaluate(&self, input: u64) -> Result<bool> {
        Ok(input.checked_shr(self.bit).unwrap_or(0) & 1 == 1)
    }
}

/// `x < threshold`. Balanced over n bits exactly when `threshold == 2^(n-1)`.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdOracle {
    pub threshold: u64,
}

impl Oracle for ThresholdOracle {
    type Output = bool;

    fn evaluate(&self, input: u64) -> Result<bool> {
        Ok(input < self.threshold)
    }
}

#[derive(Clone, Debug)]
pub struct TruthTableOracle {
    table: Vec<bool>,
}

impl TruthTableOracle {
    pub fn new(table: Vec<bool>) -> Self {
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl FromStr for TruthTableOracle {
    type Err = OracleError;

    /// Parses a string of `0`/`1` characters, entry `i` being `f(i)`.
    fn from_str(bits: &str) -> std::result::Result<Self, Self::Err> {
        let table = bits
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(OracleError::InvalidSpec(bits.to_string())),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if table.is_empty() {
            return Err(OracleError::InvalidSpec(bits.to_string()));
        }
        Ok(Self { table })
    }
}

impl Oracle for TruthTableOracle {
    type Output = bool;

    fn evaluate(&self, input: u64) -> Result<bool> {
        usize::try_from(input)
            .ok()
            .and_then(|index| self.table.get(index).copied())
            .ok_or_else(|| {
                OracleError::OutOfDomain {
                    input,
                    len: self.table.len(),
                }
                .into()
            })
    }
}

/// Counts how many times the wrapped oracle is evaluated.
pub struct CountingOracle<O> {
    inner: O,
    queries: Cell<u64>,
}

impl<O: Oracle> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            queries: Cell::new(0),
        }
    }

    pub fn queries(&self) -> u64 {
        self.queries.get()
    }

    pub fn reset(&self) {
        self.queries.set(0);
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Oracle> Oracle for CountingOracle<O> {
    type Output = O::Output;

    fn evaluate(&self, input: u64) -> Result<O::Output> {
        self.queries.set(self.queries.get() + 1);
        self.inner.evaluate(input)
    }
}

/// The oracles selectable by name, e.g. from the command line.
#[derive(Clone, Debug)]
pub enum BuiltinOracle {
    Constant(bool),
    Parity,
    Bit(BitOracle),
    Threshold(ThresholdOracle),
    Table(TruthTableOracle),
}

impl FromStr for BuiltinOracle {
    type Err = OracleError;

    /// Accepts `parity`, `constant:<0|1>`, `bit:<k>`, `threshold:<t>` and
    /// `table:<bits>`.
    fn from_str(spec: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || OracleError::InvalidSpec(spec.to_string());
        let (name, arg) = match spec.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (spec, None),
        };

        match (name, arg) {
            ("parity", None) => Ok(BuiltinOracle::Parity),
            ("constant", Some("0" | "false")) => Ok(BuiltinOracle::Constant(false)),
            ("constant", Some("1" | "true")) => Ok(BuiltinOracle::Constant(true)),
            ("bit", Some(bit)) => {
                let bit = bit.parse().map_err(|_| invalid())?;
                Ok(BuiltinOracle::Bit(BitOracle { bit }))
            }
            ("threshold", Some(threshold)) => {
                let threshold = threshold.parse().map_err(|_| invalid())?;
                Ok(BuiltinOracle::Threshold(ThresholdOracle { threshold }))
            }
            ("table", Some(bits)) => Ok(BuiltinOracle::Table(bits.parse()?)),
            _ => Err(invalid()),
        }
    }
}

impl Oracle for BuiltinOracle {
    type Output = bool;

    fn evaluate(&self, input: u64) -> Result<bool> {
        match self {
            BuiltinOracle::Constant(value) => Ok(*value),
            BuiltinOracle::Parity => ParityOracle.evaluate(input),
            BuiltinOracle::Bit(oracle) => oracle.evaluate(input),
            BuiltinOracle::Threshold(oracle) => oracle.evaluate(input),
            BuiltinOracle::Table(oracle) => oracle.evaluate(input),
        }
    }
}

/// Result of checking the constant-or-balanced promise over a whole domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promise {
    Constant,
    Balanced,
    Neither,
}

/// Evaluates every input in `[0, 2^bits)` and reports which promise holds.
///
/// This is a diagnostic for small domains. The decision procedures never call
/// it; they trust the promise.
pub fn classify<O>(f: &O, bits: u32) -> std::result::Result<Promise, DecisionError>
where
    O: Oracle + ?Sized,
{
    let size = domain_size(bits)?;
    let first = query(f, 0)?;
    let mut first_count = 1u64;
    let mut second: Option<O::Output> = None;

    for x in 1..size {
        let value = query(f, x)?;
        if value == first {
            first_count += 1;
            continue;
        }
        if let Some(other) = &second {
            if *other != value {
                return Ok(Promise::Neither);
            }
        } else {
            second = Some(value);
        }
    }

    if first_count == size {
        Ok(Promise::Constant)
    } else if first_count * 2 == size {
        Ok(Promise::Balanced)
    } else {
        Ok(Promise::Neither)
    }
}
