//! Classical decision procedures for the Deutsch-Jozsa problem.
//!
//! Given an oracle promised to be either constant or balanced over the n-bit
//! domain `[0, 2^n)`, decide which case holds.
//!
//! ```
//! use dj_solver::{decide_exact, Decision};
//!
//! let parity = |x: u64| x % 2;
//! assert_eq!(Decision::Balanced, decide_exact(&parity, 3).unwrap());
//! ```

pub mod cancel;
pub mod config;
pub mod decision;
pub mod error;
pub mod oracle;
pub mod solver;
mod test_util;

pub use cancel::CancelToken;
pub use config::SolverConfig;
pub use decision::{Decision, Tally};
pub use error::{ConfigError, DecisionError, OracleError};
pub use oracle::{classify, Oracle, Promise};
pub use solver::{decide_amplified, decide_exact, decide_paired, decide_randomized, Solver};
