use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dj_solver::oracle::{BuiltinOracle, CountingOracle};
use dj_solver::{Decision, Solver, SolverConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    Exact,
    Paired,
    Randomized,
    Amplified,
}

/// Decide whether a promised oracle is constant or balanced.
#[derive(Parser, Debug)]
#[command(name = "dj-solver", version)]
struct Args {
    /// Oracle to query: parity, constant:<0|1>, bit:<k>, threshold:<t> or
    /// table:<bits>.
    #[arg(short, long)]
    oracle: BuiltinOracle,

    /// Bit width of the input domain.
    #[arg(short = 'n', long)]
    bits: u32,

    #[arg(short, long, value_enum, default_value_t = Strategy::Exact)]
    strategy: Strategy,

    /// Number of randomized trials for the amplified strategy.
    #[arg(short = 'k', long)]
    trials: Option<usize>,

    /// Seed for the randomized strategies, overriding the config.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with solver settings.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => SolverConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SolverConfig::default(),
    };
    let seed = args.seed.or(config.seed);
    let trials = args.trials.unwrap_or(config.default_trials);
    let solver = Solver::new(config)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let oracle = CountingOracle::new(args.oracle);
    info!(strategy = ?args.strategy, bits = args.bits, "deciding");

    let decision: Decision = match args.strategy {
        Strategy::Exact => solver.decide_exact(&oracle, args.bits)?,
        Strategy::Paired => solver.decide_paired(&oracle, args.bits)?,
        Strategy::Randomized => solver.decide_randomized(&oracle, args.bits, &mut rng)?,
        Strategy::Amplified => {
            let tally = solver.amplified_tally(&oracle, args.bits, trials, &mut rng)?;
            println!(
                "votes: {} balanced, {} constant",
                tally.balanced, tally.constant
            );
            tally.majority()
        }
    };

    println!("{}", decision);
    println!("queries: {}", oracle.queries());

    Ok(())
}
