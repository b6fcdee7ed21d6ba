//! Estimates how the majority-vote error rate falls as the number of
//! randomized trials grows, and plots it to `amplification.png`.

use anyhow::Result;
use dj_solver::{
    oracle::{ConstantOracle, ParityOracle},
    Decision, Oracle, Solver,
};
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const BATCH: usize = 2_000;

fn error_rate<O: Oracle>(
    solver: &Solver,
    f: &O,
    bits: u32,
    trials: usize,
    expected: Decision,
) -> Result<f64> {
    let mut rng = StdRng::seed_from_u64(trials as u64);
    let mut wrong = 0;
    for _ in 0..BATCH {
        if solver.decide_amplified(f, bits, trials, &mut rng)? != expected {
            wrong += 1;
        }
    }
    Ok(wrong as f64 / BATCH as f64)
}

fn plot_rates(trials: &[usize], series: &[(&str, Vec<f64>)], file_name: &str) -> Result<()> {
    let root = BitMapBackend::new(file_name, (640, 480)).into_drawing_area();

    let x_max = trials.last().copied().unwrap_or(1) as f64;
    let y_max = series
        .iter()
        .flat_map(|(_, rates)| rates.iter().copied())
        .fold(0.0_f64, f64::max)
        .max(0.01);

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Amplified error rate", ("sans-serif", 20))
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("trials (k)")
        .y_desc("error rate")
        .draw()?;

    for (i, (label, rates)) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                trials.iter().zip(rates).map(|(&k, &r)| (k as f64, r)),
                color,
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<()> {
    let solver = Solver::default();
    let trials = (0..20).map(|i| 2 * i + 1).collect::<Vec<usize>>();

    let mut constant = Vec::new();
    let mut balanced = Vec::new();
    println!("{:>4} {:>10} {:>10}", "k", "constant", "balanced");
    for &k in &trials {
        let c = error_rate(&solver, &ConstantOracle(0), 4, k, Decision::Constant)?;
        let b = error_rate(&solver, &ParityOracle, 4, k, Decision::Balanced)?;
        println!("{:>4} {:>10.4} {:>10.4}", k, c, b);
        constant.push(c);
        balanced.push(b);
    }

    plot_rates(
        &trials,
        &[("constant oracle", constant), ("parity oracle", balanced)],
        "amplification.png",
    )?;

    Ok(())
}
