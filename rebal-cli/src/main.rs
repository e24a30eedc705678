//! Rebal CLI — rebalancing policy runs, parameter sweeps, and synthetic data.
//!
//! Commands:
//! - `run` — compute the policy for a price CSV (or synthetic data) and save
//!   the policy tape and report under the output directory
//! - `sweep` — run the engine over a grid of cost rates and increments
//! - `synth` — write a seeded synthetic price CSV for experiments

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use rebal_core::engine::{BandMode, PolicyParams};
use rebal_core::ReturnSeries;
use rebal_runner::{
    load_prices, run_rebalance, run_sweep, save_artifacts, synthetic_prices, ParamGrid,
    PriceSeries, RunConfig, RunOutcome,
};

#[derive(Parser)]
#[command(name = "rebal", about = "Two-asset rebalancing policy engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the rebalancing policy and save artifacts.
    Run {
        /// Price CSV with close_a/close_b columns (date optional).
        #[arg(long)]
        data: Option<PathBuf>,

        /// TOML run configuration. Defaults apply without it.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use seeded synthetic prices instead of a file.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Days of synthetic data.
        #[arg(long, default_value_t = 252)]
        days: usize,

        /// Synthetic generator seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Override: weight grid increment.
        #[arg(long)]
        delta: Option<f64>,

        /// Override: initial capital in currency units.
        #[arg(long)]
        capital: Option<f64>,

        /// Override: asset A cost rate in basis points.
        #[arg(long)]
        cost_a_bps: Option<f64>,

        /// Override: asset B cost rate in basis points.
        #[arg(long)]
        cost_b_bps: Option<f64>,

        /// Override: band scan mode (asymmetric or symmetric).
        #[arg(long)]
        band_mode: Option<String>,
    },
    /// Run the engine over a grid of cost rates and increments.
    Sweep {
        /// Price CSV with close_a/close_b columns.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Use seeded synthetic prices instead of a file.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Days of synthetic data.
        #[arg(long, default_value_t = 252)]
        days: usize,

        /// Synthetic generator seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Asset A cost rates to sweep, in basis points.
        #[arg(long, value_delimiter = ',', default_value = "30,60,120")]
        cost_a_bps: Vec<f64>,

        /// Asset B cost rates to sweep, in basis points.
        #[arg(long, value_delimiter = ',', default_value = "20,40,80")]
        cost_b_bps: Vec<f64>,

        /// Grid increments to sweep.
        #[arg(long, value_delimiter = ',', default_value = "0.001,0.0005")]
        deltas: Vec<f64>,

        /// Optional JSON output path for the full sweep table.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a seeded synthetic price CSV.
    Synth {
        /// Days to generate.
        #[arg(long, default_value_t = 252)]
        days: usize,

        /// Generator seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output CSV path.
        #[arg(long, default_value = "synthetic.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            synthetic,
            days,
            seed,
            output_dir,
            delta,
            capital,
            cost_a_bps,
            cost_b_bps,
            band_mode,
        } => run_cmd(
            data, config, synthetic, days, seed, output_dir, delta, capital, cost_a_bps,
            cost_b_bps, band_mode,
        ),
        Commands::Sweep {
            data,
            synthetic,
            days,
            seed,
            cost_a_bps,
            cost_b_bps,
            deltas,
            output,
        } => sweep_cmd(data, synthetic, days, seed, cost_a_bps, cost_b_bps, deltas, output),
        Commands::Synth { days, seed, output } => synth_cmd(days, seed, &output),
    }
}

fn load_or_generate(
    data: Option<&Path>,
    synthetic: bool,
    days: usize,
    seed: u64,
) -> Result<PriceSeries> {
    match (data, synthetic) {
        (Some(_), true) => bail!("--data and --synthetic are mutually exclusive"),
        (Some(path), false) => Ok(load_prices(path)?),
        (None, true) => Ok(synthetic_prices(days, seed)),
        (None, false) => bail!("one of --data or --synthetic is required"),
    }
}

fn parse_band_mode(s: &str) -> Result<BandMode> {
    match s {
        "asymmetric" => Ok(BandMode::Asymmetric),
        "symmetric" => Ok(BandMode::Symmetric),
        _ => bail!("unknown band mode '{s}'. Valid: asymmetric, symmetric"),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    data: Option<PathBuf>,
    config_path: Option<PathBuf>,
    synthetic: bool,
    days: usize,
    seed: u64,
    output_dir: PathBuf,
    delta: Option<f64>,
    capital: Option<f64>,
    cost_a_bps: Option<f64>,
    cost_b_bps: Option<f64>,
    band_mode: Option<String>,
) -> Result<()> {
    let prices = load_or_generate(data.as_deref(), synthetic, days, seed)?;

    let mut config = match config_path {
        Some(path) => RunConfig::from_toml_file(&path)?,
        None => RunConfig::new("rebal"),
    };
    if let Some(v) = delta {
        config.policy.delta = v;
    }
    if let Some(v) = capital {
        config.policy.initial_capital = v;
    }
    if let Some(v) = cost_a_bps {
        config.policy.cost_a_bps = v;
    }
    if let Some(v) = cost_b_bps {
        config.policy.cost_b_bps = v;
    }
    if let Some(s) = band_mode {
        config.policy.band_mode = parse_band_mode(&s)?;
    }

    let outcome = run_rebalance(&config, &prices)?;
    print_summary(&outcome);

    let paths = save_artifacts(&output_dir, &outcome, &prices.dates)?;
    println!("Policy tape: {}", paths.policy_csv.display());
    println!("Report:      {}", paths.report_json.display());

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn sweep_cmd(
    data: Option<PathBuf>,
    synthetic: bool,
    days: usize,
    seed: u64,
    cost_a_bps: Vec<f64>,
    cost_b_bps: Vec<f64>,
    deltas: Vec<f64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let prices = load_or_generate(data.as_deref(), synthetic, days, seed)?;
    let series = ReturnSeries::from_prices(&prices.close_a, &prices.close_b)
        .map_err(rebal_core::engine::EngineError::from)?;

    let grid = ParamGrid { cost_a_bps, cost_b_bps, deltas };
    let results = run_sweep(&series, &grid, &PolicyParams::default())?;

    println!(
        "{:>8} {:>10} {:>10} {:>8} {:>10} {:>14}",
        "delta", "cost_a_bp", "cost_b_bp", "w_opt", "rebalances", "total_tc"
    );
    for entry in &results.entries {
        println!(
            "{:>8} {:>10} {:>10} {:>8.4} {:>10} {:>14.2}",
            entry.params.delta,
            entry.params.cost_a_bps,
            entry.params.cost_b_bps,
            entry.optimal_weight_a,
            entry.rebalance_count,
            entry.total_transaction_cost,
        );
    }
    if let Some(best) = results.quietest() {
        println!();
        println!(
            "Quietest point: delta={} cost_a={}bp cost_b={}bp ({} rebalances)",
            best.params.delta,
            best.params.cost_a_bps,
            best.params.cost_b_bps,
            best.rebalance_count
        );
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(&path, json)?;
        println!("Sweep table: {}", path.display());
    }

    Ok(())
}

fn synth_cmd(days: usize, seed: u64, output: &Path) -> Result<()> {
    let prices = synthetic_prices(days, seed);
    let mut file = std::fs::File::create(output)?;
    writeln!(file, "close_a,close_b")?;
    for (a, b) in prices.close_a.iter().zip(&prices.close_b) {
        writeln!(file, "{a:.6},{b:.6}")?;
    }
    println!("Wrote {days} days to {}", output.display());
    Ok(())
}

fn print_summary(outcome: &RunOutcome) {
    let report = &outcome.report;
    println!();
    println!("=== Rebalancing Policy ===");
    println!("Run:                {}", report.name);
    println!("Run id:             {}", &report.run_id[..16]);
    println!("Days:               {}", report.days);
    println!("Optimal weight A:   {:.4}", report.optimal_weight_a);
    println!();
    println!("--- Outcome ---");
    println!("Rebalances:         {}", report.rebalance_count);
    println!("Transaction cost:   {:.2}", report.total_transaction_cost);
    println!("Drift cost (hold):  {:.2}", report.benchmark_drift_cost);
    println!("Max excursion:      {:.4}", report.max_weight_excursion);
    println!("Final weight A:     {:.4}", report.final_weight_a);
    println!("Final capital:      {:.2}", report.final_capital);
    println!(
        "Total return:       {:.2}%",
        report.realized_total_return * 100.0
    );
    if report.synthetic_data {
        println!();
        println!("WARNING: Results based on SYNTHETIC data");
    }
    println!();
}
