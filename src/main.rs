//! Afinar CLI - inference workload tuning lab
//!
//! # Commands
//!
//! - `sweep` - Enumerate a sweep preset's configurations for a harness
//! - `recommend` - Analyze a benchmark corpus and pick the best config per model
//! - `report` - Write a markdown report over a benchmark corpus

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use afinar::{
    generate_recommendations, get_sweep_configs, read_runs, write_report, Constraint,
    LatencyPercentile, ReportOptions, Result, SweepPreset,
};

/// Afinar - latency/throughput tuning lab for inference workloads
#[derive(Parser)]
#[command(name = "afinar")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate a sweep preset's configurations as JSON lines
    ///
    /// Examples:
    ///   afinar sweep cpu_vision --quick
    ///   afinar sweep cpu_text --out results/sweeps/text.jsonl
    Sweep {
        /// Sweep preset (cpu_vision, cpu_text)
        #[arg(value_name = "PRESET")]
        preset: String,

        /// Reduced axis cardinality for fast iteration
        #[arg(short, long)]
        quick: bool,

        /// Write configurations to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the best configuration per model from a corpus
    ///
    /// Examples:
    ///   afinar recommend --input results/runs.jsonl
    ///   afinar recommend --input runs.jsonl --constraint latency --latency-budget-ms 25
    Recommend {
        /// Corpus file (one JSON record per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Optimization constraint (latency, throughput, balanced)
        #[arg(short, long, default_value = "balanced")]
        constraint: String,

        /// Latency percentile the latency constraint reads
        #[arg(long, default_value = "p95")]
        latency_pct: String,

        /// Latency budget in milliseconds for the latency constraint
        #[arg(long, default_value = "50.0")]
        latency_budget_ms: f64,
    },
    /// Write a markdown report over a corpus
    ///
    /// Examples:
    ///   afinar report --input results/runs.jsonl --out reports/latest.md
    Report {
        /// Corpus file (one JSON record per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Report output path
        #[arg(short, long, default_value = "reports/latest.md")]
        out: PathBuf,

        /// Optimization constraint (latency, throughput, balanced)
        #[arg(short, long, default_value = "balanced")]
        constraint: String,

        /// Latency percentile the latency constraint reads
        #[arg(long, default_value = "p95")]
        latency_pct: String,

        /// Latency budget in milliseconds for the latency constraint
        #[arg(long, default_value = "50.0")]
        latency_budget_ms: f64,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sweep { preset, quick, out } => run_sweep(&preset, quick, out.as_deref()),
        Commands::Recommend {
            input,
            constraint,
            latency_pct,
            latency_budget_ms,
        } => run_recommend(&input, &constraint, &latency_pct, latency_budget_ms),
        Commands::Report {
            input,
            out,
            constraint,
            latency_pct,
            latency_budget_ms,
        } => run_report(&input, &out, &constraint, &latency_pct, latency_budget_ms),
    }
}

fn run_sweep(preset: &str, quick: bool, out: Option<&std::path::Path>) -> Result<()> {
    let preset = SweepPreset::parse(preset)?;
    let configs = get_sweep_configs(preset, quick);
    println!("{} configurations for preset {preset}", configs.len());

    match out {
        Some(path) => {
            let mut lines = String::new();
            for config in &configs {
                lines.push_str(&serde_json::to_string(config)?);
                lines.push('\n');
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|source| afinar::AfinarError::Io {
                        path: parent.display().to_string(),
                        source,
                    })?;
                }
            }
            std::fs::write(path, lines).map_err(|source| afinar::AfinarError::Io {
                path: path.display().to_string(),
                source,
            })?;
            println!("Sweep written to {}", path.display());
        },
        None => {
            for config in &configs {
                println!("{}", serde_json::to_string(config)?);
            }
        },
    }
    Ok(())
}

fn run_recommend(
    input: &std::path::Path,
    constraint: &str,
    latency_pct: &str,
    latency_budget_ms: f64,
) -> Result<()> {
    let constraint = Constraint::parse(constraint)?;
    let latency_pct = LatencyPercentile::parse(latency_pct)?;
    let runs = read_runs(input)?;

    let result = generate_recommendations(&runs, constraint, latency_pct, latency_budget_ms);
    if result.recommendations.is_empty() {
        println!("No valid runs found in {}", input.display());
        return Ok(());
    }

    println!("Recommendations ({constraint}):");
    for rec in &result.recommendations {
        println!("  {rec}");
    }
    Ok(())
}

fn run_report(
    input: &std::path::Path,
    out: &std::path::Path,
    constraint: &str,
    latency_pct: &str,
    latency_budget_ms: f64,
) -> Result<()> {
    let opts = ReportOptions {
        constraint: Constraint::parse(constraint)?,
        latency_pct: LatencyPercentile::parse(latency_pct)?,
        latency_budget_ms,
    };
    let runs = read_runs(input)?;
    if runs.is_empty() {
        println!("No runs found in {}", input.display());
        return Ok(());
    }

    write_report(&runs, &opts, out)?;
    println!("Report generated: {}", out.display());
    Ok(())
}
