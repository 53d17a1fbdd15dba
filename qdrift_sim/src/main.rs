//! Q-Drift CLI
//!
//! Quantum-inspired structural drift analyzer: runs the decay engine and
//! presents, exports, and gates on the resulting report.

use clap::{Args, Parser, Subcommand};
use qdrift_core::config::{DEFAULT_NOISE, DEFAULT_SIMULATIONS};
use qdrift_core::SimulationConfig;
use qdrift_sim::render::{distribution_chart, metrics_table, sweep_table};
use qdrift_sim::{to_json_pretty, write_report, DriftEngine, ExecutionMode, NoiseSweep};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit code when the analyzed path is critically fragile
const EXIT_CRITICAL: u8 = 1;

/// Exit code for invalid input or a failed run/export
const EXIT_ERROR: u8 = 2;

/// Q-Drift: structural fragility under probabilistic drift
#[derive(Parser, Debug)]
#[command(name = "qdrift")]
#[command(about = "Quantum-inspired structural drift analyzer", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze structural fragility under probabilistic drift
    Analyze(AnalyzeArgs),

    /// Run the same seeded analysis across a grid of noise levels
    Sweep(SweepArgs),

    /// Show version
    Version,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Number of simulated executions
    #[arg(long, default_value_t = DEFAULT_SIMULATIONS)]
    simulations: u64,

    /// Instability level (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_NOISE, allow_negative_numbers = true)]
    noise: f64,

    /// Deterministic seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Path to export results as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Hide the ASCII distribution graph
    #[arg(long)]
    no_graph: bool,

    /// Disable visual output for CI environments
    #[arg(long = "ci")]
    ci_mode: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Split trials into this many parallel ranges
    #[arg(long)]
    partitions: Option<usize>,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// First noise level
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last noise level (inclusive)
    #[arg(long, default_value_t = 1.0)]
    to: f64,

    /// Number of noise levels
    #[arg(long, default_value_t = 11)]
    steps: usize,

    /// Simulations per noise level
    #[arg(long, default_value_t = DEFAULT_SIMULATIONS)]
    simulations: u64,

    /// Seed shared by every level
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Split trials into this many parallel ranges
    #[arg(long)]
    partitions: Option<usize>,
}

fn execution_mode(partitions: Option<usize>) -> ExecutionMode {
    match partitions {
        Some(partitions) if partitions > 1 => ExecutionMode::Parallel { partitions },
        _ => ExecutionMode::Sequential,
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn analyze(args: AnalyzeArgs) -> ExitCode {
    let config = match SimulationConfig::new(args.simulations, args.noise, args.seed) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let visual = !args.ci_mode && !args.json;
    if visual {
        info!("Q-Drift v{}", env!("CARGO_PKG_VERSION"));
        if let Some(seed) = config.seed() {
            info!("⚙️ Deterministic mode enabled. Seed: {}", seed);
        }
    }

    let engine = DriftEngine::new().with_mode(execution_mode(args.partitions));
    let report = match engine.analyze(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if args.json {
        match to_json_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else if visual {
        if !args.no_graph {
            println!();
            println!("{}", distribution_chart(&report.distribution));
        }
        print!("{}", metrics_table(&report));
    }

    if let Some(path) = &args.output {
        if let Err(e) = write_report(&report, path) {
            eprintln!("Error saving JSON: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        if visual {
            info!("💾 Report saved to: {}", path.display());
        }
    }

    if report.fragility_level().is_critical() {
        ExitCode::from(EXIT_CRITICAL)
    } else {
        ExitCode::SUCCESS
    }
}

fn sweep(args: SweepArgs) -> ExitCode {
    let base = match SimulationConfig::new(args.simulations, args.from, Some(args.seed)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let engine = DriftEngine::new().with_mode(execution_mode(args.partitions));
    match NoiseSweep::new(args.from, args.to, args.steps).run(&engine, &base) {
        Ok(reports) => {
            print!("{}", sweep_table(&reports));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Sweep failed: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(&cli.command, Command::Analyze(args) if args.ci_mode || args.json);
    init_logging(cli.verbose, quiet);

    match cli.command {
        Command::Analyze(args) => analyze(args),
        Command::Sweep(args) => sweep(args),
        Command::Version => {
            println!("qdrift v{} ⚛️", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
    }
}
