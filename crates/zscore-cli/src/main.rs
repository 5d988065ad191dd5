mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::benchmark::BenchmarkArgs;
use commands::lookup::LookupArgs;
use commands::score::ScoreArgs;

/// Altman Z-Score financial health analysis
#[derive(Parser)]
#[command(
    name = "zscore",
    version,
    about = "Altman Z-Score financial health analysis",
    long_about = "Score a company's bankruptcy risk with the Altman Z-Score using decimal \
                  precision, inspect which statement labels supplied each input, and \
                  benchmark the result against industry or custom peer sets."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML or JSON file with benchmark and cache settings
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a company from its eight Altman inputs
    Score(ScoreArgs),
    /// Resolve a ticker's statements, score it and report data quality
    Lookup(LookupArgs),
    /// Build an industry or custom peer benchmark
    Benchmark(BenchmarkArgs),
    /// Score the worked example company
    Example,
    /// List curated industries and their peer tickers
    Industries,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    // Logs go to stderr so they never mix with command output.
    let json_logging = std::env::var("ZSCORE_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let app_config = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Score(args) => commands::score::run_score(args, &app_config),
        Commands::Lookup(args) => commands::lookup::run_lookup(args, &app_config),
        Commands::Benchmark(args) => commands::benchmark::run_benchmark(args, &app_config),
        Commands::Example => commands::reference::run_example(),
        Commands::Industries => commands::reference::run_industries(),
        Commands::Version => {
            println!("zscore {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
