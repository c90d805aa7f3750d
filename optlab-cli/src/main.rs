//! OptLab CLI: analyze, sweep and price commands.
//!
//! Commands:
//! - `analyze`: rank one strategy family from a TOML config
//! - `sweep`: evaluate every family and print a cross-family leaderboard
//! - `price`: Black-Scholes value of a single call or put
//! - `families`: list the known strategy family names
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); results go to stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

use optlab_core::domain::market::DAYS_PER_YEAR;
use optlab_core::domain::OptionType;
use optlab_core::pricing::{price, DEFAULT_RISK_FREE_RATE};
use optlab_core::{AnalysisResult, FormattedCandidate, StrategyFamily};
use optlab_runner::export::{
    export_candidates_csv, export_json, export_sweep_json, generate_leaderboard_report, generate_report,
    save_artifacts,
};
use optlab_runner::{run_analysis, run_sweep, AnalysisConfig, FamilyLeaderboard, RankingMetric, SweepReport};

#[derive(Parser)]
#[command(name = "optlab", about = "OptLab CLI: option strategy scenario analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the candidates of one strategy family.
    Analyze {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Strategy family; overrides [analysis].family.
        #[arg(long)]
        family: Option<StrategyFamily>,

        /// Return every candidate instead of the truncated views.
        #[arg(long, default_value_t = false)]
        full: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write report.json, candidates.csv and report.md here.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Evaluate every family and rank the best candidates across them.
    Sweep {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Leaderboard size.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Ranking metric: percent_gain or reward_risk_ratio.
        #[arg(long, default_value_t = RankingMetric::PercentGain)]
        metric: RankingMetric,

        /// Output format (csv lists the leaderboard candidates).
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Price a single European option.
    #[command(group(ArgGroup::new("kind").required(true).args(["call", "put"])))]
    Price {
        #[arg(long)]
        call: bool,

        #[arg(long)]
        put: bool,

        #[arg(long)]
        spot: f64,

        #[arg(long)]
        strike: f64,

        /// Calendar days to expiration (0 prices intrinsic value).
        #[arg(long)]
        days: u32,

        /// Annualized implied volatility as a fraction (0.35 = 35%).
        #[arg(long)]
        vol: f64,

        #[arg(long, default_value_t = DEFAULT_RISK_FREE_RATE)]
        rate: f64,
    },
    /// List strategy family names.
    Families,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            config,
            family,
            full,
            format,
            output_dir,
        } => run_analyze_cmd(config, family, full, format, output_dir),
        Commands::Sweep {
            config,
            top,
            metric,
            format,
        } => run_sweep_cmd(config, top, metric, format),
        Commands::Price {
            call,
            put: _,
            spot,
            strike,
            days,
            vol,
            rate,
        } => run_price_cmd(call, spot, strike, days, vol, rate),
        Commands::Families => {
            for family in StrategyFamily::ALL {
                println!("{:<18} {}", family.key(), family.label());
            }
            Ok(())
        }
    }
}

fn load(config_path: &Path, full: bool) -> Result<optlab_runner::ResolvedConfig> {
    let config = AnalysisConfig::from_file(config_path)?;
    let mut resolved = config
        .resolve()
        .with_context(|| format!("invalid config {}", config_path.display()))?;
    resolved.options.full_enumeration |= full;
    tracing::debug!(
        path = %config_path.display(),
        strikes = resolved.ladder.len(),
        days = resolved.inputs.days_to_expiration,
        "config loaded"
    );
    Ok(resolved)
}

fn run_analyze_cmd(
    config_path: PathBuf,
    family: Option<StrategyFamily>,
    full: bool,
    format: OutputFormat,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let resolved = load(&config_path, full)?;
    let report = run_analysis(&resolved, family)?;

    match format {
        OutputFormat::Table => print_result(&report.result),
        OutputFormat::Json => println!("{}", export_json(&report)?),
        OutputFormat::Csv => print!("{}", export_candidates_csv(&report.result.all)?),
        OutputFormat::Markdown => print!("{}", generate_report(&report)),
    }

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&report, &dir)?;
        eprintln!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_sweep_cmd(config_path: PathBuf, top: usize, metric: RankingMetric, format: OutputFormat) -> Result<()> {
    let resolved = load(&config_path, false)?;
    let sweep = run_sweep(&resolved)?;
    let board = sweep.leaderboard(metric, top);

    match format {
        OutputFormat::Table => print_sweep(&sweep, &board),
        OutputFormat::Json => println!("{}", export_sweep_json(&sweep)?),
        OutputFormat::Markdown => print!("{}", generate_leaderboard_report(&board)),
        OutputFormat::Csv => print!("{}", export_candidates_csv(&board.candidates())?),
    }
    Ok(())
}

fn run_price_cmd(call: bool, spot: f64, strike: f64, days: u32, vol: f64, rate: f64) -> Result<()> {
    let option_type = if call { OptionType::Call } else { OptionType::Put };
    let time = f64::from(days) / DAYS_PER_YEAR;
    let value = price(option_type, spot, strike, time, rate, vol)?;
    let kind = match option_type {
        OptionType::Call => "call",
        OptionType::Put => "put",
    };
    println!("{kind} S={spot} K={strike} T={days}d vol={vol} r={rate}: {value:.4}");
    Ok(())
}

// ─── Table output ───────────────────────────────────────────────────

fn print_rows(title: &str, rows: &[FormattedCandidate]) {
    println!("\n{title}");
    println!("{}", "─".repeat(title.chars().count()));
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    let width = rows.iter().map(|r| r.description.len()).max().unwrap_or(0).max(8);
    println!(
        "  {:<width$}  {:>10} {:>9} {:>9} {:>8} {:>8} {:>7}",
        "Strategy", "Entry", "MaxGain", "MaxLoss", "%Gain", "%Loss", "R/R"
    );
    for r in rows {
        println!(
            "  {:<width$}  {:>10} {:>9} {:>9} {:>8} {:>8} {:>7}",
            r.description, r.entry_amount, r.max_gain, r.max_loss, r.percent_gain, r.percent_loss, r.reward_risk_ratio
        );
    }
}

fn print_result(result: &AnalysisResult) {
    let formatted = result.formatted();
    if let Some(first) = formatted.all.first() {
        println!("Scenario: up {} / down {}", first.stock_up, first.stock_down);
    }
    print_rows("Best by % gain", &formatted.by_reward);
    print_rows("Best by reward/risk", &formatted.by_ratio);
    print_rows("All candidates", &formatted.all);
}

fn print_sweep(sweep: &SweepReport, board: &FamilyLeaderboard) {
    println!("Families");
    println!("────────");
    for outcome in &sweep.outcomes {
        match &outcome.error {
            None => println!("  {:<18} {:>5} candidates", outcome.family.key(), outcome.result.all.len()),
            Some(err) => println!("  {:<18} skipped: {err}", outcome.family.key()),
        }
    }

    println!("\nLeaderboard ({})", board.metric());
    println!("───────────");
    for (i, e) in board.entries().iter().enumerate() {
        println!(
            "  {:>3}. {:<20} {:<32} {:>8}",
            i + 1,
            e.family().label(),
            e.candidate.description,
            e.score
        );
    }
}
