//! Command line front end: run one event (or a batch) and print the skill-bucket report.
//! Run with: cargo run --bin simulate -- <players> <reentries> [skill-std-dev]

use clap::{Parser, ValueEnum};
use open_tournament_sim::models::{
    DEFAULT_BUCKETS, DEFAULT_ENTRY_FEE, DEFAULT_SKILL_MEAN, DEFAULT_SKILL_STD_DEV,
};
use open_tournament_sim::{
    run_batch, run_tournament_with_observer, BatchSummary, RoundProgress, SimulationConfig,
    SimulationReport,
};
use std::io;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Simulate a two-day open: swiss with re-entry, then a double-loss knockout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of players entering day one
    players: usize,

    /// Extra day-one runs each player may buy
    reentries: u32,

    /// Standard deviation of player skill (Elo)
    #[arg(default_value_t = DEFAULT_SKILL_STD_DEV)]
    skill_std_dev: f64,

    /// Mean player skill (Elo)
    #[arg(long, default_value_t = DEFAULT_SKILL_MEAN)]
    skill_mean: f64,

    /// Gems charged per entry
    #[arg(long, default_value_t = DEFAULT_ENTRY_FEE)]
    entry_fee: u64,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of skill buckets in the report
    #[arg(short, long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Independent runs to average (each with its own seed)
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            num_players: self.players,
            max_reentries: self.reentries,
            skill_mean: self.skill_mean,
            skill_std_dev: self.skill_std_dev,
            entry_fee: self.entry_fee,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();
    let config = args.config();

    if args.runs > 1 {
        return print_batch(&config, args.runs, args.format);
    }

    let format = args.format;
    let mut print_round = |progress: &RoundProgress| {
        if format == OutputFormat::Text {
            println!("{}", progress);
        }
    };
    let outcome = run_tournament_with_observer(&config, &mut print_round)?;
    let report = SimulationReport::build(&outcome, &config, args.buckets)?;

    match format {
        OutputFormat::Text => {
            for line in report.summary_lines() {
                println!("{}", line);
            }
            if let Some(warning) = report.warning() {
                println!("{}", warning);
            }
            for bucket in &report.buckets {
                println!("{}", bucket);
            }
        }
        OutputFormat::Csv => report.write_csv(io::stdout().lock())?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn print_batch(
    config: &SimulationConfig,
    runs: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcomes = run_batch(config, runs)?;
    let summary = BatchSummary::from_outcomes(&outcomes);
    match format {
        OutputFormat::Text => {
            println!("Runs: {}", summary.runs);
            println!("Average day two players: {:.1}", summary.avg_day_two_players);
            println!("Average 7-win finishers: {:.2}", summary.avg_champions);
            if let Some(skill) = summary.avg_day_two_skill {
                println!("Average day two Elo: {:.1}", skill);
            }
            println!("Average net gems per player: {:.1}", summary.avg_net_gems_per_player);
            if let Some(r) = summary.avg_skill_net_gems_correlation {
                println!("Average skill vs net gems correlation: {:.3}", r);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Csv => return Err("CSV output is only available for single runs".into()),
    }
    Ok(())
}
