//! Tournament CLI
//!
//! Play AI tiers against each other and rank them by Elo and by points.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use opponent::{AiConfig, Difficulty, Opponent};
use serde::Deserialize;
use tournament::{participant_names, EloTracker, MatchConfig, MatchRunner, TournamentResults};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Tic-tac-toe tier tournament runner
#[derive(Parser, Debug)]
#[command(name = "tournament")]
#[command(about = "Play tic-tac-toe AI tiers against each other", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one match between two tiers
    Match {
        /// First tier (easy, medium, hard, very-hard)
        tier_a: Difficulty,
        /// Second tier
        tier_b: Difficulty,
        #[command(flatten)]
        opts: MatchOpts,
    },
    /// Round robin of every tier with an Elo leaderboard
    Ladder {
        #[command(flatten)]
        opts: MatchOpts,
    },
}

#[derive(Args, Debug)]
struct MatchOpts {
    /// Games per match
    #[arg(short, long)]
    games: Option<u32>,
    /// Board side length (3 or 4)
    #[arg(short, long)]
    size: Option<usize>,
    /// VERY HARD time budget per move in milliseconds
    #[arg(long)]
    budget_ms: Option<u64>,
    /// TOML file with `[ai]` and `[match]` sections
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for reproducible matches
    #[arg(long)]
    seed: Option<u64>,
    /// Print results as JSON instead of a text report
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    ai: AiConfig,
    #[serde(rename = "match")]
    match_config: MatchConfig,
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
    let Some(path) = path else {
        return Ok(ConfigFile::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let file: ConfigFile =
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    file.ai.validate()?;
    Ok(file)
}

fn setup(opts: &MatchOpts) -> Result<(MatchConfig, Opponent)> {
    let file = load_config(opts.config.as_deref())?;
    let mut config = file.match_config;
    if let Some(games) = opts.games {
        config.num_games = games;
    }
    if let Some(size) = opts.size {
        config.board_size = size;
    }
    if opts.budget_ms.is_some() {
        config.budget_ms = opts.budget_ms;
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }

    let opponent = match config.seed {
        Some(seed) => Opponent::with_seed(file.ai, seed)?,
        None => Opponent::new(file.ai)?,
    };
    Ok((config, opponent))
}

fn print_results(results: &TournamentResults, tracker: &EloTracker, json: bool) -> Result<()> {
    if json {
        println!("{}", results.to_json()?);
    } else {
        println!("{}", results.generate_report());
        println!("{}", tracker.format_leaderboard());
    }
    Ok(())
}

fn run_match(tier_a: Difficulty, tier_b: Difficulty, opts: MatchOpts) -> Result<()> {
    let (config, mut opponent) = setup(&opts)?;
    info!(%tier_a, %tier_b, games = config.num_games, size = config.board_size, "starting match");

    let mut runner = MatchRunner::new(config.clone());
    let result = runner.run_match(&mut opponent, tier_a, tier_b)?;

    let (name_a, name_b) = participant_names(tier_a, tier_b);
    let mut tracker = EloTracker::new();
    tracker.update_ratings(&name_a, &name_b, &result);

    let mut results = TournamentResults::new(
        &format!("{name_a} vs {name_b}"),
        vec![name_a.clone(), name_b.clone()],
        config,
    );
    results.add_match(&name_a, &name_b, result);
    results.scoreboard = runner.scoreboard().clone();

    print_results(&results, &tracker, opts.json)?;
    println!("{name_a} score: {:.1}%", result.score() * 100.0);
    Ok(())
}

fn run_ladder(opts: MatchOpts) -> Result<()> {
    let (config, mut opponent) = setup(&opts)?;
    info!(games = config.num_games, size = config.board_size, "starting ladder");

    let mut runner = MatchRunner::new(config.clone());
    let mut tracker = EloTracker::new();
    let mut results = TournamentResults::new(
        "Ladder",
        Difficulty::ALL.iter().map(|t| t.to_string()).collect(),
        config,
    );

    for (i, &tier_a) in Difficulty::ALL.iter().enumerate() {
        for &tier_b in &Difficulty::ALL[i + 1..] {
            let result = runner.run_match(&mut opponent, tier_a, tier_b)?;
            tracker.update_ratings(tier_a.as_str(), tier_b.as_str(), &result);
            results.add_match(tier_a.as_str(), tier_b.as_str(), result);
        }
    }
    results.scoreboard = runner.scoreboard().clone();

    // rating order should follow tier order
    let mut ratings: Vec<(Difficulty, f64)> = Difficulty::ALL
        .iter()
        .map(|&t| (t, tracker.get_rating(t.as_str())))
        .collect();
    ratings.sort_by(|a, b| a.1.total_cmp(&b.1));
    if ratings.iter().map(|(t, _)| *t).ne(Difficulty::ALL) {
        warn!(?ratings, "tier ratings are out of order");
    }

    print_results(&results, &tracker, opts.json)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Match {
            tier_a,
            tier_b,
            opts,
        } => run_match(tier_a, tier_b, opts),
        Command::Ladder { opts } => run_ladder(opts),
    }
}
