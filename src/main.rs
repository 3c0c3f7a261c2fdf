use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use game_leaderboard::alt_rankings::*;
use game_leaderboard::audit::*;
use game_leaderboard::data_loader::*;
use game_leaderboard::ranking::*;
use game_leaderboard::ranking_context::*;
use game_leaderboard::report::*;

/*
    The two views of the dashboard are subcommands. Records are loaded once per invocation and
    every view recomputes from them.
*/

#[derive(Parser)]
#[command(name = "game_leaderboard")]
#[command(about = "Leaderboard and game-by-game results from a sheet of scores", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Results file (CSV, or JSON when it ends in .json). Overrides the config
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall standings by total points, then wins
    Leaderboard {
        /// Rank by wins before points
        #[arg(long)]
        wins_first: bool,
        /// Only show the top N teams
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Ranked results and winner of a single game
    Game {
        /// Game to show, as listed by `games`
        game: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// List the games in the sheet
    Games,
    /// Check the leaderboard against the records it was built from
    Audit {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut ranking_context = match &cli.config {
        Some(path) => RankingContext::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RankingContext::default(),
    };

    if let Some(data) = &cli.data {
        ranking_context.data_path = data.display().to_string();
    }

    let records = load_data(&ranking_context.data_path, &ranking_context)
        .with_context(|| format!("loading results from {}", ranking_context.data_path))?;

    match cli.command {
        Commands::Leaderboard { wins_first, limit, format } => {
            let mut rows = if wins_first {
                wins_first_standings(&records)?
            } else {
                compute_leaderboard(&records)?
            };

            if let Some(limit) = limit {
                ranking_context.set_leaderboard_limit(limit).context("invalid --limit")?;
            }

            if let Some(limit) = ranking_context.leaderboard_limit {
                rows.truncate(limit);
            }

            match format {
                OutputFormat::Table => {
                    let leader = if records.is_empty() { "-".to_string() } else { current_leader(&records)? };
                    print!("{}", LeaderboardTable { title: &ranking_context.title, leader: &leader, rows: &rows });
                }
                OutputFormat::Json => println!("{}", to_json(&rows)?),
            }
        }
        Commands::Game { game, format } => {
            let result = compute_game_result(&records, &game)?;

            match format {
                OutputFormat::Table => print!("{}", GameResultTable(&result)),
                OutputFormat::Json => println!("{}", to_json(&result)?),
            }
        }
        Commands::Games => {
            print!("{}", GameList(&list_games(&records)));
        }
        Commands::Audit { format } => {
            let rows = compute_leaderboard(&records)?;
            let report = audit_leaderboard(&records, &rows);

            match format {
                OutputFormat::Table => print!("{}", AuditSummary(&report)),
                OutputFormat::Json => println!("{}", to_json(&report)?),
            }

            if !report.passed() {
                bail!("{} audit checks failed", report.failures().count());
            }
        }
    }

    Ok(())
}
