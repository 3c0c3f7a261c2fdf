//! Leaderboard and per-game results for a sheet of game scores.
//!
//! The loader turns a results table into [`MatchRecord`]s. Everything in [`ranking`] and
//! [`alt_rankings`] is a pure function over that record set.

pub mod alt_rankings;
pub mod audit;
pub mod data_loader;
pub mod error;
pub mod ranking;
pub mod ranking_context;
pub mod report;
pub mod util;

pub use data_loader::MatchRecord;
pub use error::{LeaderboardError, Result};
pub use ranking::{
    compute_game_result, compute_leaderboard, compute_win_counts, list_games, GameResult,
    GameResultRow, LeaderboardRow,
};
pub use ranking_context::RankingContext;
