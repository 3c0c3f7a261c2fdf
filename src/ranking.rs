use serde::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::data_loader::*;
use crate::error::{LeaderboardError, Result};

/*
    Everything in here is a pure function of the record set. Nothing is cached between calls,
    so the dashboard simply recomputes on every render.
*/

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub team: String,
    pub total_points: f64,
    pub wins: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameResultRow {
    pub rank: usize,
    pub team: String,
    pub points: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameResult {
    pub game: String,
    pub winner: String,
    pub rows: Vec<GameResultRow>,
}

// Winner of every game, in order of the game's first appearance. On a points tie the record
// that comes first in the input keeps the win.
pub fn game_winners(records: &[MatchRecord]) -> Result<Vec<(&str, &str)>> {
    validate_records(records)?;
    if records.is_empty() {
        return Err(LeaderboardError::EmptyInput);
    }

    let mut game_idx: HashMap<&str, usize> = HashMap::new();
    let mut leaders: Vec<&MatchRecord> = Vec::new();

    for record in records {
        match game_idx.get(record.game.as_str()) {
            Some(&idx) => {
                // Strictly greater, so earlier records win ties
                if record.points > leaders[idx].points {
                    leaders[idx] = record;
                }
            }
            None => {
                game_idx.insert(record.game.as_str(), leaders.len());
                leaders.push(record);
            }
        }
    }

    Ok(leaders.into_iter().map(|r| (r.game.as_str(), r.team.as_str())).collect())
}

// Only teams that won at least one game show up. Callers have to read a missing team as zero.
pub fn compute_win_counts(records: &[MatchRecord]) -> Result<BTreeMap<String, u32>> {
    let mut win_counts: BTreeMap<String, u32> = BTreeMap::new();

    for (_, team) in game_winners(records)? {
        *win_counts.entry(team.to_string()).or_insert(0) += 1;
    }

    log::debug!("Counted wins for {} teams", win_counts.len());
    Ok(win_counts)
}

// Standings over every game: total points first, wins second. Teams are grouped in name order,
// which is also the order equal rows keep.
pub fn compute_leaderboard(records: &[MatchRecord]) -> Result<Vec<LeaderboardRow>> {
    validate_records(records)?;
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let win_counts = compute_win_counts(records)?;
    let mut rows = team_totals(records, &win_counts);

    rows.sort_by(by_points_then_wins);
    assign_ranks(&mut rows);

    log::debug!("Built leaderboard with {} teams", rows.len());
    Ok(rows)
}

pub fn compute_game_result(records: &[MatchRecord], game: &str) -> Result<GameResult> {
    validate_records(records)?;
    if records.is_empty() {
        return Err(LeaderboardError::EmptyInput);
    }

    let mut game_records: Vec<&MatchRecord> = records.iter().filter(|r| r.game == game).collect();

    // Stable, so equal scores keep input order and the first one is the winner
    game_records.sort_by(|a, b| b.points.total_cmp(&a.points));

    let rows: Vec<GameResultRow> = game_records
        .iter()
        .enumerate()
        .map(|(idx, r)| GameResultRow {
            rank: idx + 1,
            team: r.team.clone(),
            points: r.points,
        })
        .collect();

    let Some(first) = rows.first() else {
        return Err(LeaderboardError::UnknownGame(game.to_string()));
    };

    Ok(GameResult {
        game: game.to_string(),
        winner: first.team.clone(),
        rows,
    })
}

// Distinct games in order of first appearance, for the game picker
pub fn list_games(records: &[MatchRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut games = Vec::new();

    for record in records {
        if seen.insert(record.game.as_str()) {
            games.push(record.game.clone());
        }
    }

    games
}

// Unranked rows, one per team in name order, with zero wins filled in
pub(crate) fn team_totals(records: &[MatchRecord], win_counts: &BTreeMap<String, u32>) -> Vec<LeaderboardRow> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.team.as_str()).or_insert(0.0) += record.points;
    }

    totals
        .into_iter()
        .map(|(team, total_points)| LeaderboardRow {
            rank: 0,
            team: team.to_string(),
            total_points,
            wins: win_counts.get(team).copied().unwrap_or(0),
        })
        .collect()
}

pub(crate) fn assign_ranks(rows: &mut [LeaderboardRow]) {
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
}

fn by_points_then_wins(a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
    b.total_points
        .total_cmp(&a.total_points)
        .then_with(|| b.wins.cmp(&a.wins))
}
