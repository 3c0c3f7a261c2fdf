use crate::data_loader::*;
use crate::error::{LeaderboardError, Result};
use crate::ranking::*;

// The banner above the leaderboard only looks at points. Teams are walked in name order and
// the first one holding the highest total keeps the title.
pub fn current_leader(records: &[MatchRecord]) -> Result<String> {
    validate_records(records)?;

    let totals = team_totals(records, &Default::default());

    let mut leader: Option<&LeaderboardRow> = None;
    for row in &totals {
        match leader {
            Some(l) if row.total_points <= l.total_points => {}
            _ => leader = Some(row),
        }
    }

    leader
        .map(|l| l.team.clone())
        .ok_or(LeaderboardError::EmptyInput)
}

// Same rows as the leaderboard, but a win counts for more than any amount of points
pub fn wins_first_standings(records: &[MatchRecord]) -> Result<Vec<LeaderboardRow>> {
    validate_records(records)?;
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let win_counts = compute_win_counts(records)?;
    let mut rows = team_totals(records, &win_counts);

    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.total_points.total_cmp(&a.total_points))
    });
    assign_ranks(&mut rows);

    Ok(rows)
}
