use serde::*;
use std::collections::HashSet;

use crate::data_loader::*;
use crate::ranking::*;
use crate::util::*;

#[derive(Serialize, Debug, Clone)]
pub struct AuditCheck {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct AuditReport {
    pub checks: Vec<AuditCheck>,
}

impl AuditReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &AuditCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    fn push(&mut self, name: &'static str, passed: bool, detail: String) {
        if !passed {
            log::warn!("Audit check '{name}' failed: {detail}");
        }
        self.checks.push(AuditCheck { name, passed, detail });
    }
}

// Checks a computed leaderboard against the record set it came from. Every check runs, so a
// broken table shows all of its problems at once.
pub fn audit_leaderboard(records: &[MatchRecord], rows: &[LeaderboardRow]) -> AuditReport {
    let mut report = AuditReport::default();

    // Ranks are 1..N with N the number of distinct teams
    let team_count = records.iter().map(|r| r.team.as_str()).collect::<HashSet<_>>().len();
    let dense = rows.len() == team_count && rows.iter().enumerate().all(|(idx, r)| r.rank == idx + 1);
    report.push(
        "rank density",
        dense,
        format!("{} rows for {} teams", rows.len(), team_count),
    );

    let teams_in_table = rows.iter().map(|r| r.team.as_str()).collect::<HashSet<_>>();
    report.push(
        "one row per team",
        teams_in_table.len() == rows.len() && records.iter().all(|r| teams_in_table.contains(r.team.as_str())),
        format!("{} distinct teams in table", teams_in_table.len()),
    );

    let input_points = sum_points(records.iter().map(|r| &r.points));
    let table_points = sum_points(rows.iter().map(|r| &r.total_points));
    report.push(
        "points conservation",
        approx_eq(input_points, table_points),
        format!("records sum to {}, table sums to {}", format_points(input_points), format_points(table_points)),
    );

    let game_count = list_games(records).len();
    let win_total: u64 = rows.iter().map(|r| r.wins as u64).sum();
    report.push(
        "win total",
        win_total == game_count as u64,
        format!("{win_total} wins handed out over {game_count} games"),
    );

    let mut out_of_order = Vec::new();
    for pair in rows.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        if upper.total_points < lower.total_points
            || (upper.total_points == lower.total_points && upper.wins < lower.wins)
        {
            out_of_order.push(format!("{} above {}", upper.team, lower.team));
        }
    }
    report.push(
        "monotonic ordering",
        out_of_order.is_empty(),
        if out_of_order.is_empty() { "ordered".to_string() } else { out_of_order.join(", ") },
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn records() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new("A", "X", 10.0),
            MatchRecord::new("A", "Y", 7.0),
            MatchRecord::new("B", "X", 3.0),
            MatchRecord::new("B", "Y", 9.0),
            MatchRecord::new("B", "Z", 0.5),
        ]
    }

    #[test]
    fn test_computed_leaderboard_passes() {
        let records = records();
        let rows = compute_leaderboard(&records).unwrap();
        let report = audit_leaderboard(&records, &rows);
        assert!(report.passed(), "{:?}", report.failures().collect::<Vec<_>>());
        assert_eq!(report.checks.len(), 5);
    }

    #[test]
    fn test_empty_leaderboard_passes() {
        assert!(audit_leaderboard(&[], &[]).passed());
    }

    #[test]
    fn test_detects_tampered_table() {
        let records = records();
        let mut rows = compute_leaderboard(&records).unwrap();
        rows.swap(0, 1);
        rows[2].wins = 1;
        rows[2].rank = 4;

        let report = audit_leaderboard(&records, &rows);
        let failed: Vec<&str> = report.failures().map(|c| c.name).collect();
        assert_eq!(failed, vec!["rank density", "win total", "monotonic ordering"]);
    }

    #[test]
    fn test_detects_missing_team() {
        let records = records();
        let mut rows = compute_leaderboard(&records).unwrap();
        rows.pop();

        let report = audit_leaderboard(&records, &rows);
        let failed: Vec<&str> = report.failures().map(|c| c.name).collect();
        assert_eq!(failed, vec!["rank density", "one row per team", "points conservation"]);
    }

    // Small pools of games and teams so ties on points and on wins come up often
    fn random_records(rng: &mut StdRng) -> Vec<MatchRecord> {
        let games: u32 = rng.random_range(1..=6);
        let mut records = Vec::new();

        for g in 0..games {
            for t in 0..rng.random_range(1..=5u32) {
                let points = if rng.random_bool(0.2) {
                    rng.random_range(0..4u32) as f64 * 0.5
                } else {
                    rng.random_range(0..6u32) as f64
                };
                records.push(MatchRecord::new(format!("G{g}"), format!("T{t}"), points));
            }
        }

        records
    }

    #[test]
    fn test_random_record_sets_pass_audit() {
        let mut rng = StdRng::seed_from_u64(2025);

        for _ in 0..300 {
            let records = random_records(&mut rng);
            let rows = compute_leaderboard(&records).unwrap();
            let report = audit_leaderboard(&records, &rows);
            assert!(report.passed(), "{records:?}: {:?}", report.failures().collect::<Vec<_>>());
        }
    }
}
