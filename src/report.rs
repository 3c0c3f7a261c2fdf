use std::fmt;

use crate::audit::*;
use crate::error::Result;
use crate::ranking::*;
use crate::util::*;

const RULE_WIDTH: usize = 44;

// The two dashboard views and their helpers render through Display, so main can print them
// straight away and tests can call to_string().

pub struct LeaderboardTable<'a> {
    pub title: &'a str,
    pub leader: &'a str,
    pub rows: &'a [LeaderboardRow],
}

impl fmt::Display for LeaderboardTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Current Leader: {}", self.leader)?;
        writeln!(f)?;
        writeln!(f, "|{0:>8} | {1:20} | {2:>7} | {3:>4}", "Ranking", "Team", "Punkte", "Wins")?;

        for r in self.rows {
            writeln!(f, "|{0:>8} | {1:20} | {2:>7} | {3:>4}",
                r.rank,
                r.team,
                format_points(r.total_points),
                r.wins,
            )?;
        }

        Ok(())
    }
}

pub struct GameResultTable<'a>(pub &'a GameResult);

impl fmt::Display for GameResultTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        writeln!(f, "Game-by-Game Results")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Winner of {}: {}", result.game, result.winner)?;
        writeln!(f)?;
        writeln!(f, "|{0:>8} | {1:20} | {2:>7}", "Ranking", "Team", "Punkte")?;

        for r in &result.rows {
            writeln!(f, "|{0:>8} | {1:20} | {2:>7}",
                r.rank,
                r.team,
                format_points(r.points),
            )?;
        }

        Ok(())
    }
}

pub struct GameList<'a>(pub &'a [String]);

impl fmt::Display for GameList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, g) in self.0.iter().enumerate() {
            writeln!(f, "{0:3}. {1}", i + 1, g)?;
        }
        Ok(())
    }
}

pub struct AuditSummary<'a>(pub &'a AuditReport);

impl fmt::Display for AuditSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0.checks {
            writeln!(f, "[{0}] {1:20} | {2}",
                if c.passed { " ok " } else { "FAIL" },
                c.name,
                c.detail,
            )?;
        }
        Ok(())
    }
}

pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::MatchRecord;

    fn records() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new("A", "X", 10.0),
            MatchRecord::new("A", "Y", 7.5),
            MatchRecord::new("B", "X", 3.0),
            MatchRecord::new("B", "Y", 9.0),
        ]
    }

    #[test]
    fn test_leaderboard_table_lists_rows_in_rank_order() {
        let rows = compute_leaderboard(&records()).unwrap();
        let table = LeaderboardTable { title: "Camp", leader: "Y", rows: &rows }.to_string();

        assert!(table.starts_with("Camp\n"));
        assert!(table.contains("Current Leader: Y"));

        let y = table.find("| Y ").unwrap();
        let x = table.find("| X ").unwrap();
        assert!(y < x);
        assert!(table.contains("16.5"));
    }

    #[test]
    fn test_game_result_table_names_winner() {
        let result = compute_game_result(&records(), "A").unwrap();
        let table = GameResultTable(&result).to_string();

        assert!(table.contains("Winner of A: X"));
        assert!(table.contains("7.5"));
        assert_eq!(table.lines().filter(|l| l.starts_with('|')).count(), 3);
    }

    #[test]
    fn test_game_list_numbering() {
        let list = GameList(&["A".to_string(), "B".to_string()]).to_string();
        assert_eq!(list, "  1. A\n  2. B\n");
    }

    #[test]
    fn test_audit_summary_marks_failures() {
        let records = records();
        let mut rows = compute_leaderboard(&records).unwrap();
        rows[0].wins = 5;

        let summary = AuditSummary(&audit_leaderboard(&records, &rows)).to_string();
        assert_eq!(summary.lines().count(), 5);
        assert!(summary.lines().any(|l| l.starts_with("[FAIL] win total")));
        assert!(summary.lines().any(|l| l.starts_with("[ ok ] rank density")));
    }

    #[test]
    fn test_json_output() {
        let rows = compute_leaderboard(&records()).unwrap();
        let json = to_json(&rows).unwrap();
        let parsed: Vec<LeaderboardRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rows);
    }
}
