use serde::*;
use std::fs;
use std::path::Path;

use crate::error::{LeaderboardError, Result};

// Everything the loader and the dashboard can be tuned with. Column names default to the
// headers used in the training camp workbook.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RankingContext {
    pub data_path: String,
    pub delimiter: char,

    pub game_column: String,
    pub team_column: String,
    pub points_column: String,

    pub title: String,
    pub leaderboard_limit: Option<usize>,
}

impl Default for RankingContext {
    fn default() -> Self {
        Self {
            data_path: "data/trainingslager.csv".to_string(),
            delimiter: ',',

            game_column: "Bewerb".to_string(),
            team_column: "Team".to_string(),
            points_column: "Punkte".to_string(),

            title: "BSDS 2025 - SCSR Edition".to_string(),
            leaderboard_limit: None,
        }
    }
}

impl RankingContext {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            LeaderboardError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let context: RankingContext = serde_json::from_str(&data)
            .map_err(|e| LeaderboardError::Config(format!("failed to parse {}: {}", path.display(), e)))?;

        context.validate()?;
        Ok(context)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(LeaderboardError::Config(format!("delimiter '{}' is not ASCII", self.delimiter)));
        }

        for (name, column) in [
            ("game_column", &self.game_column),
            ("team_column", &self.team_column),
            ("points_column", &self.points_column),
        ] {
            if column.trim().is_empty() {
                return Err(LeaderboardError::Config(format!("{name} must not be empty")));
            }
        }

        if self.leaderboard_limit == Some(0) {
            return Err(LeaderboardError::Config("leaderboard_limit must be at least 1".to_string()));
        }

        Ok(())
    }

    // Command-line override, held to the same rules as the config file
    pub fn set_leaderboard_limit(&mut self, limit: usize) -> Result<()> {
        let previous = self.leaderboard_limit.replace(limit);
        if let Err(e) = self.validate() {
            self.leaderboard_limit = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let context = RankingContext::default();
        assert!(context.validate().is_ok());
        assert_eq!(context.points_column, "Punkte");
        assert_eq!(context.delimiter_byte(), b',');
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let context: RankingContext = serde_json::from_str(r#"{"delimiter": ";", "title": "Camp"}"#).unwrap();
        assert_eq!(context.delimiter, ';');
        assert_eq!(context.title, "Camp");
        assert_eq!(context.game_column, "Bewerb");
    }

    #[test]
    fn test_rejects_empty_column_and_zero_limit() {
        let mut context = RankingContext::default();
        context.team_column = " ".to_string();
        assert!(matches!(context.validate(), Err(LeaderboardError::Config(_))));

        let mut context = RankingContext::default();
        context.leaderboard_limit = Some(0);
        assert!(matches!(context.validate(), Err(LeaderboardError::Config(_))));
    }

    #[test]
    fn test_limit_override_is_validated() {
        let mut context = RankingContext::default();
        context.leaderboard_limit = Some(5);

        assert!(matches!(context.set_leaderboard_limit(0), Err(LeaderboardError::Config(_))));
        assert_eq!(context.leaderboard_limit, Some(5));

        context.set_leaderboard_limit(3).unwrap();
        assert_eq!(context.leaderboard_limit, Some(3));
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let mut context = RankingContext::default();
        context.delimiter = '¦';
        assert!(context.validate().is_err());
    }
}
