use serde::*;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{LeaderboardError, Result};
use crate::ranking_context::RankingContext;

const GAME_ALIAS: &str = "game";
const TEAM_ALIAS: &str = "team";
const POINTS_ALIAS: &str = "points";

// One row of the results sheet: a team's score in a single game.
// Every (game, team) pair is expected at most once, but that isn't checked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub game: String,
    pub team: String,
    pub points: f64,
}

impl MatchRecord {
    pub fn new(game: impl Into<String>, team: impl Into<String>, points: f64) -> Self {
        Self {
            game: game.into(),
            team: team.into(),
            points,
        }
    }

    // row is the 1-based position reported back in the error
    pub fn validate(&self, row: usize) -> Result<()> {
        if self.game.trim().is_empty() {
            return Err(malformed(row, "missing game"));
        }
        if self.team.trim().is_empty() {
            return Err(malformed(row, "missing team"));
        }
        if !self.points.is_finite() {
            return Err(malformed(row, format!("points value {} is not a finite number", self.points)));
        }
        Ok(())
    }
}

pub fn validate_records(records: &[MatchRecord]) -> Result<()> {
    for (idx, record) in records.iter().enumerate() {
        record.validate(idx + 1)?;
    }
    Ok(())
}

// Loads the record set from the file at file_path. Files ending in .json are read as JSON,
// everything else as a delimited table with a header row.
pub fn load_data(file_path: impl AsRef<Path>, ranking_context: &RankingContext) -> Result<Vec<MatchRecord>> {
    let file_path = file_path.as_ref();

    let is_json = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        let data = fs::read_to_string(file_path)?;
        read_json_records(&data)?
    } else {
        let file = fs::File::open(file_path)?;
        read_csv_records(file, ranking_context)?
    };

    log::info!(
        "Loaded {} records covering {} games from {}",
        records.len(),
        records.iter().map(|r| r.game.as_str()).collect::<HashSet<_>>().len(),
        file_path.display()
    );

    Ok(records)
}

pub fn read_csv_records<R: Read>(reader: R, ranking_context: &RankingContext) -> Result<Vec<MatchRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(ranking_context.delimiter_byte())
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let game_idx   = column_index(&headers, &ranking_context.game_column, GAME_ALIAS)?;
    let team_idx   = column_index(&headers, &ranking_context.team_column, TEAM_ALIAS)?;
    let points_idx = column_index(&headers, &ranking_context.points_column, POINTS_ALIAS)?;

    let mut records = Vec::new();

    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_number = idx + 1;

        // Spreadsheet exports tend to end with a few fully blank lines
        if row.iter().all(|field| field.is_empty()) { continue; }

        let game   = field(&row, game_idx,   &ranking_context.game_column,   row_number)?;
        let team   = field(&row, team_idx,   &ranking_context.team_column,   row_number)?;
        let points = field(&row, points_idx, &ranking_context.points_column, row_number)?;

        let points = points
            .parse::<f64>()
            .map_err(|_| malformed(row_number, format!("points value '{points}' is not numeric")))?;

        let record = MatchRecord::new(game, team, points);
        record.validate(row_number)?;
        records.push(record);
    }

    Ok(records)
}

pub fn read_json_records(data: &str) -> Result<Vec<MatchRecord>> {
    let json_data: JsonData = serde_json::from_str(data)?;

    let mut records = Vec::with_capacity(json_data.records.len());
    for (idx, json_record) in json_data.records.into_iter().enumerate() {
        let row_number = idx + 1;

        let game = json_text(json_record.game, GAME_ALIAS, row_number)?;
        let team = json_text(json_record.team, TEAM_ALIAS, row_number)?;

        let points = json_record.points.ok_or_else(|| malformed(row_number, "missing points"))?;
        let JsonPoints(points) = serde_json::from_value(points.clone())
            .map_err(|_| malformed(row_number, format!("points value {points} is not numeric")))?;

        let record = MatchRecord::new(game, team, points);
        record.validate(row_number)?;
        records.push(record);
    }

    Ok(records)
}

// Prefers the configured header, falls back to the English alias
fn column_index(headers: &csv::StringRecord, configured: &str, alias: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == configured)
        .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(alias)))
        .ok_or_else(|| malformed(0, format!("header has no '{configured}' column")))
}

fn field<'a>(row: &'a csv::StringRecord, idx: usize, column: &str, row_number: usize) -> Result<&'a str> {
    match row.get(idx) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(malformed(row_number, format!("missing {column}"))),
    }
}

// Identifiers may come through as plain numbers when the sheet column was numeric
fn json_text(value: Option<serde_json::Value>, column: &str, row_number: usize) -> Result<String> {
    match value {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(malformed(row_number, format!("{column} value {other} is not text"))),
        None => Err(malformed(row_number, format!("missing {column}"))),
    }
}

fn malformed(row: usize, reason: impl Into<String>) -> LeaderboardError {
    LeaderboardError::MalformedRecord { row, reason: reason.into() }
}

#[derive(Deserialize, Debug)]
struct JsonData {
    pub records: Vec<JsonRecord>,
}

// Sheets exported to JSON keep the German headers and often quote the numbers. Fields are
// checked one record at a time so a bad value is reported with its row.
#[derive(Deserialize, Debug)]
struct JsonRecord {
    #[serde(alias = "Bewerb", default)]
    pub game: Option<serde_json::Value>,
    #[serde(alias = "Team", default)]
    pub team: Option<serde_json::Value>,
    #[serde(alias = "Punkte", default)]
    pub points: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
#[serde(transparent)]
struct JsonPoints(#[serde(deserialize_with = "deserialize_number_from_string")] f64);
