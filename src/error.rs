use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("no records to evaluate")]
    EmptyInput,

    #[error("unknown game: {0}")]
    UnknownGame(String),

    // Row is 1-based, counting data rows only
    #[error("malformed record in row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;
