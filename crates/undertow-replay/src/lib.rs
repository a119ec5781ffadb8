pub mod report;
pub mod runner;
pub mod scenarios;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse scenario RON: {0}")]
    ScenarioParse(String),

    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
