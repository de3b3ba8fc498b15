//! Error types for toeic

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Test result not found: {0}")]
    ResultNotFound(String),

    #[error("Bug log not found: {0}")]
    BugNotFound(String),

    #[error("Invalid card status: {0}")]
    InvalidStatus(String),

    #[error("Invalid task phase: {0}")]
    InvalidPhase(String),

    #[error("Invalid error type: {0}")]
    InvalidErrorType(String),

    #[error("Invalid study mode: {0}")]
    InvalidMode(String),

    #[error("Invalid test section: {0}")]
    InvalidSection(String),

    #[error("Invalid TOEIC part {0} (expected 1-7)")]
    InvalidPart(u8),

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}
