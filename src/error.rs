use thiserror::Error;

pub type Result<T> = std::result::Result<T, PunchcardError>;

#[derive(Error, Debug)]
pub enum PunchcardError {
    #[error("Log error: {0}")]
    Log(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
