use thiserror::Error;

#[derive(Error, Debug)]
pub enum TshareError {
    #[error("Random source failure: {0}")]
    RandomSourceFailure(String),

    #[error("Share sizes must match: {left} != {right} payload bytes read")]
    SizeMismatch { left: usize, right: usize },

    #[error("Invalid shares: {0}")]
    InvalidShares(String),

    #[error("Insufficient combination of shares: got {0}, need at least 2")]
    InsufficientShares(usize),

    #[error("Output {} is one of the input shares", .0.display())]
    OutputIsShare(std::path::PathBuf),

    #[error("Invalid buffer size: {0}. Must be at least 1 byte")]
    InvalidBufferSize(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TshareError>;
