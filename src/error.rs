use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("[{path}]: compression rejected by service: {message}")]
    UpstreamRejected { path: String, message: String },

    #[error("[{0}]: service response carried no result URL")]
    MissingOutput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("No API keys configured: set IMG_SLIM_KEYS or pass --secret")]
    NoApiKeys,

    #[error("Secret file {0}: expected a JSON array of key strings")]
    InvalidSecretFile(PathBuf),

    #[error("Batch failed after {0} attempts, giving up")]
    RetriesExhausted(u32),
}

pub type Result<T> = std::result::Result<T, SlimError>;
