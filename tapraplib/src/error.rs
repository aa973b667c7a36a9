//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TapRapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File error: {0}")]
    File(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("8-byte integer overflow")]
    IntegerOverflow,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Upload error: {0}")]
    Upload(String),
}

pub type Result<T> = std::result::Result<T, TapRapError>;
