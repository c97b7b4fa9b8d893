// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No game container found. Tried selectors: {}", .tried.join(", "))]
    NoGameContainer { tried: Vec<String> },

    #[error("No races found. Tried selectors: {}", .tried.join(", "))]
    NoRaces { tried: Vec<String> },

    #[error("Invalid selector '{expression}' for {target}: {reason}")]
    InvalidSelector {
        target: String,
        expression: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
