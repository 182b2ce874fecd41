// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the pipeline

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Failed to read document: {0}")]
    Read(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document produced no text content: {0}")]
    EmptyDocument(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    // Fatal: the walk aborts when the output stream cannot be written.
    #[error("Output write failed: {0}")]
    Storage(#[from] StorageError),
}
