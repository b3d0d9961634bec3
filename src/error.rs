//! Error types for the graph populator.

use thiserror::Error;

/// Errors that can occur while generating or inserting graph data.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// MongoDB connection or write error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// BSON serialization error.
    #[error("BSON error: {0}")]
    Bson(#[from] bson::ser::Error),

    /// Word corpus or other file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error. Fatal at startup; no partial run is attempted.
    #[error("Configuration error: {0}")]
    Config(String),
}
