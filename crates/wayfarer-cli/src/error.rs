//! Error types for the CLI application.

use thiserror::Error;
use wayfarer_domain::GatewayError;
use wayfarer_llm::LlmError;
use wayfarer_store::StoreError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The itinerary database could not be opened or loaded
    #[error("Could not open itineraries: {0}")]
    Open(String),

    /// Store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Gateway error outside of a store operation
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Suggestion provider error
    #[error("Suggestions unavailable: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}
