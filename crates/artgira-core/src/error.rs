//! Error types for the bridge core
use thiserror::Error;

/// Core errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O error (config file access)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration is syntactically valid but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A function declares a channel type the bridge cannot map
    #[error("not implemented: {channel_type:?} (function {function_uid})")]
    UnsupportedChannelType {
        channel_type: String,
        function_uid: String,
    },

    /// More channels were requested than a universe can hold
    #[error("universe full: cannot allocate channel for {0}")]
    UniverseFull(String),

    /// Error reported by the automation-system client
    #[error("Automation client error: {0}")]
    Client(String),

    /// Pushing values upstream took too long
    #[error("push timed out after {0:?}")]
    PushTimeout(std::time::Duration),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
