//! Error types for the network collaborators
use artgira_core::CoreError;
use thiserror::Error;

/// Control errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// Packet could not be decoded
    #[error("Invalid packet: {0}")]
    InvalidPacket(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error: HTTP {status} for {path}")]
    ApiError { status: u16, path: String },

    /// Invalid server URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CIDR notation
    #[error("Invalid network {0:?}: expected IPv4 CIDR like 2.0.0.0/8")]
    InvalidNetwork(String),

    /// No local interface address inside the configured network
    #[error("did not find interface for {0:?}")]
    InterfaceNotFound(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Interface enumeration error
    #[error("Interface error: {0}")]
    NixError(#[from] nix::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;

impl From<ControlError> for CoreError {
    fn from(e: ControlError) -> Self {
        CoreError::Client(e.to_string())
    }
}
