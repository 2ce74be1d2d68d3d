//! Error types for Logidash
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input (bad date, bad argument)
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Configuration could not be resolved
    #[snafu(display("Config error: {message}"))]
    Config { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// Network or transport failure (no HTTP response)
    #[snafu(display("Transport error: {source}"))]
    Transport { source: reqwest::Error },

    /// Non-2xx HTTP response
    #[snafu(display("Request failed with status code {status}"))]
    Status {
        status: u16,
        /// Message carried by the response body, if any
        message: Option<String>,
    },

    /// A view or background task is gone
    #[snafu(display("Channel closed: {message}"))]
    ChannelClosed { message: String },
}

impl Error {
    /// HTTP status of a rejected response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message supplied by the server, if the failure carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Transport { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
