//! Error types for Agora.

use thiserror::Error;

/// Default result type for Agora.
pub type AgoraResult<T> = Result<T, AgoraError>;

/// Result type for a single completion call.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Errors that can occur in Agora.
#[derive(Error, Debug)]
pub enum AgoraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown dataset '{0}'")]
    UnknownDataset(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Agent {agent} gave up on round {round} after {attempts} failed attempts: {last_error}")]
    RetryExhausted {
        agent: usize,
        round: usize,
        attempts: u32,
        #[source]
        last_error: CompletionError,
    },

    #[error("Agent {agent} returned an empty response")]
    MalformedResponse { agent: usize },

    #[error("Agent context has no assistant turn yet")]
    EmptyContext,

    #[error("No agent produced an extractable answer")]
    NoVotes,
}

impl AgoraError {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        Self::Dataset(msg.into())
    }
}

/// Failures of a single call to a language model.
///
/// Every variant is treated as transient by the debate retry policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Request to '{0}' failed: {1}")]
    RequestFailed(String, String),

    #[error("Rate limited by '{0}': {1}")]
    RateLimited(String, String),

    #[error("'{completer}' returned HTTP {code}: {message}")]
    Api {
        completer: String,
        code: u16,
        message: String,
    },

    #[error("Timeout waiting for '{0}'")]
    Timeout(String),

    #[error("Unreadable response from '{0}': {1}")]
    Malformed(String, String),

    #[error("Process '{0}' failed: {1}")]
    Process(String, String),
}

impl CompletionError {
    /// Name of the completer that produced the error.
    pub fn completer(&self) -> &str {
        match self {
            CompletionError::RequestFailed(name, _)
            | CompletionError::RateLimited(name, _)
            | CompletionError::Timeout(name)
            | CompletionError::Malformed(name, _)
            | CompletionError::Process(name, _) => name,
            CompletionError::Api { completer, .. } => completer,
        }
    }
}
