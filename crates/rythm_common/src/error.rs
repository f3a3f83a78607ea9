//! Error taxonomy shared by the store, the gateway and the daemon boundary.

use std::path::PathBuf;

/// Storage read/write failure. Always recovered locally: reads fall back to
/// defaults and writes keep their in-memory effect for the session.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage unavailable for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt record under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode record for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The completion provider could not produce a usable answer.
///
/// Every variant means the same thing to callers: use the fallback text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("completion provider is not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed provider payload: {0}")]
    Malformed(String),

    #[error("provider returned an empty completion")]
    EmptyResponse,
}

/// Malformed request at the gateway HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("'messages' is missing or not an array")]
    MissingMessages,

    #[error("'messages' must contain at least one message")]
    EmptyConversation,

    #[error("message {index} is invalid: {reason}")]
    InvalidMessage { index: usize, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}
