use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`crate::persistence::FlowStore`] while loading or
/// saving a flow. The graph core itself never produces errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Flow '{0}' was not found")]
    NotFound(String),

    #[error("Flow id '{0}' is not a valid identifier")]
    InvalidFlowId(String),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize flow '{flow_id}': {source}")]
    Serialization {
        flow_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while loading a [`crate::session::SessionConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}
