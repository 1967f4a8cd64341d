use std::fmt;

use async_trait::async_trait;

use super::reply::Reply;

/// Errors that can occur while asking the oracle for a reply.
///
/// The widget shows every variant the same way; the distinction only
/// matters for the log.
#[derive(Debug)]
pub enum OracleError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not a JSON object.
    Parse(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::Network(msg) => write!(f, "network error: {msg}"),
            OracleError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            OracleError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for OracleError {}

/// A service that turns one user message into one reply.
///
/// Each call is independent: the oracle keeps no conversation context.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Returns the name used in logs.
    fn name(&self) -> &str;

    /// Sends `message` and waits for the reply.
    async fn predict(&self, message: &str) -> Result<Reply, OracleError>;
}
