//! Error types module.
//!
//! This module defines the error types used throughout the whodis application.
//! It uses `thiserror` for structured error handling and provides
//! a custom `Result` type alias for convenience.
//!
//! Errors fall into two tiers: configuration errors abort the run before
//! any lookup starts, everything else is attached to a single domain's
//! [`WhoisResult`](crate::whois::WhoisResult) and never aborts the batch.

use thiserror::Error;

/// A specialized `Result` type for whodis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for whodis application.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (sockets, writing output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (no domains, conflicting flags)
    #[error("{0}")]
    Config(String),

    /// Network or protocol failure talking to a WHOIS server
    #[error("Network error: {0}")]
    Network(String),

    /// Domain that cannot be sent to a WHOIS server
    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    /// WHOIS text could not be turned into a structured record
    #[error("Parse error: {0}")]
    Parse(String),

    /// WHOIS query exceeded its timeout (seconds)
    #[error("WHOIS query timed out after {0}s")]
    Timeout(u64),

    /// Lookup task panicked or was cancelled
    #[error("Lookup task failed: {0}")]
    Task(String),
}

impl Error {
    /// Create a new network error with a message.
    #[must_use]
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parse error with a message.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    #[cfg(test)]
    pub(crate) fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    #[cfg(test)]
    pub(crate) fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_is_bare() {
        let err = Error::config("no domains specified");
        assert_eq!(err.to_string(), "no domains specified");
        assert!(err.is_config());
    }

    #[test]
    fn test_timeout_error() {
        let err = Error::Timeout(30);
        assert!(err.is_timeout());
        assert!(!err.is_config());
        assert_eq!(err.to_string(), "WHOIS query timed out after 30s");
    }

    #[test]
    fn test_parse_error_message() {
        let err = Error::parse("domain is not found");
        assert_eq!(err.to_string(), "Parse error: domain is not found");
    }
}
