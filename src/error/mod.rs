// src/error/mod.rs
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FeedError {
    /// Network/connectivity issues reaching the upstream service
    #[error("Network Error: {0}")]
    NetworkError(String),

    /// Request exceeded the configured HTTP timeout
    #[error("Timeout Error: {0}")]
    TimeoutError(String),

    /// Upstream answered with a non-success HTTP status
    #[error("Upstream Status: {0}")]
    UpstreamStatus(String),

    /// Payload did not match the expected JSON shape
    #[error("Parse Error: {0}")]
    ParseError(String),

    /// Configuration errors
    #[error("Config Error: {0}")]
    ConfigError(String),

    /// Unknown/unclassified errors
    #[error("Unknown Error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(format!("JSON deserialization error: {}", err))
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::TimeoutError(err.to_string())
        } else if err.is_decode() {
            FeedError::ParseError(err.to_string())
        } else if let Some(status) = err.status() {
            FeedError::UpstreamStatus(format!("{}: {}", status, err))
        } else {
            FeedError::NetworkError(err.to_string())
        }
    }
}

impl FeedError {
    /// Determines if an error is recoverable through retry on a later cycle
    pub fn is_recoverable(&self) -> bool {
        match self {
            FeedError::NetworkError(_) => true,
            FeedError::TimeoutError(_) => true,
            FeedError::UpstreamStatus(_) => true, // upstream may heal between polls
            FeedError::ParseError(_) => false,    // data format issues aren't recoverable
            FeedError::ConfigError(_) => false,   // config needs fixing
            FeedError::Unknown(_) => true,
        }
    }

    /// Categorizes error for diagnostics
    pub fn categorize(&self) -> ErrorCategory {
        match self {
            FeedError::NetworkError(_) | FeedError::TimeoutError(_) => ErrorCategory::Network,
            FeedError::UpstreamStatus(_) => ErrorCategory::Upstream,
            FeedError::ParseError(_) => ErrorCategory::Data,
            FeedError::ConfigError(_) => ErrorCategory::Configuration,
            FeedError::Unknown(_) => ErrorCategory::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Data,
    Configuration,
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_recoverable() {
        let err = FeedError::NetworkError("connection refused".to_string());
        assert!(err.is_recoverable());
        assert_eq!(err.categorize(), ErrorCategory::Network);
    }

    #[test]
    fn parse_errors_are_not_recoverable() {
        let err = FeedError::ParseError("missing field".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.categorize(), ErrorCategory::Data);
    }

    #[test]
    fn serde_errors_map_to_parse() {
        let json_err = serde_json::from_str::<u64>("not a number").unwrap_err();
        let err: FeedError = json_err.into();
        assert!(matches!(err, FeedError::ParseError(_)));
    }
}
