//! The crate-wide error enum

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Everything that can go wrong between a request arriving and its response,
/// plus startup and background failures
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Bad or missing settings; also bind failures at startup
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Signature, algorithm or expiry failures on a bearer token
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Rejected credentials; `code` is returned to the client verbatim
    #[error("Authentication error: {message}")]
    Auth {
        code: &'static str,
        message: String,
    },

    /// Query parameters outside their allowed range
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// User lookup or storage ping failed
    #[error("Database error: {0}")]
    Database(String),

    /// CPU, memory, disk or network readings unavailable
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// An alert condition could not be evaluated or delivered
    #[error("Alert error: {0}")]
    Alert(String),

    /// Webhook delivery transport failure
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}
