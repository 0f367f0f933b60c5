//! Helper functions for creating specific error types

use super::types::GatewayError;
use jsonwebtoken::errors::ErrorKind;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn auth<S: Into<String>>(code: &'static str, message: S) -> Self {
        Self::Auth {
            code,
            message: message.into(),
        }
    }

    pub fn missing_token() -> Self {
        Self::auth("MISSING_TOKEN", "Bearer token is required")
    }

    pub fn invalid_token<S: Into<String>>(message: S) -> Self {
        Self::auth("INVALID_TOKEN", message)
    }

    pub fn token_expired() -> Self {
        Self::auth("TOKEN_EXPIRED", "Token has expired")
    }

    pub fn user_not_found(username: &str) -> Self {
        Self::auth("USER_NOT_FOUND", format!("User '{}' not found", username))
    }

    pub fn invalid_credentials() -> Self {
        Self::auth("INVALID_CREDENTIALS", "Incorrect username or password")
    }

    pub fn inactive_user() -> Self {
        Self::auth("INACTIVE_USER", "User account is inactive")
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database(message.into())
    }

    pub fn sampling<S: Into<String>>(message: S) -> Self {
        Self::Sampling(message.into())
    }

    pub fn alert<S: Into<String>>(message: S) -> Self {
        Self::Alert(message.into())
    }

    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable code reported in error bodies and request metrics
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Yaml(_) | Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Jwt(e) => match e.kind() {
                ErrorKind::ExpiredSignature => "TOKEN_EXPIRED",
                _ => "INVALID_TOKEN",
            },
            Self::Auth { code, .. } => *code,
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "RESOURCE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Sampling(_) => "SAMPLING_ERROR",
            Self::Alert(_) => "ALERT_ERROR",
            Self::HttpClient(_) => "EXTERNAL_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
