//! Authentication configuration

use super::*;
use jsonwebtoken::Algorithm;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Bearer token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign and verify access tokens
    #[serde(default = "generate_secure_secret")]
    pub secret_key: String,
    /// Signing algorithm name (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: generate_secure_secret(),
            algorithm: default_algorithm(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.secret_key.is_empty() {
            self.secret_key = other.secret_key;
        }
        if other.algorithm != default_algorithm() {
            self.algorithm = other.algorithm;
        }
        if other.access_token_expire_minutes != default_access_token_expire_minutes() {
            self.access_token_expire_minutes = other.access_token_expire_minutes;
        }
        self
    }

    /// Parse the configured algorithm, accepting only HMAC variants
    pub fn jwt_algorithm(&self) -> Result<Algorithm, String> {
        let algorithm = Algorithm::from_str(&self.algorithm)
            .map_err(|_| format!("Unknown JWT algorithm: {}", self.algorithm))?;
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            other => Err(format!(
                "JWT algorithm {:?} is not supported, use HS256, HS384 or HS512",
                other
            )),
        }
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.secret_key.len() < 32 {
            return Err("Secret key must be at least 32 characters long".to_string());
        }

        if self.secret_key == "your-secret-key" || self.secret_key == "change-me" {
            return Err("Secret key must not use a placeholder value".to_string());
        }

        self.jwt_algorithm()?;

        if self.access_token_expire_minutes == 0 {
            return Err("Access token lifetime must be at least one minute".to_string());
        }

        if self.access_token_expire_minutes > 60 * 24 * 30 {
            return Err("Access token lifetime should not exceed 30 days".to_string());
        }

        Ok(())
    }
}

/// Generate a random 64-character secret
fn generate_secure_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn when tokens signed before a restart will stop validating
pub fn warn_ephemeral_secret(from_env: bool) {
    if !from_env {
        warn!(
            "SECRET_KEY is not set; using a generated secret. Tokens will not survive a restart."
        );
    }
}
