//! Token claims and key material

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims carried by a dashboard access token
///
/// `sub` is the username. A token without one decodes to an empty subject
/// and is rejected later as an unknown user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    /// Claims for `username` issued at `now` and valid for `lifetime`
    pub fn issue(username: &str, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = now.timestamp().max(0) as u64;
        Self {
            sub: username.to_string(),
            iat,
            exp: iat + lifetime.num_seconds().max(0) as u64,
        }
    }
}

/// Shared-secret key pair for one HMAC algorithm
#[derive(Clone)]
pub(super) struct SigningKeys {
    pub(super) encoding: EncodingKey,
    pub(super) decoding: DecodingKey,
    pub(super) algorithm: Algorithm,
}

impl SigningKeys {
    pub(super) fn from_secret(secret: &str, algorithm: Algorithm) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
        }
    }
}

impl fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKeys({:?}, [REDACTED])", self.algorithm)
    }
}

/// Issues and verifies bearer tokens for the dashboard
#[derive(Debug, Clone)]
pub struct JwtHandler {
    pub(super) keys: SigningKeys,
    pub(super) lifetime: Duration,
}
