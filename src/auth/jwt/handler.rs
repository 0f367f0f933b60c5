//! Signing and verification

use super::types::{Claims, JwtHandler, SigningKeys};
use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Header, Validation, decode, encode};
use tracing::{debug, warn};

impl JwtHandler {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let algorithm = config.jwt_algorithm().map_err(GatewayError::Config)?;
        let minutes = i64::try_from(config.access_token_expire_minutes)
            .map_err(|_| GatewayError::config("Token lifetime is out of range"))?;

        Ok(Self {
            keys: SigningKeys::from_secret(&config.secret_key, algorithm),
            lifetime: Duration::minutes(minutes),
        })
    }

    /// Token for `username` expiring after the configured lifetime
    pub fn create_access_token(&self, username: &str) -> Result<String> {
        self.sign(Claims::issue(username, Utc::now(), self.lifetime))
    }

    pub fn sign(&self, claims: Claims) -> Result<String> {
        let token = encode(&Header::new(self.keys.algorithm), &claims, &self.keys.encoding)?;
        debug!(user = %claims.sub, "Issued access token");
        Ok(token)
    }

    /// Check signature, algorithm and expiry, returning the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.keys.algorithm);
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!(error = %e, "Rejected bearer token");
                GatewayError::Jwt(e)
            })
    }

    /// Token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.lifetime.num_seconds().max(0) as u64
    }
}
