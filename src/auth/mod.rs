//! Bearer token authentication
//!
//! Tokens are HMAC-signed JWTs whose `sub` claim carries the username. A token
//! is accepted only when the named user exists and is active.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtHandler};

use crate::monitoring::profiler::PerformanceProfiler;
use crate::storage::{Storage, User};
use crate::utils::error::{GatewayError, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Identity attached to a request after successful bearer validation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Validate a bearer token and resolve the user it names
///
/// Signature checks are timed as `authentication` and the user lookup as
/// `database_query`.
pub async fn authenticate_bearer(
    jwt: &JwtHandler,
    storage: &dyn Storage,
    profiler: &PerformanceProfiler,
    token: &str,
) -> Result<AuthenticatedUser> {
    let claims = {
        let _timer = profiler.start_timer("authentication");
        jwt.verify_token(token)?
    };

    if claims.sub.is_empty() {
        return Err(GatewayError::invalid_token("Missing user identifier"));
    }

    let user = {
        let _timer = profiler.start_timer("database_query");
        storage.find_user_by_username(&claims.sub).await?
    };

    let user = user.ok_or_else(|| GatewayError::user_not_found(&claims.sub))?;
    if !user.is_active {
        return Err(GatewayError::inactive_user());
    }

    debug!("Bearer token accepted for user {}", user.username);
    Ok(AuthenticatedUser::from(&user))
}

/// Body returned by a successful login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Check a username and password and issue an access token
///
/// Unknown users, inactive users, accounts without a password and wrong
/// passwords all fail the same way with INVALID_CREDENTIALS.
pub async fn login(
    jwt: &JwtHandler,
    storage: &dyn Storage,
    profiler: &PerformanceProfiler,
    username: &str,
    password: &str,
) -> Result<TokenResponse> {
    let user = {
        let _timer = profiler.start_timer("database_query");
        storage.find_user_by_username(username).await?
    };

    let Some(hash) = user
        .as_ref()
        .filter(|u| u.is_active)
        .and_then(|u| u.password_hash.clone())
    else {
        debug!("Login refused for {}", username);
        return Err(GatewayError::invalid_credentials());
    };

    let verified = {
        let _timer = profiler.start_timer("authentication");
        let password = password.to_string();
        tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .map_err(|e| GatewayError::internal(format!("Password check failed: {}", e)))??
    };
    if !verified {
        debug!("Wrong password for {}", username);
        return Err(GatewayError::invalid_credentials());
    }

    info!("Issued access token for {}", username);
    Ok(TokenResponse {
        access_token: jwt.create_access_token(username)?,
        token_type: "bearer",
        expires_in: jwt.expiration(),
    })
}
