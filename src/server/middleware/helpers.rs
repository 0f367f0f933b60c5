//! Helper functions for middleware

use crate::auth::AuthenticatedUser;
use crate::utils::error::GatewayError;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{HttpMessage, HttpRequest};

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// User placed on the request by the bearer-auth middleware
pub fn authenticated_user(req: &HttpRequest) -> Option<AuthenticatedUser> {
    req.extensions().get::<AuthenticatedUser>().cloned()
}

/// Machine-readable code for a failed request, when the error carries one
pub fn error_code(error: &actix_web::Error) -> Option<String> {
    error
        .as_error::<GatewayError>()
        .map(|e| e.code().to_string())
}
