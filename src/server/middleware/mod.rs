//! HTTP middleware implementations
//!
//! - Request metrics interception (wraps the whole app)
//! - Bearer-token authentication for the dashboard scope

mod auth;
mod helpers;
mod metrics;


pub use auth::{BearerAuth, BearerAuthService};
pub use helpers::{authenticated_user, error_code, extract_bearer_token};
pub use metrics::{MetricsMiddleware, MetricsMiddlewareService};
