//! HTTP route modules
//!
//! Public health, metrics and login routes plus the bearer-protected
//! dashboard and kitchen views.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod kitchens;
pub mod metrics;

use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operations reported by the performance views
pub const TRACKED_OPERATIONS: [&str; 5] = [
    "database_query",
    "authentication",
    "shopping_list_create",
    "shopping_list_update",
    "user_registration",
];

/// Standard API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    /// 200 with this body
    pub fn ok(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data))
    }
}

/// One value in a chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint<V> {
    pub timestamp: DateTime<Utc>,
    pub value: V,
}

/// `?hours=N` with a route-specific default and range
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoursQuery {
    pub hours: Option<u32>,
}

impl HoursQuery {
    pub fn resolve(&self, default: u32, max: u32) -> Result<u32, GatewayError> {
        validate_range("hours", self.hours.unwrap_or(default), 1, max)
    }
}

/// Reject values outside `min..=max` with a 422
pub fn validate_range(name: &str, value: u32, min: u32, max: u32) -> Result<u32, GatewayError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(GatewayError::validation(format!(
            "{} must be between {} and {}",
            name, min, max
        )))
    }
}

/// Query-string parse failures become validation errors
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| GatewayError::validation(err.to_string()).into())
}

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .configure(health::configure_routes)
        .configure(metrics::configure_routes)
        .configure(auth::configure_routes)
        .configure(dashboard::configure_routes)
        .configure(kitchens::configure_routes);
}

/// Fallback for unmatched paths
pub async fn not_found() -> Result<HttpResponse, GatewayError> {
    Err(GatewayError::not_found("Resource not found"))
}
