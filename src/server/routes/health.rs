//! Health check and probe endpoints

use crate::monitoring::health::{ApplicationHealth, DatabaseHealth, DetailedHealth, HealthState};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check))
            .route("/ready", web::get().to(readiness_check))
            .route("/live", web::get().to(liveness_check)),
    );
}

#[derive(Debug, Serialize)]
struct ReadyStatus {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct LiveStatus {
    status: &'static str,
    timestamp: DateTime<Utc>,
    uptime: f64,
}

/// Current health classification
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    debug!("Health check requested");
    Ok(ApiResponse::ok(state.monitoring.get_health_status()))
}

/// Database, system metrics and application breakdown
async fn detailed_health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let database = match state.storage.ping().await {
        Ok(()) => DatabaseHealth::connected(),
        Err(e) => {
            error!("Database health check failed: {}", e);
            DatabaseHealth::failed(e)
        }
    };

    let now = Utc::now();
    let system = state.monitoring.get_health_status();
    let application = ApplicationHealth::evaluate(state.monitoring.metrics(), now);

    Ok(ApiResponse::ok(DetailedHealth::assemble(
        database,
        system,
        application,
        now,
    )))
}

/// Ready when the database answers and the service is not unhealthy
async fn readiness_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    if let Err(e) = state.storage.ping().await {
        error!("Readiness check failed: {}", e);
        return Err(GatewayError::service_unavailable("Service not ready"));
    }

    if state.monitoring.get_health_status().status == HealthState::Unhealthy {
        return Err(GatewayError::service_unavailable("System is unhealthy"));
    }

    Ok(ApiResponse::ok(ReadyStatus {
        status: "ready",
        timestamp: Utc::now(),
    }))
}

async fn liveness_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(ApiResponse::ok(LiveStatus {
        status: "alive",
        timestamp: Utc::now(),
        uptime: state.monitoring.metrics().uptime().as_secs_f64(),
    }))
}
