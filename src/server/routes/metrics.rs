//! Public metrics endpoints

use super::{ApiResponse, HoursQuery, TRACKED_OPERATIONS};
use crate::monitoring::metrics::{DiskUsage, MemoryUsage, NetworkCounters};
use crate::monitoring::profiler::OperationStats;
use crate::monitoring::{RequestRecord, SystemSnapshot};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::error;

/// Snapshots returned alongside the live reading
const SYSTEM_HISTORY_LEN: usize = 10;
const RECENT_ERRORS_LEN: usize = 20;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/metrics")
            .route("", web::get().to(get_metrics))
            .route("/system", web::get().to(get_system_metrics))
            .route("/performance", web::get().to(get_performance_metrics))
            .route("/endpoints", web::get().to(get_endpoint_metrics))
            .route("/errors", web::get().to(get_error_metrics))
            .route("/users", web::get().to(get_user_activity_metrics)),
    );
}

#[derive(Debug, Serialize)]
struct CurrentResources {
    cpu_percent: f64,
    memory: MemoryUsage,
    disk: DiskUsage,
    network: NetworkCounters,
}

#[derive(Debug, Serialize)]
struct SystemMetricsView {
    timestamp: DateTime<Utc>,
    current: CurrentResources,
    history: Vec<SystemSnapshot>,
}

#[derive(Debug, Serialize)]
struct PerformanceView {
    timestamp: DateTime<Utc>,
    operations: BTreeMap<String, OperationStats>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EndpointView {
    pub endpoint: String,
    pub request_count: u64,
    pub error_count: u64,
    pub error_rate: f64,
    pub avg_response_time: f64,
    pub last_accessed: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct EndpointsView {
    timestamp: DateTime<Utc>,
    /// Busiest first
    endpoints: Vec<EndpointView>,
}

#[derive(Debug, Serialize)]
struct ErrorsView {
    timestamp: DateTime<Utc>,
    period_hours: u32,
    total_errors: usize,
    status_code_breakdown: HashMap<String, u64>,
    error_code_breakdown: HashMap<String, u64>,
    recent_errors: Vec<RequestRecord>,
}

#[derive(Debug, Serialize)]
struct ActiveUser {
    request_count: u64,
    error_count: u64,
    last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct UsersView {
    timestamp: DateTime<Utc>,
    period_hours: u32,
    active_user_count: usize,
    active_users: BTreeMap<String, ActiveUser>,
}

/// Windowed summary, `?hours=1..=24`
async fn get_metrics(
    state: web::Data<AppState>,
    query: web::Query<HoursQuery>,
) -> Result<HttpResponse> {
    let hours = query.resolve(1, 24)?;
    Ok(ApiResponse::ok(state.monitoring.get_metrics_summary(hours)))
}

/// Live resource reading plus the latest snapshots
async fn get_system_metrics(state: web::Data<AppState>) -> Result<HttpResponse> {
    let usage = state.monitoring.sample_resources().await.map_err(|e| {
        error!("Failed to get system metrics: {}", e);
        GatewayError::internal("Failed to retrieve system metrics")
    })?;

    Ok(ApiResponse::ok(SystemMetricsView {
        timestamp: Utc::now(),
        current: CurrentResources {
            cpu_percent: usage.cpu_percent,
            memory: usage.memory,
            disk: usage.disk,
            network: usage.network,
        },
        history: state.monitoring.metrics().recent_snapshots(SYSTEM_HISTORY_LEN),
    }))
}

/// Stats for tracked operations that have at least one timing
pub(crate) fn tracked_operation_stats(state: &AppState) -> BTreeMap<String, OperationStats> {
    TRACKED_OPERATIONS
        .iter()
        .map(|name| (name.to_string(), state.monitoring.get_operation_stats(name)))
        .filter(|(_, stats)| stats.count > 0)
        .collect()
}

async fn get_performance_metrics(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(ApiResponse::ok(PerformanceView {
        timestamp: Utc::now(),
        operations: tracked_operation_stats(&state),
    }))
}

/// Per-endpoint aggregates, busiest first
pub(crate) fn endpoint_views(state: &AppState) -> Vec<EndpointView> {
    let mut endpoints: Vec<EndpointView> = state
        .monitoring
        .metrics()
        .endpoint_stats()
        .into_iter()
        .filter(|(_, stat)| stat.count > 0)
        .map(|(endpoint, stat)| EndpointView {
            request_count: stat.count,
            error_count: stat.error_count,
            error_rate: stat.error_rate(),
            avg_response_time: stat.avg_response_time(),
            last_accessed: stat.last_accessed,
            endpoint,
        })
        .collect();

    endpoints.sort_by(|a, b| {
        b.request_count
            .cmp(&a.request_count)
            .then_with(|| a.endpoint.cmp(&b.endpoint))
    });
    endpoints
}

async fn get_endpoint_metrics(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(ApiResponse::ok(EndpointsView {
        timestamp: Utc::now(),
        endpoints: endpoint_views(&state),
    }))
}

/// Failed requests from the last hour
async fn get_error_metrics(state: web::Data<AppState>) -> Result<HttpResponse> {
    let now = Utc::now();
    let errors: Vec<RequestRecord> = state
        .monitoring
        .metrics()
        .requests_since(now - Duration::hours(1))
        .into_iter()
        .filter(RequestRecord::is_error)
        .collect();

    let mut status_code_breakdown = HashMap::new();
    let mut error_code_breakdown = HashMap::new();
    for record in &errors {
        *status_code_breakdown
            .entry(record.status_code.to_string())
            .or_insert(0) += 1;
        if let Some(code) = &record.error_code {
            *error_code_breakdown.entry(code.clone()).or_insert(0) += 1;
        }
    }

    let skip = errors.len().saturating_sub(RECENT_ERRORS_LEN);
    let total_errors = errors.len();

    Ok(ApiResponse::ok(ErrorsView {
        timestamp: now,
        period_hours: 1,
        total_errors,
        status_code_breakdown,
        error_code_breakdown,
        recent_errors: errors.into_iter().skip(skip).collect(),
    }))
}

/// Users seen in the last 24 hours
async fn get_user_activity_metrics(state: web::Data<AppState>) -> Result<HttpResponse> {
    let now = Utc::now();
    let cutoff = now - Duration::hours(24);

    let active_users: BTreeMap<String, ActiveUser> = state
        .monitoring
        .metrics()
        .user_activity()
        .into_iter()
        .filter(|(_, activity)| activity.last_activity.is_some_and(|t| t >= cutoff))
        .map(|(id, activity)| {
            (
                id.to_string(),
                ActiveUser {
                    request_count: activity.request_count,
                    error_count: activity.error_count,
                    last_activity: activity.last_activity,
                },
            )
        })
        .collect();

    Ok(ApiResponse::ok(UsersView {
        timestamp: now,
        period_hours: 24,
        active_user_count: active_users.len(),
        active_users,
    }))
}
