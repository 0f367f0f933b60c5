//! Bearer-protected dashboard views

use super::metrics::{EndpointView, endpoint_views, tracked_operation_stats};
use super::{ApiResponse, HoursQuery, TimeSeriesPoint, validate_range};
use crate::auth::AuthenticatedUser;
use crate::config::AlertThresholds;
use crate::monitoring::metrics::{MetricsSummary, SummaryReport};
use crate::monitoring::profiler::OperationStats;
use crate::monitoring::{Alert, AlertSeverity, HealthState, RequestRecord};
use crate::server::middleware::BearerAuth;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Average response time above which an endpoint is listed as slow
const SLOW_ENDPOINT_SECS: f64 = 0.5;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .wrap(BearerAuth)
            .route("/overview", web::get().to(dashboard_overview))
            .route("/charts/requests", web::get().to(request_charts))
            .route("/charts/system", web::get().to(system_charts))
            .route("/alerts", web::get().to(dashboard_alerts))
            .route("/alerts/acknowledge", web::post().to(acknowledge_alert))
            .route("/performance", web::get().to(dashboard_performance)),
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl RequestTrend {
    /// Compare the last hour against the hourly average of the last day
    pub fn from_counts(last_hour: usize, last_day: usize) -> Self {
        let hourly_average = last_day as f64 / 24.0;
        if hourly_average <= 0.0 {
            return Self::Stable;
        }

        let ratio = last_hour as f64 / hourly_average;
        if ratio > 1.2 {
            Self::Increasing
        } else if ratio < 0.8 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemStatus {
    overall_health: HealthState,
    uptime_seconds: f64,
    issues: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
struct PeriodMetrics {
    total_requests: usize,
    error_rate: f64,
    avg_response_time: f64,
}

#[derive(Debug, Serialize)]
struct RequestMetricsView {
    last_hour: PeriodMetrics,
    last_24h: PeriodMetrics,
    trend: RequestTrend,
}

#[derive(Debug, Serialize)]
struct SystemResources {
    cpu_percent: Option<f64>,
    memory_percent: Option<f64>,
    requests_last_5min: usize,
}

#[derive(Debug, Serialize)]
struct HealthAlert {
    #[serde(rename = "type")]
    kind: &'static str,
    severity: AlertSeverity,
    message: String,
    timestamp: DateTime<Utc>,
    issues: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Overview {
    timestamp: DateTime<Utc>,
    system_status: SystemStatus,
    request_metrics: RequestMetricsView,
    system_resources: SystemResources,
    top_endpoints: Vec<(String, u64)>,
    recent_alerts: Vec<HealthAlert>,
    error_breakdown: HashMap<String, u64>,
}

#[derive(Debug, Deserialize)]
pub struct RequestChartQuery {
    pub hours: Option<u32>,
    pub interval_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RequestChartData {
    pub request_counts: Vec<TimeSeriesPoint<usize>>,
    pub error_counts: Vec<TimeSeriesPoint<usize>>,
    pub response_times: Vec<TimeSeriesPoint<f64>>,
}

#[derive(Debug, Serialize)]
struct RequestChart {
    period_hours: u32,
    interval_minutes: u32,
    data: RequestChartData,
}

#[derive(Debug, Serialize)]
struct SystemChartData {
    cpu_usage: Vec<TimeSeriesPoint<f64>>,
    memory_usage: Vec<TimeSeriesPoint<f64>>,
    request_rate: Vec<TimeSeriesPoint<usize>>,
}

#[derive(Debug, Serialize)]
struct SystemChart {
    period_hours: u32,
    data: SystemChartData,
}

#[derive(Debug, Serialize)]
struct AlertSummary {
    total_active: usize,
    critical_count: usize,
    warning_count: usize,
}

#[derive(Debug, Serialize)]
struct AlertsView {
    timestamp: DateTime<Utc>,
    current_alerts: Vec<Alert>,
    alert_history: Vec<Alert>,
    thresholds: AlertThresholds,
    alert_summary: AlertSummary,
}

#[derive(Debug, Serialize)]
struct PerformanceSummary {
    total_operations_tracked: usize,
    slowest_operation: Option<String>,
}

#[derive(Debug, Serialize)]
struct PerformanceView {
    timestamp: DateTime<Utc>,
    operation_performance: BTreeMap<String, OperationStats>,
    slow_endpoints: Vec<EndpointView>,
    performance_summary: PerformanceSummary,
}

#[derive(Debug, Deserialize)]
pub struct AcknowledgeQuery {
    pub alert_type: String,
}

#[derive(Debug, Serialize)]
struct Acknowledgement {
    status: &'static str,
    alert_type: String,
    acknowledged_by: String,
    timestamp: DateTime<Utc>,
}

fn period_metrics(state: &AppState, hours: u32) -> (PeriodMetrics, Option<SummaryReport>) {
    match state.monitoring.get_metrics_summary(hours) {
        MetricsSummary::Report(report) => (
            PeriodMetrics {
                total_requests: report.total_requests,
                error_rate: report.error_rate,
                avg_response_time: report.response_times.avg,
            },
            Some(report),
        ),
        MetricsSummary::NoData { .. } => (PeriodMetrics::default(), None),
    }
}

async fn dashboard_overview(state: web::Data<AppState>) -> Result<HttpResponse> {
    let now = Utc::now();
    let health = state.monitoring.get_health_status();

    let (last_hour, _) = period_metrics(&state, 1);
    let (last_24h, day_report) = period_metrics(&state, 24);
    let trend = RequestTrend::from_counts(last_hour.total_requests, last_24h.total_requests);

    let (top_endpoints, error_breakdown) = match day_report {
        Some(report) => (
            report.top_endpoints.into_iter().take(5).collect(),
            report.error_breakdown,
        ),
        None => (Vec::new(), HashMap::new()),
    };

    let mut recent_alerts = Vec::new();
    if !health.status.is_healthy() {
        recent_alerts.push(HealthAlert {
            kind: "system_health",
            severity: if health.status == HealthState::Degraded {
                AlertSeverity::Warning
            } else {
                AlertSeverity::Critical
            },
            message: format!("System status: {}", health.status),
            timestamp: now,
            issues: health.issues.clone(),
        });
    }

    Ok(ApiResponse::ok(Overview {
        timestamp: now,
        system_status: SystemStatus {
            overall_health: health.status,
            uptime_seconds: health.uptime_seconds,
            issues: health.issues,
        },
        request_metrics: RequestMetricsView {
            last_hour,
            last_24h,
            trend,
        },
        system_resources: SystemResources {
            cpu_percent: health.metrics.cpu_percent,
            memory_percent: health.metrics.memory_percent,
            requests_last_5min: health.metrics.requests_last_5min,
        },
        top_endpoints,
        recent_alerts,
        error_breakdown,
    }))
}

/// Boundaries from `start` stepping by `interval` while not past `end`
pub fn bucket_boundaries(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Duration,
) -> Vec<DateTime<Utc>> {
    let mut boundaries = Vec::new();
    let mut current = start;
    while current <= end {
        boundaries.push(current);
        current += interval;
    }
    boundaries
}

/// Count, error count and mean duration per consecutive boundary pair
pub fn bucket_requests(records: &[RequestRecord], boundaries: &[DateTime<Utc>]) -> RequestChartData {
    let mut data = RequestChartData {
        request_counts: Vec::new(),
        error_counts: Vec::new(),
        response_times: Vec::new(),
    };

    for window in boundaries.windows(2) {
        let (bucket_start, bucket_end) = (window[0], window[1]);
        let bucket: Vec<&RequestRecord> = records
            .iter()
            .filter(|r| r.timestamp >= bucket_start && r.timestamp < bucket_end)
            .collect();

        let errors = bucket.iter().filter(|r| r.is_error()).count();
        let avg = if bucket.is_empty() {
            0.0
        } else {
            bucket.iter().map(|r| r.duration).sum::<f64>() / bucket.len() as f64
        };

        data.request_counts.push(TimeSeriesPoint {
            timestamp: bucket_start,
            value: bucket.len(),
        });
        data.error_counts.push(TimeSeriesPoint {
            timestamp: bucket_start,
            value: errors,
        });
        data.response_times.push(TimeSeriesPoint {
            timestamp: bucket_start,
            value: avg,
        });
    }

    data
}

async fn request_charts(
    state: web::Data<AppState>,
    query: web::Query<RequestChartQuery>,
) -> Result<HttpResponse> {
    let hours = validate_range("hours", query.hours.unwrap_or(24), 1, 168)?;
    let interval_minutes =
        validate_range("interval_minutes", query.interval_minutes.unwrap_or(60), 5, 1440)?;

    let now = Utc::now();
    let start = now - Duration::hours(i64::from(hours));
    let boundaries = bucket_boundaries(start, now, Duration::minutes(i64::from(interval_minutes)));
    let records = state.monitoring.metrics().requests_since(start);

    Ok(ApiResponse::ok(RequestChart {
        period_hours: hours,
        interval_minutes,
        data: bucket_requests(&records, &boundaries),
    }))
}

async fn system_charts(
    state: web::Data<AppState>,
    query: web::Query<HoursQuery>,
) -> Result<HttpResponse> {
    let hours = query.resolve(24, 168)?;
    let start = Utc::now() - Duration::hours(i64::from(hours));
    let snapshots = state.monitoring.metrics().snapshots_since(start);

    let data = SystemChartData {
        cpu_usage: snapshots
            .iter()
            .map(|s| TimeSeriesPoint {
                timestamp: s.timestamp,
                value: s.cpu_percent,
            })
            .collect(),
        memory_usage: snapshots
            .iter()
            .map(|s| TimeSeriesPoint {
                timestamp: s.timestamp,
                value: s.memory_percent,
            })
            .collect(),
        request_rate: snapshots
            .iter()
            .map(|s| TimeSeriesPoint {
                timestamp: s.timestamp,
                value: s.request_count,
            })
            .collect(),
    };

    Ok(ApiResponse::ok(SystemChart {
        period_hours: hours,
        data,
    }))
}

async fn dashboard_alerts(
    state: web::Data<AppState>,
    query: web::Query<HoursQuery>,
) -> Result<HttpResponse> {
    let hours = query.resolve(24, 168)?;
    let now = Utc::now();
    let alerts = state.monitoring.alerts();

    let health = state.monitoring.get_health_status();
    let current_alerts = alerts.current_alerts(&health);
    let alert_summary = AlertSummary {
        total_active: current_alerts.len(),
        critical_count: current_alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical)
            .count(),
        warning_count: current_alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Warning)
            .count(),
    };

    Ok(ApiResponse::ok(AlertsView {
        timestamp: now,
        current_alerts,
        alert_history: alerts.history_since(now - Duration::hours(i64::from(hours))),
        thresholds: *alerts.thresholds(),
        alert_summary,
    }))
}

async fn dashboard_performance(state: web::Data<AppState>) -> Result<HttpResponse> {
    let operation_performance = tracked_operation_stats(&state);

    let mut slow_endpoints: Vec<EndpointView> = endpoint_views(&state)
        .into_iter()
        .filter(|e| e.avg_response_time > SLOW_ENDPOINT_SECS)
        .collect();
    slow_endpoints.sort_by(|a, b| b.avg_response_time.total_cmp(&a.avg_response_time));
    slow_endpoints.truncate(10);

    let slowest_operation = operation_performance
        .iter()
        .filter_map(|(name, stats)| stats.avg.map(|avg| (name, avg)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name.clone());

    Ok(ApiResponse::ok(PerformanceView {
        timestamp: Utc::now(),
        performance_summary: PerformanceSummary {
            total_operations_tracked: operation_performance.len(),
            slowest_operation,
        },
        operation_performance,
        slow_endpoints,
    }))
}

/// Logged only; nothing is persisted
async fn acknowledge_alert(
    user: web::ReqData<AuthenticatedUser>,
    state: web::Data<AppState>,
    query: web::Query<AcknowledgeQuery>,
) -> Result<HttpResponse> {
    let alert_type = query.into_inner().alert_type;
    if alert_type.trim().is_empty() {
        return Err(GatewayError::validation("alert_type must not be empty"));
    }

    state.monitoring.alerts().acknowledge(&alert_type, &user.username);
    info!(user_id = user.id, "Alert {} acknowledged", alert_type);

    Ok(ApiResponse::ok(Acknowledgement {
        status: "acknowledged",
        alert_type,
        acknowledged_by: user.username.clone(),
        timestamp: Utc::now(),
    }))
}
