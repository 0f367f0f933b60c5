//! Request interceptor feeding the metrics collector

use super::helpers::{authenticated_user, error_code};
use crate::monitoring::{MonitoringSystem, RequestRecord};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::FutureExt;
use futures::future::{Ready, ready};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Records exactly one `RequestRecord` per request, whatever the outcome
#[derive(Debug, Clone)]
pub struct MetricsMiddleware {
    monitoring: Arc<MonitoringSystem>,
}

impl MetricsMiddleware {
    pub fn new(monitoring: Arc<MonitoringSystem>) -> Self {
        Self { monitoring }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service,
            monitoring: Arc::clone(&self.monitoring),
        }))
    }
}

/// Service implementation for metrics middleware
pub struct MetricsMiddlewareService<S> {
    service: S,
    monitoring: Arc<MonitoringSystem>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mut guard = RequestGuard::start(
            Arc::clone(&self.monitoring),
            req.method().to_string(),
            req.path().to_string(),
        );
        let fut = self.service.call(req);

        Box::pin(async move {
            let outcome = AssertUnwindSafe(fut).catch_unwind().await;

            match &outcome {
                Ok(Ok(res)) => guard.complete(
                    res.status().as_u16(),
                    res.response().error().and_then(error_code),
                    authenticated_user(res.request()).map(|u| u.id),
                ),
                Ok(Err(e)) => guard.complete(
                    e.as_response_error().status_code().as_u16(),
                    error_code(e),
                    None,
                ),
                Err(_) => guard.complete(500, Some("INTERNAL_ERROR".to_string()), None),
            }
            let (method, path) = guard.finish();

            match outcome {
                Ok(result) => result,
                Err(panic) => {
                    error!("Handler panicked while serving {} {}", method, path);
                    std::panic::resume_unwind(panic)
                }
            }
        })
    }
}

/// Status recorded when the response future is dropped before completing
pub const CLIENT_CLOSED_STATUS: u16 = 499;

/// Owns the in-flight slot of one request and writes its record exactly once,
/// either through `finish` or on drop when the future is abandoned
struct RequestGuard {
    monitoring: Arc<MonitoringSystem>,
    method: String,
    path: String,
    started: Instant,
    outcome: Option<(u16, Option<String>, Option<i64>)>,
    recorded: bool,
}

impl RequestGuard {
    fn start(monitoring: Arc<MonitoringSystem>, method: String, path: String) -> Self {
        monitoring.metrics().request_started();
        Self {
            monitoring,
            method,
            path,
            started: Instant::now(),
            outcome: None,
            recorded: false,
        }
    }

    fn complete(&mut self, status_code: u16, code: Option<String>, user_id: Option<i64>) {
        self.outcome = Some((status_code, code, user_id));
    }

    fn finish(mut self) -> (String, String) {
        self.record();
        (
            std::mem::take(&mut self.method),
            std::mem::take(&mut self.path),
        )
    }

    fn record(&mut self) {
        if self.recorded {
            return;
        }
        self.recorded = true;

        let (status_code, code, user_id) = self.outcome.take().unwrap_or_else(|| {
            (
                CLIENT_CLOSED_STATUS,
                Some("CLIENT_CLOSED_REQUEST".to_string()),
                None,
            )
        });
        let duration = self.started.elapsed();

        let record = RequestRecord::new(self.method.as_str(), self.path.as_str(), status_code, duration)
            .with_user(user_id)
            .with_error_code(code.filter(|_| status_code >= 400));
        self.monitoring.record_request(record);
        self.monitoring.metrics().request_finished();

        if status_code == CLIENT_CLOSED_STATUS {
            warn!(
                method = %self.method,
                path = %self.path,
                "{} {} abandoned after {:?}",
                self.method,
                self.path,
                duration
            );
        } else {
            info!(
                method = %self.method,
                path = %self.path,
                status = status_code,
                "{} {} -> {} in {:?}",
                self.method,
                self.path,
                status_code,
                duration
            );
        }
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.record();
    }
}
