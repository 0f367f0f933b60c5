//! Bearer-token authentication middleware

use super::helpers::extract_bearer_token;
use crate::auth::authenticate_bearer;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};

/// Rejects requests without a valid bearer token and attaches the
/// `AuthenticatedUser` to the request extensions otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for bearer auth middleware
pub struct BearerAuthService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token = extract_bearer_token(req.headers()).map(str::to_string);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let Some(token) = token else {
                debug!("Rejected {} without bearer token", req.path());
                return Ok(req
                    .error_response(GatewayError::missing_token())
                    .map_into_right_body());
            };
            let Some(state) = state else {
                return Ok(req
                    .error_response(GatewayError::internal("Application state is not configured"))
                    .map_into_right_body());
            };

            let user = match authenticate_bearer(
                &state.jwt,
                state.storage.as_ref(),
                state.monitoring.profiler(),
                &token,
            )
            .await
            {
                Ok(user) => user,
                Err(e) => {
                    warn!("Bearer authentication failed for {}: {}", req.path(), e);
                    return Ok(req.error_response(e).map_into_right_body());
                }
            };

            req.extensions_mut().insert(user);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
