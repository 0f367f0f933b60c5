//! Token issuing

use crate::auth::login;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .app_data(
                web::FormConfig::default()
                    .error_handler(|err, _req| GatewayError::validation(err.to_string()).into()),
            )
            .route("/token", web::post().to(issue_token)),
    );
}

/// OAuth2 password-grant style form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Exchange a username and password for a bearer token
///
/// Answers with the bare token body rather than the `ApiResponse` envelope so
/// standard OAuth2 password-flow clients can read it.
async fn issue_token(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let response = login(
        &state.jwt,
        state.storage.as_ref(),
        state.monitoring.profiler(),
        form.username.trim(),
        &form.password,
    )
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
