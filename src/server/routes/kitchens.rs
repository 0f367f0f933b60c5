//! Kitchens owned by the authenticated user

use super::{ApiResponse, validate_range};
use crate::auth::AuthenticatedUser;
use crate::server::middleware::BearerAuth;
use crate::server::state::AppState;
use crate::storage::KitchenQuery;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

const MAX_PAGE_SIZE: u32 = 1_000;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/kitchens")
            .wrap(BearerAuth)
            .route("", web::get().to(list_kitchens))
            .route("/{kitchen_id}", web::get().to(get_kitchen)),
    );
}

#[derive(Debug, Default, Deserialize)]
pub struct KitchenListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
}

impl KitchenListQuery {
    fn resolve(self) -> Result<KitchenQuery> {
        let limit = validate_range("limit", self.limit.unwrap_or(100), 1, MAX_PAGE_SIZE)?;
        Ok(KitchenQuery {
            skip: self.skip.unwrap_or(0) as usize,
            limit: limit as usize,
            name: self.name.filter(|n| !n.trim().is_empty()),
        })
    }
}

async fn list_kitchens(
    state: web::Data<AppState>,
    user: web::ReqData<AuthenticatedUser>,
    query: web::Query<KitchenListQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner().resolve()?;
    let page = {
        let _timer = state.monitoring.profiler().start_timer("database_query");
        state.storage.list_kitchens(user.id, &query).await?
    };
    Ok(ApiResponse::ok(page))
}

async fn get_kitchen(
    state: web::Data<AppState>,
    user: web::ReqData<AuthenticatedUser>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let kitchen_id = path.into_inner();
    let kitchen = {
        let _timer = state.monitoring.profiler().start_timer("database_query");
        state.storage.find_owned_kitchen(user.id, kitchen_id).await?
    };
    kitchen
        .map(ApiResponse::ok)
        .ok_or_else(|| GatewayError::not_found("Kitchen not found"))
}
