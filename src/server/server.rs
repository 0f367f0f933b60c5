//! Actix application assembly and the listener lifecycle

use crate::config::{Config, ServerConfig};
use crate::server::middleware::MetricsMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::time::Duration;
use tracing::info;

/// HTTP server
#[derive(Debug)]
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Build storage, monitoring and auth from `config` and wrap them in a server
    pub fn new(config: &Config) -> Result<Self> {
        info!(port = config.server().port, "Assembling kitchen-monitor server");
        let state = AppState::from_config(config.clone())?;
        Ok(Self::with_state(state))
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
        }
    }

    /// The monitoring API only serves reads plus the acknowledge POST
    fn cors(config: &ServerConfig) -> Cors {
        let settings = &config.cors;
        let base = Cors::default()
            .allowed_methods(["GET", "POST", "OPTIONS"])
            .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        let cors = if settings.allows_all_origins() {
            base.allow_any_origin()
        } else {
            settings
                .origins
                .iter()
                .fold(base, |cors, origin| cors.allowed_origin(origin))
        };

        if settings.allow_credentials {
            cors.supports_credentials()
        } else {
            cors
        }
    }

    /// Create the Actix-web application
    ///
    /// The request interceptor is registered last so it is the outermost
    /// layer and sees the final status of every response.
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Self::cors(state.config.server());
        let metrics = MetricsMiddleware::new(state.monitoring.clone());

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(DefaultHeaders::new().add(("Server", "kitchen-monitor")))
            .wrap(metrics)
            .configure(routes::configure_routes)
            .default_service(web::to(routes::not_found))
    }

    /// Start the HTTP server and the monitoring background task
    ///
    /// Returns after the server has stopped (SIGINT/SIGTERM) and the
    /// background task has been joined.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let monitoring = self.state.monitoring.clone();
        monitoring.start();

        let state = web::Data::new(self.state);
        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(self.config.worker_count())
            .client_request_timeout(Duration::from_secs(self.config.request_timeout))
            .shutdown_timeout(self.config.shutdown_timeout)
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port));

        let server = match server {
            Ok(server) => server.run(),
            Err(e) => {
                monitoring.stop().await;
                return Err(e);
            }
        };

        info!("HTTP server listening on {}", bind_addr);

        let result = server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)));

        monitoring.stop().await;
        info!("HTTP server stopped");
        result
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
