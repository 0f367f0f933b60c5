//! HTTP server implementation
//!
//! Public health/metrics routes, the bearer-protected dashboard and the
//! request interceptor that feeds the metrics collector.

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
mod utils;


pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
