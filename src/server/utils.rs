//! Listener helpers

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;

impl HttpServer {
    /// Turn a bind failure into an actionable configuration error
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        let message = match error.kind() {
            std::io::ErrorKind::AddrInUse => format!(
                "Port {} is already in use. Stop the other process or pick another port with --port {} or PORT={}",
                port,
                port.saturating_add(1),
                port.saturating_add(1)
            ),
            std::io::ErrorKind::PermissionDenied => format!(
                "Permission denied for port {}. Use a port >= 1024, e.g. --port 8000",
                port
            ),
            _ => format!("Failed to bind to {}: {}", bind_addr, error),
        };
        GatewayError::config(message)
    }
}
