//! HTTP server startup logic.

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Invalid http.host or http.port: {0}")]
    Address(#[from] std::net::AddrParseError),
}

/// Start the HTTP server on the configured address.
///
/// This function blocks until the server shuts down. A shutdown signal
/// resolves it with `Ok(())`.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;

    let handle = Handle::new();

    tracing::info!(%addr, "Starting HTTP server");

    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_host_is_rejected_before_binding() {
        let config = HttpServerConfig {
            host: "not a host".to_string(),
            port: 5000,
        };
        let result = start_server(Router::new(), &config).await;
        assert!(matches!(result, Err(ServerError::Address(_))));
    }
}
