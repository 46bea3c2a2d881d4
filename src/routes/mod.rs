//! HTTP route handlers.
//!
//! Two routes share one router: `/hello` returns a constant greeting and
//! `/status` reports the host uptime. Anything else falls through to axum's
//! default 404. Status responses carry `Cache-Control: no-store`.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod hello;
pub mod status;

use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::{middleware, routing::get, Router};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_STATUS;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with both routes and the request ID layer.
pub fn create_router(state: AppState) -> Router {
    let hello_routes = Router::new().route("/hello", get(hello::hello));

    // Status - never cached, uptime changes on every request
    let status_routes = Router::new()
        .route("/status", get(status::status))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATUS),
        ));

    Router::new()
        .merge(hello_routes)
        .merge(status_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
