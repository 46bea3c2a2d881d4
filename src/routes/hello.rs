//! Static greeting endpoint.

use axum::Json;
use serde::Serialize;

pub const GREETING: &str = "Hello, World!";

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
}

/// Greeting handler. Ignores query parameters, headers and body.
pub async fn hello() -> Json<GreetingResponse> {
    Json(GreetingResponse { message: GREETING })
}
