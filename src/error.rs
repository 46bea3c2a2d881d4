use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::probe::ProbeError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Uptime probe failed: {0}")]
    Probe(#[from] ProbeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Details stay in the log; clients get a generic body
        tracing::error!(error = %self, "Request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
