//! Host status endpoint.
//!
//! Reports a constant "OK" together with the host uptime, read fresh from the
//! uptime source on every request. A probe failure becomes a 500 response.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

pub const STATUS_OK: &str = "OK";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub uptime: String,
}

/// Status handler.
#[instrument(name = "status::status", skip(state))]
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    let uptime = state.uptime.uptime().await?;

    Ok(Json(StatusResponse {
        status: STATUS_OK,
        uptime,
    }))
}
