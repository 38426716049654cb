//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::params::{DecodeError, RawParameterSet};
use crate::request::ParameterError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plan", get(plan))
        .route("/plan/set", get(plan_set))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve the first request described by the query string.
async fn plan(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PlanResponse>, AppError> {
    let raw = RawParameterSet::from_pairs(pairs)?;
    let request = state.builder.build(&raw, 0)?;

    Ok(Json(PlanResponse::from_requests(&[request])))
}

/// Resolve every request described by the query string.
async fn plan_set(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PlanResponse>, AppError> {
    let raw = RawParameterSet::from_pairs(pairs)?;

    // Bound the set before building anything
    let count = raw.sub_request_count();
    let max = state.config.max_plan_set_size;
    if count > max {
        return Err(AppError::PlanSetTooLarge { count, max });
    }

    let requests = state.builder.build_plan_set(&raw)?;
    info!(count, "resolved plan set");

    Ok(Json(PlanResponse::from_requests(&requests)))
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A query parameter could not be decoded
    #[error(transparent)]
    InvalidParameter(#[from] DecodeError),

    /// The parameters do not describe a valid request
    #[error(transparent)]
    InvalidRequest(#[from] ParameterError),

    /// More sub-requests than the server allows
    #[error("plan set of {count} requests exceeds the limit of {max}")]
    PlanSetTooLarge { count: usize, max: usize },
}

impl AppError {
    /// Stable error code for the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidParameter(_) => "INVALID_PARAMETER",
            AppError::InvalidRequest(e) => e.kind(),
            AppError::PlanSetTooLarge { .. } => "PLAN_SET_TOO_LARGE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let kind = self.kind();
        let message = self.to_string();

        warn!(%status, kind, %message, "rejected plan request");

        let body = Json(ErrorResponse {
            error: message,
            kind: kind.to_string(),
        });
        (status, body).into_response()
    }
}
