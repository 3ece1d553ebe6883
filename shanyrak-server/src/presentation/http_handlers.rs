use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::routes;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthDto {
    pub(crate) status: String,
}

/// Full HTTP surface with state applied.
pub(crate) fn routes(state: AppState) -> Router {
    routes::router(state.clone())
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthDto),
        (status = 500, description = "Database is unreachable")
    )
)]
pub(crate) async fn healthz(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<HealthDto>)> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|err| AppError::Internal(err.into()))?;

    Ok((
        StatusCode::OK,
        Json(HealthDto {
            status: "ok".to_string(),
        }),
    ))
}
