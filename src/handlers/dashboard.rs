use crate::{
    auth::{permission, AuthRouterExt},
    errors::ServiceError,
    services::dashboard::DashboardSummary,
    AppState,
};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Aggregate counts across the procurement pipeline", body = DashboardSummary)
    ),
    tag = "dashboard"
)]
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let summary = state.services.dashboard.summary().await?;
    Ok(Json(summary))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_summary))
        .with_permission(permission::DASHBOARD_READ)
}
