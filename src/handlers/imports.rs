//! Bulk import endpoint. The request body is the raw CSV text; the target
//! entity comes from the path so one route serves all import kinds.

use crate::{
    auth::{permission, AuthRouterExt},
    errors::ServiceError,
    imports::{ImportReport, ImportTarget},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};

#[utoipa::path(
    post,
    path = "/api/v1/imports/:target",
    params(("target" = ImportTarget, Path, description = "Entity kind to import")),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Import outcome with per-row warnings", body = ImportReport),
        (status = 400, description = "Header missing required columns", body = crate::errors::ErrorResponse)
    ),
    tag = "imports"
)]
pub async fn run_import(
    State(state): State<AppState>,
    Path(target): Path<ImportTarget>,
    body: String,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.services.imports.import_csv(target, &body).await?;
    Ok(Json(report))
}

pub fn import_routes() -> Router<AppState> {
    Router::new()
        .route("/:target", post(run_import))
        .with_permission(permission::IMPORTS_RUN)
}
