//! Routes for the organizational hierarchy and the three lookup tables.
//! List endpoints are open to any permitted reader; creation requires the
//! org management permission.

use crate::{
    auth::{permission, AuthRouterExt},
    errors::ServiceError,
    services::org::{DivisionInput, NamedInput, SectionInput},
    AppState,
};
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct DivisionListParams {
    pub department_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct SectionListParams {
    pub division_id: Option<i64>,
}

pub async fn list_regions(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.services.org.list_regions().await?))
}

pub async fn create_region(
    State(state): State<AppState>,
    Json(input): Json<NamedInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let region = state.services.org.create_region(input).await?;
    Ok((StatusCode::CREATED, Json(region)))
}

pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.services.org.list_departments().await?))
}

pub async fn create_department(
    State(state): State<AppState>,
    Json(input): Json<NamedInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let department = state.services.org.create_department(input).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn list_divisions(
    State(state): State<AppState>,
    Query(params): Query<DivisionListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(
        state.services.org.list_divisions(params.department_id).await?,
    ))
}

pub async fn create_division(
    State(state): State<AppState>,
    Json(input): Json<DivisionInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let division = state.services.org.create_division(input).await?;
    Ok((StatusCode::CREATED, Json(division)))
}

pub async fn list_sections(
    State(state): State<AppState>,
    Query(params): Query<SectionListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(
        state.services.org.list_sections(params.division_id).await?,
    ))
}

pub async fn create_section(
    State(state): State<AppState>,
    Json(input): Json<SectionInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let section = state.services.org.create_section(input).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

pub async fn list_procurement_types(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.services.org.list_procurement_types().await?))
}

pub async fn create_procurement_type(
    State(state): State<AppState>,
    Json(input): Json<NamedInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.org.create_procurement_type(input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn list_loa_statuses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.services.org.list_loa_statuses().await?))
}

pub async fn create_loa_status(
    State(state): State<AppState>,
    Json(input): Json<NamedInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.org.create_loa_status(input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn list_contract_statuses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(state.services.org.list_contract_statuses().await?))
}

pub async fn create_contract_status(
    State(state): State<AppState>,
    Json(input): Json<NamedInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.org.create_contract_status(input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub fn org_routes() -> Router<AppState> {
    Router::new()
        .route("/regions", get(list_regions))
        .route("/departments", get(list_departments))
        .route("/divisions", get(list_divisions))
        .route("/sections", get(list_sections))
        .route("/procurement-types", get(list_procurement_types))
        .route("/loa-statuses", get(list_loa_statuses))
        .route("/contract-statuses", get(list_contract_statuses))
        .with_permission(permission::ORG_READ)
        .merge(
            Router::new()
                .route("/regions", post(create_region))
                .route("/departments", post(create_department))
                .route("/divisions", post(create_division))
                .route("/sections", post(create_section))
                .route("/procurement-types", post(create_procurement_type))
                .route("/loa-statuses", post(create_loa_status))
                .route("/contract-statuses", post(create_contract_status))
                .with_permission(permission::ORG_MANAGE),
        )
}
