use crate::{
    auth::{permission, AuthRouterExt},
    errors::ServiceError,
    services::requisitions::{CreateRequisitionInput, RequisitionFilter, UpdateRequisitionInput},
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};

#[utoipa::path(
    post,
    path = "/api/v1/requisitions",
    request_body = CreateRequisitionInput,
    responses(
        (status = 201, description = "Requisition created", body = crate::entities::requisition::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate requisition number", body = crate::errors::ErrorResponse)
    ),
    tag = "requisitions"
)]
pub async fn create_requisition(
    State(state): State<AppState>,
    Json(input): Json<CreateRequisitionInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let requisition = state.services.requisitions.create_requisition(input).await?;
    Ok((StatusCode::CREATED, Json(requisition)))
}

#[utoipa::path(
    get,
    path = "/api/v1/requisitions",
    params(RequisitionFilter),
    responses(
        (status = 200, description = "Requisitions matching the filter", body = [crate::entities::requisition::Model])
    ),
    tag = "requisitions"
)]
pub async fn list_requisitions(
    State(state): State<AppState>,
    Query(filter): Query<RequisitionFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let requisitions = state.services.requisitions.list_requisitions(filter).await?;
    Ok(Json(requisitions))
}

#[utoipa::path(
    get,
    path = "/api/v1/requisitions/:id",
    params(("id" = i64, Path, description = "Requisition id")),
    responses(
        (status = 200, description = "Requisition", body = crate::entities::requisition::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "requisitions"
)]
pub async fn get_requisition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let requisition = state.services.requisitions.get_requisition(id).await?;
    Ok(Json(requisition))
}

#[utoipa::path(
    put,
    path = "/api/v1/requisitions/:id",
    params(("id" = i64, Path, description = "Requisition id")),
    request_body = UpdateRequisitionInput,
    responses(
        (status = 200, description = "Updated requisition", body = crate::entities::requisition::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "requisitions"
)]
pub async fn update_requisition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateRequisitionInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let requisition = state
        .services
        .requisitions
        .update_requisition(id, input)
        .await?;
    Ok(Json(requisition))
}

#[utoipa::path(
    delete,
    path = "/api/v1/requisitions/:id",
    params(("id" = i64, Path, description = "Requisition id")),
    responses(
        (status = 204, description = "Requisition deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "requisitions"
)]
pub async fn delete_requisition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.requisitions.delete_requisition(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn requisition_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requisitions))
        .route("/:id", get(get_requisition))
        .with_permission(permission::REQUISITIONS_READ)
        .merge(
            Router::new()
                .route("/", post(create_requisition))
                .with_permission(permission::REQUISITIONS_CREATE),
        )
        .merge(
            Router::new()
                .route("/:id", put(update_requisition))
                .with_permission(permission::REQUISITIONS_UPDATE),
        )
        .merge(
            Router::new()
                .route("/:id", delete(delete_requisition))
                .with_permission(permission::REQUISITIONS_DELETE),
        )
}
