use crate::{
    auth::{permission, AuthRouterExt},
    errors::ServiceError,
    services::tenders::{
        CommitteeMemberInput, CreateTenderInput, TenderCommittee, TenderFilter, UpdateTenderInput,
    },
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
    path = "/api/v1/tenders",
    request_body = CreateTenderInput,
    responses(
        (status = 201, description = "Tender created with derived dates applied", body = crate::entities::tender::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate tender number", body = crate::errors::ErrorResponse)
    ),
    tag = "tenders"
)]
pub async fn create_tender(
    State(state): State<AppState>,
    Json(input): Json<CreateTenderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let tender = state.services.tenders.create_tender(input).await?;
    Ok((StatusCode::CREATED, Json(tender)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tenders",
    params(TenderFilter),
    responses(
        (status = 200, description = "Tenders matching the filter", body = [crate::entities::tender::Model])
    ),
    tag = "tenders"
)]
pub async fn list_tenders(
    State(state): State<AppState>,
    Query(filter): Query<TenderFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let tenders = state.services.tenders.list_tenders(filter).await?;
    Ok(Json(tenders))
}

#[utoipa::path(
    get,
    path = "/api/v1/tenders/:id",
    params(("id" = i64, Path, description = "Tender id")),
    responses(
        (status = 200, description = "Tender", body = crate::entities::tender::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tenders"
)]
pub async fn get_tender(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let tender = state.services.tenders.get_tender(id).await?;
    Ok(Json(tender))
}

#[utoipa::path(
    put,
    path = "/api/v1/tenders/:id",
    params(("id" = i64, Path, description = "Tender id")),
    request_body = UpdateTenderInput,
    responses(
        (status = 200, description = "Updated tender with dates recomputed", body = crate::entities::tender::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tenders"
)]
pub async fn update_tender(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTenderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let tender = state.services.tenders.update_tender(id, input).await?;
    Ok(Json(tender))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tenders/:id",
    params(("id" = i64, Path, description = "Tender id")),
    responses(
        (status = 204, description = "Tender and its committee rows deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tenders"
)]
pub async fn delete_tender(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.tenders.delete_tender(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/tenders/:id/committees/:committee/members",
    params(
        ("id" = i64, Path, description = "Tender id"),
        ("committee" = String, Path, description = "opening or evaluation")
    ),
    responses(
        (status = 200, description = "Committee membership"),
        (status = 404, description = "Tender not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tenders"
)]
pub async fn list_committee_members(
    State(state): State<AppState>,
    Path((id, committee)): Path<(i64, TenderCommittee)>,
) -> Result<impl IntoResponse, ServiceError> {
    match committee {
        TenderCommittee::Opening => {
            let members = state.services.tenders.list_opening_committee(id).await?;
            Ok(Json(members).into_response())
        }
        TenderCommittee::Evaluation => {
            let members = state.services.tenders.list_evaluation_committee(id).await?;
            Ok(Json(members).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/tenders/:id/committees/:committee/members",
    params(
        ("id" = i64, Path, description = "Tender id"),
        ("committee" = String, Path, description = "opening or evaluation")
    ),
    request_body = CommitteeMemberInput,
    responses(
        (status = 201, description = "Member added"),
        (status = 404, description = "Tender or employee not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Employee already on this committee", body = crate::errors::ErrorResponse)
    ),
    tag = "tenders"
)]
pub async fn add_committee_member(
    State(state): State<AppState>,
    Path((id, committee)): Path<(i64, TenderCommittee)>,
    Json(input): Json<CommitteeMemberInput>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .tenders
        .add_committee_member(id, committee, input)
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    delete,
    path = "/api/v1/tenders/:id/committees/:committee/members/:employee_id",
    params(
        ("id" = i64, Path, description = "Tender id"),
        ("committee" = String, Path, description = "opening or evaluation"),
        ("employee_id" = i64, Path, description = "Employee id")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 404, description = "Membership not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tenders"
)]
pub async fn remove_committee_member(
    State(state): State<AppState>,
    Path((id, committee, employee_id)): Path<(i64, TenderCommittee, i64)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .tenders
        .remove_committee_member(id, committee, employee_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn tender_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenders))
        .route("/:id", get(get_tender))
        .route("/:id/committees/:committee/members", get(list_committee_members))
        .with_permission(permission::TENDERS_READ)
        .merge(
            Router::new()
                .route("/", post(create_tender))
                .with_permission(permission::TENDERS_CREATE),
        )
        .merge(
            Router::new()
                .route("/:id", put(update_tender))
                .route("/:id/committees/:committee/members", post(add_committee_member))
                .route(
                    "/:id/committees/:committee/members/:employee_id",
                    delete(remove_committee_member),
                )
                .with_permission(permission::TENDERS_UPDATE),
        )
        .merge(
            Router::new()
                .route("/:id", delete(delete_tender))
                .with_permission(permission::TENDERS_DELETE),
        )
}
