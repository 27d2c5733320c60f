use crate::{
    auth::{permission, AuthRouterExt},
    errors::ServiceError,
    services::contracts::{ContractFilter, CreateContractInput, UpdateContractInput},
    services::tenders::CommitteeMemberInput,
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
    path = "/api/v1/contracts",
    request_body = CreateContractInput,
    responses(
        (status = 201, description = "Contract created with expiry dates derived", body = crate::entities::contract::Model),
        (status = 404, description = "Tender not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Tender already has a contract", body = crate::errors::ErrorResponse)
    ),
    tag = "contracts"
)]
pub async fn create_contract(
    State(state): State<AppState>,
    Json(input): Json<CreateContractInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let contract = state.services.contracts.create_contract(input).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

#[utoipa::path(
    get,
    path = "/api/v1/contracts",
    params(ContractFilter),
    responses(
        (status = 200, description = "Contracts matching the filter", body = [crate::entities::contract::Model])
    ),
    tag = "contracts"
)]
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(filter): Query<ContractFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let contracts = state.services.contracts.list_contracts(filter).await?;
    Ok(Json(contracts))
}

#[utoipa::path(
    get,
    path = "/api/v1/contracts/:id",
    params(("id" = i64, Path, description = "Contract id")),
    responses(
        (status = 200, description = "Contract", body = crate::entities::contract::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "contracts"
)]
pub async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let contract = state.services.contracts.get_contract(id).await?;
    Ok(Json(contract))
}

#[utoipa::path(
    put,
    path = "/api/v1/contracts/:id",
    params(("id" = i64, Path, description = "Contract id")),
    request_body = UpdateContractInput,
    responses(
        (status = 200, description = "Updated contract with expiries recomputed", body = crate::entities::contract::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "contracts"
)]
pub async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateContractInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let contract = state.services.contracts.update_contract(id, input).await?;
    Ok(Json(contract))
}

#[utoipa::path(
    delete,
    path = "/api/v1/contracts/:id",
    params(("id" = i64, Path, description = "Contract id")),
    responses(
        (status = 204, description = "Contract and its CIT rows deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "contracts"
)]
pub async fn delete_contract(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.contracts.delete_contract(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/contracts/:id/cit/members",
    params(("id" = i64, Path, description = "Contract id")),
    responses(
        (status = 200, description = "Contract implementation team membership"),
        (status = 404, description = "Contract not found", body = crate::errors::ErrorResponse)
    ),
    tag = "contracts"
)]
pub async fn list_cit_members(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let members = state.services.contracts.list_cit_committee(id).await?;
    Ok(Json(members))
}

#[utoipa::path(
    post,
    path = "/api/v1/contracts/:id/cit/members",
    params(("id" = i64, Path, description = "Contract id")),
    request_body = CommitteeMemberInput,
    responses(
        (status = 201, description = "Member added"),
        (status = 404, description = "Contract or employee not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Employee already on the team", body = crate::errors::ErrorResponse)
    ),
    tag = "contracts"
)]
pub async fn add_cit_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CommitteeMemberInput>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.contracts.add_cit_member(id, input).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    delete,
    path = "/api/v1/contracts/:id/cit/members/:employee_id",
    params(
        ("id" = i64, Path, description = "Contract id"),
        ("employee_id" = i64, Path, description = "Employee id")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 404, description = "Membership not found", body = crate::errors::ErrorResponse)
    ),
    tag = "contracts"
)]
pub async fn remove_cit_member(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .contracts
        .remove_cit_member(id, employee_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts))
        .route("/:id", get(get_contract))
        .route("/:id/cit/members", get(list_cit_members))
        .with_permission(permission::CONTRACTS_READ)
        .merge(
            Router::new()
                .route("/", post(create_contract))
                .with_permission(permission::CONTRACTS_CREATE),
        )
        .merge(
            Router::new()
                .route("/:id", put(update_contract))
                .route("/:id/cit/members", post(add_cit_member))
                .route("/:id/cit/members/:employee_id", delete(remove_cit_member))
                .with_permission(permission::CONTRACTS_UPDATE),
        )
        .merge(
            Router::new()
                .route("/:id", delete(delete_contract))
                .with_permission(permission::CONTRACTS_DELETE),
        )
}
