use crate::{
    auth::{permission, AuthRouterExt},
    errors::ServiceError,
    services::employees::{CreateEmployeeInput, EmployeeFilter, UpdateEmployeeInput},
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
    path = "/api/v1/employees",
    request_body = CreateEmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = crate::entities::employee::Model),
        (status = 409, description = "Duplicate staff number or email", body = crate::errors::ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state.services.employees.create_employee(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Employees matching the filter", body = [crate::entities::employee::Model])
    ),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let employees = state.services.employees.list_employees(filter).await?;
    Ok(Json(employees))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/:id",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = crate::entities::employee::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state.services.employees.get_employee(id).await?;
    Ok(Json(employee))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/:id",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = UpdateEmployeeInput,
    responses(
        (status = 200, description = "Updated employee", body = crate::entities::employee::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateEmployeeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state.services.employees.update_employee(id, input).await?;
    Ok(Json(employee))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/:id",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee deactivated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn deactivate_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.employees.deactivate_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees))
        .route("/:id", get(get_employee))
        .with_permission(permission::EMPLOYEES_READ)
        .merge(
            Router::new()
                .route("/", post(create_employee))
                .route("/:id", put(update_employee))
                .route("/:id", delete(deactivate_employee))
                .with_permission(permission::EMPLOYEES_MANAGE),
        )
}
