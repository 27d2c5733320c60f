//! Signup, login and the `me` endpoint. Signup and login are public;
//! `me` reads the authenticated user back out of the request extensions.
//! Self-registered accounts always get the staff role; role changes go
//! through the user-management endpoint.

use crate::{
    auth::{permission, AuthRouterExt, AuthUser, TokenResponse},
    errors::ServiceError,
    services::users::{LoginInput, RegisterUserInput, SetRoleInput, UserAccountView},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Router,
};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = RegisterUserInput,
    responses(
        (status = 201, description = "Account created", body = UserAccountView),
        (status = 400, description = "Unknown staff number or invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Username taken", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let account = state.services.users.register(input).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "JWT issued", body = TokenResponse),
        (status = 401, description = "Bad credentials or disabled account", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let token = state.services.users.login(input).await?;
    Ok(Json(token))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Claims of the calling user"),
        (status = 401, description = "Missing or invalid token", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn me(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
    Json(json!({
        "user_id": user.user_id,
        "username": user.username,
        "role": user.role,
        "permissions": user.permissions,
        "employee_id": user.employee_id,
    }))
}

#[utoipa::path(
    put,
    path = "/auth/users/:id/role",
    request_body = SetRoleInput,
    responses(
        (status = 200, description = "Role updated", body = UserAccountView),
        (status = 403, description = "Caller lacks user management rights", body = crate::errors::ErrorResponse),
        (status = 404, description = "No such account", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn set_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SetRoleInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let account = state.services.users.set_role(id, input).await?;
    Ok(Json(account))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(Router::new().route("/me", get(me)).with_auth())
        .merge(
            Router::new()
                .route("/users/:id/role", put(set_role))
                .with_permission(permission::USERS_MANAGE),
        )
}
