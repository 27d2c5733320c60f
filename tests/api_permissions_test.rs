//! HTTP-level checks: bearer auth, per-route permission gating and the
//! admin bypass.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::TestApp;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tendertrack_api::{
    entities::user_account::UserRole,
    services::users::{RegisterUserInput, SetRoleInput},
};
use tower::ServiceExt;

async fn register_and_login(app: &TestApp, username: &str, role: UserRole) -> String {
    let account = app
        .state
        .services
        .users
        .register(RegisterUserInput {
            username: username.to_string(),
            password: "correct horse battery".to_string(),
            staff_number: None,
        })
        .await
        .expect("register");

    // Registration always yields a staff account; elevate through the
    // service, the same path the gated role endpoint takes.
    if role != UserRole::Staff {
        app.state
            .services
            .users
            .set_role(account.id, SetRoleInput { role })
            .await
            .expect("set role");
    }

    app.state
        .services
        .users
        .login(tendertrack_api::services::users::LoginInput {
            username: username.to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .expect("login")
        .access_token
}

fn router(app: &TestApp) -> Router {
    tendertrack_api::app(app.state.clone())
}

async fn send(
    router: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn requisition_body(number: &str) -> Value {
    json!({
        "requisition_number": number,
        "description": "Office stationery",
        "procurement_category": "QUOTATION",
        "date_assigned": "2025-03-03"
    })
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = TestApp::new().await;
    let (status, _) = send(
        router(&app),
        Method::GET,
        "/api/v1/requisitions",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn viewer_can_read_but_not_write() {
    let app = TestApp::new().await;
    let token = register_and_login(&app, "viewer1", UserRole::Viewer).await;

    let (status, _) = send(
        router(&app),
        Method::GET,
        "/api/v1/requisitions",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        router(&app),
        Method::POST,
        "/api/v1/requisitions",
        Some(&token),
        Some(requisition_body("REQ-V1")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn staff_can_create_requisitions_with_derived_deadline() {
    let app = TestApp::new().await;
    let token = register_and_login(&app, "staff1", UserRole::Staff).await;

    let (status, body) = send(
        router(&app),
        Method::POST,
        "/api/v1/requisitions",
        Some(&token),
        Some(requisition_body("REQ-S1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["creation_deadline"], json!("2025-03-10"));
}

#[tokio::test]
async fn staff_cannot_run_imports_but_admin_can() {
    let app = TestApp::new().await;
    let staff_token = register_and_login(&app, "staff2", UserRole::Staff).await;
    let admin_token = register_and_login(&app, "admin1", UserRole::Admin).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/imports/department")
        .header(header::AUTHORIZATION, format!("Bearer {staff_token}"))
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from("name\nProcurement\n"))
        .unwrap();
    let response = router(&app).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin bypasses the permission check.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/imports/department")
        .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from("name\nProcurement\n"))
        .unwrap();
    let response = router(&app).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_cannot_choose_a_role() {
    let app = TestApp::new().await;

    // A role smuggled into the signup body is ignored; the account comes
    // back as staff.
    let (status, body) = send(
        router(&app),
        Method::POST,
        "/auth/signup",
        None,
        Some(json!({
            "username": "wannabe_admin",
            "password": "correct horse battery",
            "role": "admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], json!("staff"));

    let (status, body) = send(
        router(&app),
        Method::POST,
        "/auth/login",
        None,
        Some(json!({
            "username": "wannabe_admin",
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().expect("token").to_string();

    // Staff accounts stay shut out of admin-only surface.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/imports/department")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from("name\nProcurement\n"))
        .unwrap();
    let response = router(&app).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn role_change_requires_user_management_rights() {
    let app = TestApp::new().await;
    let admin_token = register_and_login(&app, "root", UserRole::Admin).await;
    let staff_token = register_and_login(&app, "clerk", UserRole::Staff).await;

    let target = app
        .state
        .services
        .users
        .register(RegisterUserInput {
            username: "promotee".to_string(),
            password: "correct horse battery".to_string(),
            staff_number: None,
        })
        .await
        .expect("register");

    // Staff lacks users:manage.
    let (status, _) = send(
        router(&app),
        Method::PUT,
        &format!("/auth/users/{}/role", target.id),
        Some(&staff_token),
        Some(json!({"role": "manager"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admin bypass covers it.
    let (status, body) = send(
        router(&app),
        Method::PUT,
        &format!("/auth/users/{}/role", target.id),
        Some(&admin_token),
        Some(json!({"role": "manager"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], json!("manager"));
}

#[tokio::test]
async fn health_and_status_are_public() {
    let app = TestApp::new().await;

    let (status, body) = send(router(&app), Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], json!("healthy"));

    let (status, body) = send(router(&app), Method::GET, "/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], json!("tendertrack-api"));
}
