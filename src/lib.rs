//! TenderTrack API Library
//!
//! Core functionality for the tender/procurement lifecycle tracker.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod imports;
pub mod migrator;
pub mod openapi;
pub mod scheduling;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::auth::{AuthConfig, AuthService};
use crate::config::AppConfig;
use crate::events::EventSender;
use crate::handlers::AppServices;
use crate::services::{
    contracts::ContractService, dashboard::DashboardService, employees::EmployeeService,
    imports::ImportService, org::OrgService, requisitions::RequisitionService,
    tenders::TenderService, users::UserService,
};

/// Shared application state carried by every route.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub auth_service: Arc<AuthService>,
    pub event_sender: Arc<EventSender>,
    pub services: AppServices,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: Arc<AppConfig>,
        event_sender: Arc<EventSender>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            token_expiration_secs: config.jwt_expiration,
        }));

        let org = OrgService::new(db.clone());
        let employees = EmployeeService::new(db.clone(), event_sender.clone());
        let services = AppServices {
            requisitions: RequisitionService::new(
                db.clone(),
                event_sender.clone(),
                config.requisition_creation_deadline_days,
            ),
            tenders: TenderService::new(db.clone(), event_sender.clone()),
            contracts: ContractService::new(db.clone(), event_sender.clone()),
            employees: employees.clone(),
            org: org.clone(),
            dashboard: DashboardService::new(db.clone()),
            imports: ImportService::new(
                db.clone(),
                event_sender.clone(),
                org,
                employees.clone(),
            ),
            users: UserService::new(
                db.clone(),
                event_sender.clone(),
                auth_service.clone(),
                employees,
            ),
        };

        Self {
            db,
            config,
            auth_service,
            event_sender,
            services,
        }
    }
}

/// Versioned API routes, permission-gated per group.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/requisitions", handlers::requisitions::requisition_routes())
        .nest("/tenders", handlers::tenders::tender_routes())
        .nest("/contracts", handlers::contracts::contract_routes())
        .nest("/employees", handlers::employees::employee_routes())
        .nest("/org", handlers::org::org_routes())
        .nest("/dashboard", handlers::dashboard::dashboard_routes())
        .nest("/imports", handlers::imports::import_routes())
}

/// Full application router: versioned API, auth, docs and probes.
pub fn app(state: AppState) -> Router {
    let auth_service = state.auth_service.clone();

    Router::new()
        .nest("/api/v1", api_v1_routes())
        .nest("/auth", handlers::auth::auth_routes())
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .merge(openapi::swagger_routes())
        .layer(Extension(auth_service))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn api_status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tendertrack-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Json(json!({
        "status": db_status,
        "checks": { "database": db_status },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
