//! Test harness: application state backed by an in-memory SQLite database
//! with migrations applied.

use std::sync::Arc;
use std::time::Duration;

use tendertrack_api::{
    config::AppConfig,
    db::{self, DbConfig},
    events::{self, EventSender},
    AppState,
};
use tokio::sync::mpsc;

pub struct TestApp {
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory
        // database.
        let db_cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(300),
            acquire_timeout: Duration::from_secs(5),
        };

        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let cfg = AppConfig {
            database_url: db_cfg.url.clone(),
            jwt_secret: "x".repeat(64),
            jwt_expiration: 3600,
            host: "127.0.0.1".to_string(),
            port: 18_080,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
            log_json: false,
            auto_migrate: false,
            requisition_creation_deadline_days: 7,
            db_max_connections: 1,
            db_min_connections: 1,
            db_connect_timeout_secs: 5,
            db_idle_timeout_secs: 300,
            db_acquire_timeout_secs: 5,
            event_channel_capacity: 256,
        };

        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = Arc::new(EventSender::new(event_tx));
        let event_task = tokio::spawn(events::process_events(event_rx));

        let state = AppState::new(Arc::new(pool), Arc::new(cfg), event_sender);

        Self {
            state,
            _event_task: event_task,
        }
    }
}
