//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::{Deserialize, Serialize};

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    /// `None` when running on the in-memory backend
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let db_health = match &state.db {
        None => ComponentHealth {
            status: "in-memory".to_string(),
            latency_ms: None,
        },
        Some(db) => {
            let db_start = Instant::now();
            match db
                .execute(Statement::from_string(
                    db.get_database_backend(),
                    "SELECT 1".to_string(),
                ))
                .await
            {
                Ok(_) => ComponentHealth {
                    status: "ok".to_string(),
                    latency_ms: Some(db_start.elapsed().as_millis() as u64),
                },
                Err(_) => ComponentHealth {
                    status: "error".to_string(),
                    latency_ms: None,
                },
            }
        }
    };

    let (overall_status, http_status) = if db_health.status == "error" {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    } else {
        ("ok", StatusCode::OK)
    };

    (
        http_status,
        Json(HealthResponse {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            database: db_health,
        }),
    )
}
