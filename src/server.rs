//! Read-only status endpoints for the running daemon.
//!
//! The cycle loop is the sole writer of the counters file; handlers here
//! only ever read it, so the server can live on its own task without any
//! coordination beyond the shared store handle.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::error::Result;
use crate::storage::{FsStore, StateStore};

#[derive(Clone)]
pub struct AppState {
    store: Arc<FsStore>,
    identity: String,
    host: String,
}

impl AppState {
    pub fn new(store: Arc<FsStore>, identity: String, host: String) -> Self {
        Self {
            store,
            identity,
            host,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub node: String,
    pub state: String,
    pub host: String,
    pub timestamp: String,
    pub modules: u64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

/// Bind and serve until the task is dropped.
pub async fn serve(listen: String, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("status server listening on {listen}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let modules = match state.store.load_counters() {
        Ok(counters) => counters.modules_generated,
        Err(err) => {
            warn!("status endpoint could not read counters: {err}");
            0
        }
    };
    Json(StatusResponse {
        node: state.identity.clone(),
        state: "operational".to_string(),
        host: state.host.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        modules,
        status: "online".to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "genforge".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
