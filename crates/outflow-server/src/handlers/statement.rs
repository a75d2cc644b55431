//! Statement handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use crate::{AppError, AppState};
use outflow_core::{load_statement_with, NormalizedRecord, Statement};

/// Read the configured statement off the async runtime
///
/// The read is the only blocking step of a request and completes before
/// anything downstream runs.
pub(crate) async fn load(state: &AppState) -> Result<Statement, AppError> {
    let path = state.config.statement_path.clone();
    let options = state.config.load_options;

    let loaded = tokio::task::spawn_blocking(move || load_statement_with(&path, options)).await?;
    let statement = loaded.map_err(AppError::from_load)?;

    debug!(rows = statement.len(), "Statement loaded");
    Ok(statement)
}

/// GET / - Welcome page
pub async fn index() -> Json<Value> {
    Json(json!({
        "User behavior": "Analysis"
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /data - Full normalized statement as an array of row objects
pub async fn read_statement(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NormalizedRecord>>, AppError> {
    let statement = load(&state).await?;
    Ok(Json(statement.records))
}
