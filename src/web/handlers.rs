use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::domain::snapshot::Snapshot;
use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Json<Snapshot> {
    match state.store.load().await {
        Ok(Some(snapshot)) => Json(snapshot),
        Ok(None) => Json(state.cache.snapshot().await),
        Err(e) => {
            tracing::warn!(error = %e, "storage read failed, serving in-memory snapshot");
            Json(state.cache.snapshot().await)
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let storage = state.store.is_ready().await;
    Json(json!({ "status": "ok", "storage": storage }))
}
