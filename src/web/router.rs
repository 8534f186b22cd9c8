use axum::{routing::get, Router};
use crate::state::AppState;
use super::handlers::{health, index};

pub fn build_router(state: AppState) -> Router {
    Router::new().route("/", get(index)).route("/health", get(health)).with_state(state)
}
