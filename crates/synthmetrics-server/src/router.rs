//! Axum router wiring.
//!
//! Exposes the metrics API under its group-version base plus `/healthz`.

use axum::{routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route(api::API_BASE, get(api::list_metrics))
        .route(&format!("{}/*path", api::API_BASE), get(api::get_metric))
        .with_state(state)
}
