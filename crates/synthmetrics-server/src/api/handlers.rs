//! axum handlers over the metrics engine.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_core::selector::LabelSelector;

use crate::app_state::AppState;
use crate::engine::MetricsEngine;

use super::path::MetricPath;
use super::types::{ApiResourceList, MetricValueList, Status};

#[derive(Debug, Default, Deserialize)]
pub struct MetricQuery {
    #[serde(rename = "labelSelector", default)]
    pub label_selector: Option<String>,
}

/// Decode `path` and run the matching engine operation.
pub async fn serve_metric_path(engine: &MetricsEngine, path: &str, query: &MetricQuery) -> Result<MetricValueList> {
    let req = MetricPath::parse(path)?;
    let namespace = req.namespace.as_deref();

    let items = if req.is_wildcard() {
        let selector = LabelSelector::parse(query.label_selector.as_deref().unwrap_or_default())?;
        engine
            .metric_by_selector(&req.group_resource, namespace, &selector, &req.metric)
            .await?
    } else {
        vec![engine.metric_by_name(&req.group_resource, namespace, &req.name, &req.metric)?]
    };

    Ok(MetricValueList::new(items))
}

pub async fn get_metric(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<MetricQuery>,
) -> Response {
    match serve_metric_path(state.engine(), &path, &query).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "metric request failed");
            error_response(&e)
        }
    }
}

pub async fn list_metrics(State(state): State<AppState>) -> Json<ApiResourceList> {
    Json(ApiResourceList::from_catalog(&state.engine().list_supported_metrics()))
}

fn error_response(err: &MetricsError) -> Response {
    let status = StatusCode::from_u16(err.client_code().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(Status::failure(err))).into_response()
}
