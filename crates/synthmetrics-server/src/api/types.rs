//! Response bodies.

use serde::Serialize;

use synthmetrics_core::error::MetricsError;
use synthmetrics_core::metric::{MetricCatalogEntry, MetricSample};

use super::API_GROUP_VERSION;

#[derive(Debug, Default, Serialize)]
pub struct ListMeta {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValueList {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub metadata: ListMeta,
    pub items: Vec<MetricSample>,
}

impl MetricValueList {
    pub fn new(items: Vec<MetricSample>) -> Self {
        Self {
            kind: "MetricValueList",
            api_version: API_GROUP_VERSION,
            metadata: ListMeta::default(),
            items,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub name: String,
    pub singular_name: String,
    pub namespaced: bool,
    pub kind: &'static str,
    pub verbs: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub group_version: &'static str,
    pub resources: Vec<ApiResource>,
}

impl ApiResourceList {
    pub fn from_catalog(entries: &[MetricCatalogEntry]) -> Self {
        let resources = entries
            .iter()
            .map(|e| ApiResource {
                name: format!("{}/{}", e.group_resource, e.metric_name),
                singular_name: String::new(),
                namespaced: e.namespaced,
                kind: "MetricValueList",
                verbs: vec!["get"],
            })
            .collect();

        Self {
            kind: "APIResourceList",
            api_version: "v1",
            group_version: API_GROUP_VERSION,
            resources,
        }
    }
}

/// Failure body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub status: &'static str,
    pub message: String,
    pub reason: &'static str,
    pub code: u16,
}

impl Status {
    pub fn failure(err: &MetricsError) -> Self {
        let code = err.client_code();
        Self {
            kind: "Status",
            api_version: "v1",
            status: "Failure",
            message: err.to_string(),
            reason: code.as_str(),
            code: code.http_status(),
        }
    }
}
