//! Metric identifiers and externally shaped samples.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::quantity::Quantity;
use crate::resource::GroupResource;

/// Counter slot key. Two identifiers are equal iff their normalized forms are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricIdentifier {
    pub group_resource: GroupResource,
    pub metric_name: String,
    pub namespaced: bool,
}

impl MetricIdentifier {
    pub fn new(group_resource: GroupResource, metric_name: impl Into<String>, namespaced: bool) -> Self {
        Self {
            group_resource,
            metric_name: metric_name.into(),
            namespaced,
        }
    }
}

/// Reference to the object a metric sample describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    pub api_version: String,
}

/// One metric value for one resource instance. Immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub described_object: ObjectReference,
    pub metric_name: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub value: Quantity,
}

impl MetricSample {
    /// Copy of this sample carrying a different value.
    pub fn with_value(mut self, value: Quantity) -> Self {
        self.value = value;
        self
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Static description of a supported metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCatalogEntry {
    pub group_resource: GroupResource,
    pub metric_name: String,
    pub namespaced: bool,
}
