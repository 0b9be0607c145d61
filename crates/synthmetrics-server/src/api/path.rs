//! Request path decoding.

use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_core::resource::GroupResource;

/// Instance name that switches a query to selector mode.
pub const WILDCARD_NAME: &str = "*";

/// Decoded metric request path (relative to the API base).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricPath {
    pub namespace: Option<String>,
    pub group_resource: GroupResource,
    pub name: String,
    pub metric: String,
}

impl MetricPath {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(unrecognized(path));
        }

        match segments.as_slice() {
            ["namespaces", ns, resource, name, metric] => Ok(Self {
                namespace: Some((*ns).to_string()),
                group_resource: GroupResource::parse(resource),
                name: (*name).to_string(),
                metric: (*metric).to_string(),
            }),
            [resource, name, metric] => Ok(Self {
                namespace: None,
                group_resource: GroupResource::parse(resource),
                name: (*name).to_string(),
                metric: (*metric).to_string(),
            }),
            _ => Err(unrecognized(path)),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD_NAME
    }
}

fn unrecognized(path: &str) -> MetricsError {
    MetricsError::BadRequest(format!("unrecognized metrics path: {path}"))
}
