//! Resource identity: group-resources, resolved resource types, and instance refs.

use std::fmt;

use serde::Serialize;

/// An (API group, resource type name) pair. The core group is `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupResource {
    pub group: String,
    pub resource: String,
}

impl GroupResource {
    pub fn new(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
        }
    }

    /// Core-group resource (e.g. `pods`).
    pub fn core(resource: impl Into<String>) -> Self {
        Self::new("", resource)
    }

    /// Parse the `resource[.group]` form used in request paths.
    ///
    /// The first dot splits: `deployments.apps` -> (`apps`, `deployments`),
    /// `pods` -> (`""`, `pods`).
    pub fn parse(s: &str) -> Self {
        match s.split_once('.') {
            Some((resource, group)) => Self::new(group, resource),
            None => Self::core(s),
        }
    }

    pub fn is_core(&self) -> bool {
        self.group.is_empty()
    }
}

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_core() {
            f.write_str(&self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// A resource type as resolved by a resource type resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    /// Canonical (plural, lowercase) group-resource.
    pub group_resource: GroupResource,
    /// Human-readable kind (e.g. `Pod`).
    pub kind: String,
    /// Preferred version (e.g. `v1`).
    pub version: String,
    /// Singular resource name (e.g. `pod`).
    pub singular: String,
    pub namespaced: bool,
}

impl ResourceType {
    /// `v1` for the core group, `group/version` otherwise.
    pub fn api_version(&self) -> String {
        if self.group_resource.is_core() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group_resource.group, self.version)
        }
    }
}

/// Identity of a resource instance a metric is reported for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInstanceRef {
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceInstanceRef {
    pub fn new(namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}
