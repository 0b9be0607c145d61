//! Collaborator seams: resource type resolution and instance listing.
//!
//! The engine depends only on these two traits. `StaticInventory` implements
//! both from configuration; any cluster-backed discovery client can stand in.

pub mod inventory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use synthmetrics_core::error::Result;
use synthmetrics_core::resource::{GroupResource, ResourceType};
use synthmetrics_core::selector::LabelSelector;

pub use inventory::StaticInventory;

/// Maps a (possibly aliased) group-resource to its canonical resource type.
pub trait ResourceTypeResolver: Send + Sync {
    /// Unknown types fail with `MetricsError::Resolution`.
    fn resolve(&self, group_resource: &GroupResource) -> Result<ResourceType>;
}

/// Failure reported by a lister backend. Never shown to API callers.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("resource type {0} is not listable")]
    NotListable(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Lists instances of a resource type matching a label selector.
///
/// Returns an unstructured list object: `{"items": [{"metadata": {"name", "namespace"}}]}`.
#[async_trait]
pub trait ResourceLister: Send + Sync {
    async fn list(
        &self,
        resource: &ResourceType,
        namespace: Option<&str>,
        selector: &LabelSelector,
    ) -> std::result::Result<Value, ListError>;
}
