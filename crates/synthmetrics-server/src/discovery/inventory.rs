//! Config-driven resource inventory.
//!
//! Resolves resource type aliases against the configured types and lists the
//! configured objects, filtered by namespace and label selector.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_core::resource::{GroupResource, ResourceType};
use synthmetrics_core::selector::LabelSelector;

use crate::config::{MetricsConfig, ResourceTypeConfig};

use super::{ListError, ResourceLister, ResourceTypeResolver};

#[derive(Debug, Clone)]
struct StoredObject {
    group_resource: GroupResource,
    namespace: Option<String>,
    name: String,
    labels: BTreeMap<String, String>,
}

/// In-memory resolver + lister built once at startup.
#[derive(Debug, Default)]
pub struct StaticInventory {
    types: Vec<ResourceTypeConfig>,
    objects: Vec<StoredObject>,
}

impl StaticInventory {
    pub fn new(types: Vec<ResourceTypeConfig>) -> Self {
        Self { types, objects: Vec::new() }
    }

    pub fn from_config(cfg: &MetricsConfig) -> Result<Self> {
        let mut inv = Self::new(cfg.resources.clone());
        for o in &cfg.objects {
            inv.insert(&GroupResource::parse(&o.resource), o.namespace.clone(), &o.name, o.labels.clone())?;
        }
        Ok(inv)
    }

    /// Register an object; the resource may be given by any alias.
    pub fn insert(
        &mut self,
        group_resource: &GroupResource,
        namespace: Option<String>,
        name: &str,
        labels: BTreeMap<String, String>,
    ) -> Result<()> {
        let ty = self.resolve(group_resource)?;
        self.objects.push(StoredObject {
            group_resource: ty.group_resource,
            namespace,
            name: name.to_string(),
            labels,
        });
        Ok(())
    }
}

impl ResourceTypeResolver for StaticInventory {
    fn resolve(&self, group_resource: &GroupResource) -> Result<ResourceType> {
        let ty = self
            .types
            .iter()
            .find(|t| t.answers_to(group_resource))
            .ok_or_else(|| MetricsError::Resolution(group_resource.to_string()))?;

        Ok(ResourceType {
            group_resource: ty.group_resource(),
            kind: ty.kind.clone(),
            version: ty.version.clone(),
            singular: ty.singular.clone(),
            namespaced: ty.namespaced,
        })
    }
}

#[async_trait]
impl ResourceLister for StaticInventory {
    async fn list(
        &self,
        resource: &ResourceType,
        namespace: Option<&str>,
        selector: &LabelSelector,
    ) -> std::result::Result<Value, ListError> {
        if !self.types.iter().any(|t| t.group_resource() == resource.group_resource) {
            return Err(ListError::NotListable(resource.group_resource.to_string()));
        }

        let items: Vec<Value> = self
            .objects
            .iter()
            .filter(|o| o.group_resource == resource.group_resource)
            .filter(|o| namespace.is_none() || o.namespace.as_deref() == namespace)
            .filter(|o| selector.matches(&o.labels))
            .map(|o| {
                let mut metadata = json!({ "name": o.name, "labels": o.labels });
                if let Some(ns) = &o.namespace {
                    metadata["namespace"] = json!(ns);
                }
                json!({
                    "apiVersion": resource.api_version(),
                    "kind": resource.kind,
                    "metadata": metadata,
                })
            })
            .collect();

        Ok(json!({
            "apiVersion": resource.api_version(),
            "kind": format!("{}List", resource.kind),
            "items": items,
        }))
    }
}
