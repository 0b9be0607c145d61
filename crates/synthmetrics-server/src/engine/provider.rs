use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use synthmetrics_core::catalog::supported_metrics;
use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_core::metric::{MetricCatalogEntry, MetricSample};
use synthmetrics_core::resource::GroupResource;
use synthmetrics_core::selector::LabelSelector;

use crate::discovery::{ResourceLister, ResourceTypeResolver};

use super::aggregate::build_aggregate;
use super::counter::CounterStore;
use super::normalize::normalize;
use super::sample::build_sample;

const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Message shown to callers for any lister failure; the cause is only logged.
const LIST_FAILED: &str = "unable to list matching resources";

/// Engine facade: owns the counter table and the two collaborators.
pub struct MetricsEngine {
    resolver: Arc<dyn ResourceTypeResolver>,
    lister: Arc<dyn ResourceLister>,
    counters: CounterStore,
    list_timeout: Duration,
}

impl MetricsEngine {
    /// Fresh engine with an empty counter table.
    pub fn new(resolver: Arc<dyn ResourceTypeResolver>, lister: Arc<dyn ResourceLister>) -> Self {
        Self {
            resolver,
            lister,
            counters: CounterStore::new(),
            list_timeout: DEFAULT_LIST_TIMEOUT,
        }
    }

    pub fn with_list_timeout(mut self, list_timeout: Duration) -> Self {
        self.list_timeout = list_timeout;
        self
    }

    /// Read-only view of the counter table; counters only move through queries.
    ///
    /// ```compile_fail
    /// # use synthmetrics_core::metric::MetricIdentifier;
    /// # use synthmetrics_core::resource::GroupResource;
    /// # fn advance(engine: &synthmetrics_server::engine::MetricsEngine) {
    /// let id = MetricIdentifier::new(GroupResource::core("pods"), "packets-per-second", true);
    /// engine.counters().next_value(id);
    /// # }
    /// ```
    pub fn counters(&self) -> &CounterStore {
        &self.counters
    }

    fn value_for(&self, group_resource: &GroupResource, metric_name: &str, namespaced: bool) -> Result<i64> {
        let id = normalize(self.resolver.as_ref(), group_resource, metric_name, namespaced)?;
        let value = self.counters.next_value(id);
        tracing::debug!(resource = %group_resource, metric = %metric_name, namespaced, value, "counter advanced");
        Ok(value)
    }

    /// Sample for one named instance. `namespace: None` is the root-scoped form.
    pub fn metric_by_name(
        &self,
        group_resource: &GroupResource,
        namespace: Option<&str>,
        name: &str,
        metric_name: &str,
    ) -> Result<MetricSample> {
        let value = self.value_for(group_resource, metric_name, namespace.is_some())?;
        build_sample(self.resolver.as_ref(), value, group_resource, namespace, name, metric_name)
    }

    /// Samples for every instance matching `selector`, sharing one counter value.
    pub async fn metric_by_selector(
        &self,
        group_resource: &GroupResource,
        namespace: Option<&str>,
        selector: &LabelSelector,
        metric_name: &str,
    ) -> Result<Vec<MetricSample>> {
        let total = self.value_for(group_resource, metric_name, namespace.is_some())?;
        let resource = self.resolver.resolve(group_resource)?;

        let listed = match timeout(self.list_timeout, self.lister.list(&resource, namespace, selector)).await {
            Ok(Ok(listed)) => listed,
            Ok(Err(e)) => {
                tracing::error!(resource = %group_resource, selector = %selector, error = %e, "unable to list matching resources");
                return Err(MetricsError::Internal(LIST_FAILED.into()));
            }
            Err(_) => {
                tracing::warn!(
                    resource = %group_resource,
                    selector = %selector,
                    timeout = ?self.list_timeout,
                    "listing matching resources timed out"
                );
                return Err(MetricsError::Internal(LIST_FAILED.into()));
            }
        };

        build_aggregate(self.resolver.as_ref(), total, group_resource, metric_name, &listed)
    }

    /// The static catalog, unfiltered.
    pub fn list_supported_metrics(&self) -> Vec<MetricCatalogEntry> {
        supported_metrics()
    }
}
