//! Compiled-in list of supported metrics.

use crate::metric::MetricCatalogEntry;
use crate::resource::GroupResource;

// (group, resource, metric, namespaced)
const SUPPORTED: [(&str, &str, &str, bool); 3] = [
    ("", "pods", "packets-per-second", true),
    ("", "services", "connections-per-second", true),
    ("", "namespaces", "queue-length", false),
];

/// All supported metrics, in fixed order.
pub fn supported_metrics() -> Vec<MetricCatalogEntry> {
    SUPPORTED
        .iter()
        .map(|(group, resource, metric, namespaced)| MetricCatalogEntry {
            group_resource: GroupResource::new(*group, *resource),
            metric_name: (*metric).to_string(),
            namespaced: *namespaced,
        })
        .collect()
}
