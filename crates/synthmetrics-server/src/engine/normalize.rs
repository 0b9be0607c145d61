use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_core::metric::MetricIdentifier;
use synthmetrics_core::resource::GroupResource;

use crate::discovery::ResourceTypeResolver;

/// Canonicalize a metric identifier so that aliases share one counter slot.
///
/// Only the group-resource is rewritten; metric name and scope are kept as given.
/// Resolver errors are returned unmodified.
pub fn normalize(
    resolver: &dyn ResourceTypeResolver,
    group_resource: &GroupResource,
    metric_name: &str,
    namespaced: bool,
) -> Result<MetricIdentifier> {
    if group_resource.resource.is_empty() {
        return Err(MetricsError::BadRequest("resource must not be empty".into()));
    }
    let resolved = resolver.resolve(group_resource)?;
    Ok(MetricIdentifier::new(resolved.group_resource, metric_name, namespaced))
}
