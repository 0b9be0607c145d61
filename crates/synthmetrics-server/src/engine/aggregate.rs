use serde_json::Value;

use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_core::metric::MetricSample;
use synthmetrics_core::quantity::Quantity;
use synthmetrics_core::resource::{GroupResource, ResourceInstanceRef};

use crate::discovery::ResourceTypeResolver;

use super::sample::{build_sample, VALUE_SCALE};

/// Extract instance identities from an unstructured list object, in list order.
pub fn instances_of(listed: &Value) -> Result<Vec<ResourceInstanceRef>> {
    let items = listed
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| MetricsError::Aggregation("not a list".into()))?;

    items
        .iter()
        .map(|item| {
            let meta = item.get("metadata");
            let name = meta
                .and_then(|m| m.get("name"))
                .and_then(Value::as_str)
                .ok_or_else(|| MetricsError::Aggregation("list item has no metadata.name".into()))?;
            let namespace = meta
                .and_then(|m| m.get("namespace"))
                .and_then(Value::as_str)
                .filter(|ns| !ns.is_empty())
                .map(str::to_string);
            Ok(ResourceInstanceRef::new(namespace, name))
        })
        .collect()
}

/// `VALUE_SCALE * total / count` milli-units; the remainder is discarded.
pub fn even_share(total: i64, count: usize) -> Result<Quantity> {
    if count == 0 {
        return Err(MetricsError::Aggregation("empty selection".into()));
    }
    let count = i64::try_from(count)
        .map_err(|_| MetricsError::Aggregation("selection too large".into()))?;
    Ok(Quantity::from_milli(total.saturating_mul(VALUE_SCALE) / count))
}

/// One sample per listed instance, each carrying an equal share of `total`.
pub fn build_aggregate(
    resolver: &dyn ResourceTypeResolver,
    total: i64,
    group_resource: &GroupResource,
    metric_name: &str,
    listed: &Value,
) -> Result<Vec<MetricSample>> {
    let instances = instances_of(listed)?;
    let share = even_share(total, instances.len())?;

    instances
        .iter()
        .map(|inst| {
            build_sample(resolver, 0, group_resource, inst.namespace.as_deref(), &inst.name, metric_name)
                .map(|s| s.with_value(share))
        })
        .collect()
}
