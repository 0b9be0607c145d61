use chrono::Utc;

use synthmetrics_core::error::Result;
use synthmetrics_core::metric::{MetricSample, ObjectReference};
use synthmetrics_core::quantity::Quantity;
use synthmetrics_core::resource::GroupResource;

use crate::discovery::ResourceTypeResolver;

/// Raw counters are reported as `raw * VALUE_SCALE` milli-units.
pub const VALUE_SCALE: i64 = 100;

pub fn scaled_quantity(raw: i64) -> Quantity {
    Quantity::from_milli(raw.saturating_mul(VALUE_SCALE))
}

/// Build one sample for a named instance, stamped with the current time.
pub fn build_sample(
    resolver: &dyn ResourceTypeResolver,
    raw: i64,
    group_resource: &GroupResource,
    namespace: Option<&str>,
    name: &str,
    metric_name: &str,
) -> Result<MetricSample> {
    let resolved = resolver.resolve(group_resource)?;

    Ok(MetricSample {
        described_object: ObjectReference {
            kind: resolved.kind.clone(),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            api_version: resolved.api_version(),
        },
        metric_name: metric_name.to_string(),
        timestamp: Utc::now(),
        value: scaled_quantity(raw),
    })
}
