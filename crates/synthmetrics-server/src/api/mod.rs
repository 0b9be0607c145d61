//! Custom-metrics style HTTP surface.
//!
//! Paths under `/apis/custom.metrics.k8s.io/v1beta1`:
//! - `/` lists the catalog as an `APIResourceList`
//! - `/{resource}/{name}/{metric}` root-scoped
//! - `/namespaces/{ns}/{resource}/{name}/{metric}` namespaced
//!
//! A `name` of `*` selects instances by `?labelSelector=`.

pub mod handlers;
pub mod path;
pub mod types;

pub const API_GROUP_VERSION: &str = "custom.metrics.k8s.io/v1beta1";
pub const API_BASE: &str = "/apis/custom.metrics.k8s.io/v1beta1";

pub use handlers::{get_metric, list_metrics, serve_metric_path, MetricQuery};
pub use path::MetricPath;
