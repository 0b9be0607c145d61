//! Metrics engine behavior: counters, samples, aggregation, failures.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use synthmetrics_core::error::MetricsError;
use synthmetrics_core::metric::MetricIdentifier;
use synthmetrics_core::resource::{GroupResource, ResourceType};
use synthmetrics_core::selector::LabelSelector;
use synthmetrics_server::config;
use synthmetrics_server::discovery::{ListError, ResourceLister, StaticInventory};
use synthmetrics_server::engine::{even_share, normalize, MetricsEngine};

const INVENTORY: &str = r#"
version: 1
objects:
  - { resource: pods, namespace: default, name: p1, labels: { app: web } }
  - { resource: pods, namespace: default, name: p2, labels: { app: web } }
  - { resource: pods, namespace: default, name: p3, labels: { app: web } }
  - { resource: pods, namespace: default, name: db, labels: { app: db } }
  - { resource: pods, namespace: other, name: p4, labels: { app: web } }
  - { resource: namespaces, name: default }
  - { resource: namespaces, name: other }
"#;

fn inventory() -> Arc<StaticInventory> {
    let cfg = config::load_from_str(INVENTORY).unwrap();
    Arc::new(StaticInventory::from_config(&cfg).unwrap())
}

fn engine() -> MetricsEngine {
    let inv = inventory();
    MetricsEngine::new(inv.clone(), inv)
}

fn engine_with_lister(lister: Arc<dyn ResourceLister>) -> MetricsEngine {
    MetricsEngine::new(inventory(), lister)
}

fn pods() -> GroupResource {
    GroupResource::core("pods")
}

fn selector(s: &str) -> LabelSelector {
    LabelSelector::parse(s).unwrap()
}

struct FailingLister;

#[async_trait]
impl ResourceLister for FailingLister {
    async fn list(&self, _: &ResourceType, _: Option<&str>, _: &LabelSelector) -> Result<Value, ListError> {
        Err(ListError::Unavailable("etcd leader lost at 10.0.0.7".into()))
    }
}

struct FixedLister(Value);

#[async_trait]
impl ResourceLister for FixedLister {
    async fn list(&self, _: &ResourceType, _: Option<&str>, _: &LabelSelector) -> Result<Value, ListError> {
        Ok(self.0.clone())
    }
}

struct StalledLister;

#[async_trait]
impl ResourceLister for StalledLister {
    async fn list(&self, _: &ResourceType, _: Option<&str>, _: &LabelSelector) -> Result<Value, ListError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(json!({ "items": [] }))
    }
}

#[test]
fn by_name_first_and_second_call() {
    let engine = engine();

    let first = engine.metric_by_name(&pods(), Some("default"), "p1", "packets-per-second").unwrap();
    assert_eq!(first.value.milli_value(), 100);
    assert_eq!(first.value.to_string(), "100m");
    assert_eq!(first.metric_name, "packets-per-second");
    assert_eq!(first.described_object.kind, "Pod");
    assert_eq!(first.described_object.api_version, "v1");
    assert_eq!(first.described_object.name, "p1");
    assert_eq!(first.described_object.namespace.as_deref(), Some("default"));

    let second = engine.metric_by_name(&pods(), Some("default"), "p1", "packets-per-second").unwrap();
    assert_eq!(second.value.milli_value(), 200);
    assert!(second.timestamp >= first.timestamp);
}

#[test]
fn aliases_share_one_sequence() {
    let engine = engine();
    let aliases = ["pods", "pod", "po", "Pod", "PODS"];

    for (i, alias) in aliases.iter().enumerate() {
        let s = engine
            .metric_by_name(&GroupResource::core(*alias), Some("default"), "p1", "packets-per-second")
            .unwrap();
        assert_eq!(s.value.milli_value(), 100 * (i as i64 + 1), "alias={alias}");
    }

    let id = MetricIdentifier::new(pods(), "packets-per-second", true);
    assert_eq!(engine.counters().current(&id), aliases.len() as i64);
    assert_eq!(engine.counters().len(), 1);
}

#[test]
fn scope_and_metric_name_split_counters() {
    let engine = engine();
    let ns = GroupResource::core("namespaces");

    let a = engine.metric_by_name(&ns, None, "default", "queue-length").unwrap();
    let b = engine.metric_by_name(&ns, None, "other", "queue-length").unwrap();
    let c = engine.metric_by_name(&ns, None, "default", "other-metric").unwrap();
    let d = engine.metric_by_name(&pods(), Some("default"), "p1", "queue-length").unwrap();

    // instance name is not part of the identifier
    assert_eq!(a.value.milli_value(), 100);
    assert_eq!(b.value.milli_value(), 200);
    assert_eq!(c.value.milli_value(), 100);
    assert_eq!(d.value.milli_value(), 100);
    assert_eq!(a.described_object.namespace, None);
    assert_eq!(a.described_object.kind, "Namespace");
}

#[test]
fn normalization_is_idempotent() {
    let inv = inventory();
    let once = normalize(inv.as_ref(), &GroupResource::core("po"), "m", true).unwrap();
    let twice = normalize(inv.as_ref(), &once.group_resource, "m", true).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once.group_resource, pods());
}

#[test]
fn unknown_and_empty_resource_types() {
    let engine = engine();

    let err = engine
        .metric_by_name(&GroupResource::core("widgets"), Some("default"), "w", "m")
        .unwrap_err();
    assert!(matches!(err, MetricsError::Resolution(_)));
    assert_eq!(err.client_code().as_str(), "NOT_FOUND");

    let err = engine.metric_by_name(&GroupResource::core(""), None, "x", "m").unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert!(engine.counters().is_empty());
}

#[tokio::test]
async fn by_selector_splits_total_evenly() {
    let engine = engine();

    // total = 1: 100 / 3 = 33 each
    let items = engine
        .metric_by_selector(&pods(), Some("default"), &selector("app=web"), "packets-per-second")
        .await
        .unwrap();
    let names: Vec<&str> = items.iter().map(|s| s.described_object.name.as_str()).collect();
    assert_eq!(names, ["p1", "p2", "p3"]);
    assert!(items.iter().all(|s| s.value.milli_value() == 33));
    assert!(items.iter().all(|s| s.described_object.namespace.as_deref() == Some("default")));

    // total = 2: 200 / 3 = 66 each
    let items = engine
        .metric_by_selector(&pods(), Some("default"), &selector("app=web"), "packets-per-second")
        .await
        .unwrap();
    let sum: i64 = items.iter().map(|s| s.value.milli_value()).sum();
    assert!(items.iter().all(|s| s.value.milli_value() == 66));
    assert!(sum <= 200 && sum >= 200 - 100 * 2);
}

#[tokio::test]
async fn selector_and_by_name_share_counter() {
    let engine = engine();
    engine.metric_by_name(&pods(), Some("default"), "p1", "packets-per-second").unwrap();

    let items = engine
        .metric_by_selector(&pods(), Some("default"), &selector("app=db"), "packets-per-second")
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].value.milli_value(), 200);
}

#[tokio::test]
async fn root_scoped_selector_lists_all_namespaces() {
    let engine = engine();
    let items = engine
        .metric_by_selector(&pods(), None, &selector("app=web"), "packets-per-second")
        .await
        .unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[3].described_object.namespace.as_deref(), Some("other"));
    // 100 / 4
    assert!(items.iter().all(|s| s.value.milli_value() == 25));

    let ns = engine
        .metric_by_selector(&GroupResource::core("namespaces"), None, &LabelSelector::everything(), "queue-length")
        .await
        .unwrap();
    assert_eq!(ns.len(), 2);
    assert!(ns.iter().all(|s| s.described_object.namespace.is_none()));
}

#[tokio::test]
async fn empty_selection_is_aggregation_error() {
    let engine = engine();
    let err = engine
        .metric_by_selector(&pods(), Some("default"), &selector("app=nothing"), "packets-per-second")
        .await
        .unwrap_err();
    match err {
        MetricsError::Aggregation(msg) => assert_eq!(msg, "empty selection"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_list_result_is_aggregation_error() {
    let engine = engine_with_lister(Arc::new(FixedLister(json!({ "kind": "Pod", "metadata": { "name": "p1" } }))));
    let err = engine
        .metric_by_selector(&pods(), Some("default"), &LabelSelector::everything(), "packets-per-second")
        .await
        .unwrap_err();
    match err {
        MetricsError::Aggregation(msg) => assert_eq!(msg, "not a list"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn list_item_without_name_is_aggregation_error() {
    let listed = json!({ "items": [{ "metadata": { "name": "a" } }, { "metadata": {} }] });
    let engine = engine_with_lister(Arc::new(FixedLister(listed)));
    let err = engine
        .metric_by_selector(&pods(), Some("default"), &LabelSelector::everything(), "packets-per-second")
        .await
        .unwrap_err();
    match err {
        MetricsError::Aggregation(msg) => assert_eq!(msg, "list item has no metadata.name"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reading_counters_does_not_advance_them() {
    let engine = engine();
    let id = MetricIdentifier::new(pods(), "packets-per-second", true);
    for _ in 0..41 {
        assert_eq!(engine.counters().current(&id), 0);
    }
    assert!(engine.counters().is_empty());

    let first = engine.metric_by_name(&pods(), Some("default"), "p1", "packets-per-second").unwrap();
    assert_eq!(first.value.milli_value(), 100);
    assert_eq!(engine.counters().current(&id), 1);
}

#[tokio::test]
async fn lister_failure_is_hidden() {
    let engine = engine_with_lister(Arc::new(FailingLister));
    let err = engine
        .metric_by_selector(&pods(), Some("default"), &LabelSelector::everything(), "packets-per-second")
        .await
        .unwrap_err();
    assert_eq!(err.client_code().as_str(), "INTERNAL");
    assert!(err.to_string().contains("unable to list matching resources"));
    assert!(!err.to_string().contains("etcd"));
}

#[tokio::test]
async fn lister_timeout_is_hidden() {
    let engine = engine_with_lister(Arc::new(StalledLister)).with_list_timeout(Duration::from_millis(20));
    let err = engine
        .metric_by_selector(&pods(), Some("default"), &LabelSelector::everything(), "packets-per-second")
        .await
        .unwrap_err();
    assert!(matches!(err, MetricsError::Internal(_)));
}

#[test]
fn even_share_truncates_and_guards_zero() {
    assert_eq!(even_share(7, 3).unwrap().milli_value(), 233);
    assert_eq!(even_share(1, 1).unwrap().milli_value(), 100);
    assert!(matches!(even_share(5, 0), Err(MetricsError::Aggregation(_))));

    for total in 1..20i64 {
        for n in 1..8usize {
            let each = even_share(total, n).unwrap().milli_value();
            let sum = each * n as i64;
            assert!(sum <= 100 * total);
            assert!(sum >= 100 * total - 100 * (n as i64 - 1));
        }
    }
}

#[test]
fn catalog_ignores_query_history() {
    let engine = engine();
    let before = engine.list_supported_metrics();
    engine.metric_by_name(&pods(), Some("default"), "p1", "packets-per-second").unwrap();
    let after = engine.list_supported_metrics();
    assert_eq!(before, after);
    assert_eq!(after.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_queries_never_lose_increments() {
    let engine = Arc::new(engine());
    let mut handles = Vec::new();
    for i in 0..64 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let alias = if i % 2 == 0 { "pods" } else { "po" };
            engine
                .metric_by_name(&GroupResource::core(alias), Some("default"), "p1", "packets-per-second")
                .unwrap()
                .value
                .milli_value()
        }));
    }

    let mut seen = Vec::new();
    for h in handles {
        seen.push(h.await.unwrap());
    }
    seen.sort();
    let expected: Vec<i64> = (1..=64).map(|v| v * 100).collect();
    assert_eq!(seen, expected);
}
