use dashmap::DashMap;

use synthmetrics_core::metric::MetricIdentifier;

/// Per-identifier monotonic counters.
///
/// `next_value` holds the key's shard lock across read-increment-write, so
/// concurrent queries for the same identifier never lose an increment.
#[derive(Default)]
pub struct CounterStore {
    values: DashMap<MetricIdentifier, i64>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self { values: DashMap::new() }
    }

    /// Advance the counter for `id` (absent = 0) and return the new value.
    /// Only the engine advances counters, one step per query.
    pub(crate) fn next_value(&self, id: MetricIdentifier) -> i64 {
        let mut slot = self.values.entry(id).or_insert(0);
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Current value without advancing (0 when never queried).
    pub fn current(&self, id: &MetricIdentifier) -> i64 {
        self.values.get(id).map(|v| *v).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
