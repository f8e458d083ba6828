//! Metric vocabulary as a registry rather than a closed enum, so new
//! metrics can be added without touching the wire contract.

use crate::metrics_api::Metric;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default)]
pub struct MetricRegistry {
    metrics: BTreeMap<&'static str, Arc<dyn Metric>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-registering a name replaces the previous entry.
    pub fn register(&mut self, metric: Arc<dyn Metric>) {
        self.metrics.insert(metric.name(), metric);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Metric>> {
        self.metrics.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.metrics.keys().copied().collect()
    }

    /// Vocabulary grouped by category, for the metric-listing call.
    pub fn by_category(&self) -> BTreeMap<&'static str, Vec<&'static str>> {
        let mut grouped: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
        for (name, metric) in &self.metrics {
            grouped
                .entry(metric.category().as_str())
                .or_default()
                .push(name);
        }
        grouped
    }
}

impl std::fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("metrics", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics_api::{MetricCategory, MetricConfig, MetricOutcome};
    use crate::model::EvaluationItem;
    use async_trait::async_trait;

    struct Stub(&'static str, MetricCategory);

    #[async_trait]
    impl Metric for Stub {
        fn name(&self) -> &'static str {
            self.0
        }
        fn category(&self) -> MetricCategory {
            self.1
        }
        async fn evaluate(
            &self,
            _item: &EvaluationItem,
            _config: &MetricConfig,
        ) -> anyhow::Result<MetricOutcome> {
            Ok(MetricOutcome::clamped(1.0, None))
        }
    }

    #[test]
    fn lookup_and_grouping() {
        let mut reg = MetricRegistry::new();
        reg.register(Arc::new(Stub("faithfulness", MetricCategory::Rag)));
        reg.register(Arc::new(Stub("bias", MetricCategory::Safety)));
        reg.register(Arc::new(Stub("toxicity", MetricCategory::Safety)));

        assert!(reg.contains("bias"));
        assert!(!reg.contains("geval"));
        assert_eq!(reg.len(), 3);

        let grouped = reg.by_category();
        assert_eq!(grouped["safety"], vec!["bias", "toxicity"]);
        assert_eq!(grouped["rag"], vec!["faithfulness"]);
    }

    #[test]
    fn register_replaces_existing_name() {
        let mut reg = MetricRegistry::new();
        reg.register(Arc::new(Stub("bias", MetricCategory::Safety)));
        reg.register(Arc::new(Stub("bias", MetricCategory::Custom)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("bias").unwrap().category(), MetricCategory::Custom);
    }
}
