//! Batch dispatch: fan items out over a bounded task set, compute every
//! requested metric per item, and reassemble results in input order.
//!
//! Items are independent, so completion order is arbitrary; each task
//! carries its original index and the response is rebuilt positionally.
//! One failing item never aborts the batch (continue-on-item-failure).

use crate::config::EngineSettings;
use crate::engine::aggregate::aggregate;
use crate::errors::GaugeError;
use crate::metrics_api::MetricConfig;
use crate::model::{BatchItem, BatchItemResult, BatchMetricsRequest, BatchMetricsResponse};
use crate::registry::MetricRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout, Duration};

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<MetricRegistry>,
    settings: EngineSettings,
}

impl Dispatcher {
    pub fn new(registry: Arc<MetricRegistry>, settings: EngineSettings) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Compute all requested metrics for a request that already passed
    /// validation. Always returns exactly one result per input item, in
    /// input order.
    pub async fn dispatch(&self, req: &BatchMetricsRequest) -> BatchMetricsResponse {
        let started = Instant::now();
        let total = req.evaluation_items.len();
        tracing::info!(
            process_id = %req.process_id,
            user_id = %req.user_id,
            items = total,
            metrics = ?req.metrics,
            "dispatching batch"
        );

        let parallel = self.settings.max_parallel_items.max(1);
        let sem = Arc::new(Semaphore::new(parallel));
        let metrics = Arc::new(req.metrics.clone());
        let config = Arc::new(req.global_config.clone());

        let mut join_set: JoinSet<(usize, BatchItemResult)> = JoinSet::new();
        for (idx, item) in req.evaluation_items.iter().cloned().enumerate() {
            let permit = match sem.clone().acquire_owned().await {
                Ok(p) => p,
                Err(_) => break, // semaphore never closed while we hold it
            };
            let registry = self.registry.clone();
            let settings = self.settings.clone();
            let metrics = metrics.clone();
            let config = config.clone();
            join_set.spawn(async move {
                let _permit = permit;
                let result = eval_item(&registry, &settings, item, &metrics, &config).await;
                (idx, result)
            });
        }

        let mut slots: Vec<Option<BatchItemResult>> = vec![None; total];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, result)) => slots[idx] = Some(result),
                Err(e) => tracing::error!(error = %e, "item task failed to join"),
            }
        }

        // A panicked task leaves its slot empty; surface that as a failed
        // item rather than shrinking the response.
        let results: Vec<BatchItemResult> = req
            .evaluation_items
            .iter()
            .zip(slots)
            .map(|(item, slot)| {
                slot.unwrap_or_else(|| BatchItemResult {
                    item_id: item.item_id.clone(),
                    question: item.evaluation_data.question.clone(),
                    success: false,
                    error_message: "item task aborted".into(),
                    ..Default::default()
                })
            })
            .collect();

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let resp = aggregate(results, elapsed_ms);
        tracing::info!(
            process_id = %req.process_id,
            total_processed = resp.total_processed,
            failed = resp.failed_count,
            duration_ms = elapsed_ms,
            "batch complete"
        );
        resp
    }
}

async fn eval_item(
    registry: &MetricRegistry,
    settings: &EngineSettings,
    item: BatchItem,
    metrics: &[String],
    config: &MetricConfig,
) -> BatchItemResult {
    let mut scores = BTreeMap::new();
    let mut reasons = BTreeMap::new();
    let mut errors: Vec<String> = Vec::new();

    for name in metrics {
        let Some(metric) = registry.get(name) else {
            errors.push(GaugeError::computation(name, "not registered").to_string());
            continue;
        };
        if let Err(e) = metric.validate(&item.evaluation_data) {
            errors.push(format!("metric '{}': {}", name, e));
            continue;
        }

        let budget = Duration::from_secs(settings.metric_timeout_secs);
        match timeout(budget, metric.evaluate(&item.evaluation_data, config)).await {
            Ok(Ok(outcome)) => {
                scores.insert(name.clone(), outcome.score);
                if let Some(reason) = outcome.reason {
                    reasons.insert(name.clone(), reason);
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(metric = %name, error = %e, "metric computation failed");
                errors.push(GaugeError::computation(name, e.to_string()).to_string());
            }
            Err(_) => {
                tracing::warn!(metric = %name, "metric timed out");
                errors.push(
                    GaugeError::Timeout {
                        metric: name.clone(),
                        seconds: settings.metric_timeout_secs,
                    }
                    .to_string(),
                );
            }
        }
    }

    BatchItemResult {
        item_id: item.item_id,
        question: item.evaluation_data.question,
        metric_scores: scores,
        metric_reasons: reasons,
        success: errors.is_empty(),
        error_message: errors.join("; "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics_api::{Metric, MetricCategory, MetricOutcome};
    use crate::model::EvaluationItem;
    use async_trait::async_trait;

    /// Scores an item by the numeric suffix of its question; sleeps longer
    /// for earlier items so completion order inverts input order.
    struct IndexEcho;

    #[async_trait]
    impl Metric for IndexEcho {
        fn name(&self) -> &'static str {
            "index_echo"
        }
        fn category(&self) -> MetricCategory {
            MetricCategory::Custom
        }
        async fn evaluate(
            &self,
            item: &EvaluationItem,
            _config: &MetricConfig,
        ) -> anyhow::Result<MetricOutcome> {
            let n: u64 = item.question.rsplit('-').next().unwrap().parse()?;
            tokio::time::sleep(Duration::from_millis(100u64.saturating_sub(n * 10))).await;
            Ok(MetricOutcome::clamped(n as f64 / 100.0, None))
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl Metric for AlwaysFails {
        fn name(&self) -> &'static str {
            "always_fails"
        }
        fn category(&self) -> MetricCategory {
            MetricCategory::Custom
        }
        async fn evaluate(
            &self,
            _item: &EvaluationItem,
            _config: &MetricConfig,
        ) -> anyhow::Result<MetricOutcome> {
            anyhow::bail!("judge unavailable")
        }
    }

    struct Sleeper;

    #[async_trait]
    impl Metric for Sleeper {
        fn name(&self) -> &'static str {
            "sleeper"
        }
        fn category(&self) -> MetricCategory {
            MetricCategory::Custom
        }
        async fn evaluate(
            &self,
            _item: &EvaluationItem,
            _config: &MetricConfig,
        ) -> anyhow::Result<MetricOutcome> {
            tokio::time::sleep(Duration::from_secs(120)).await;
            Ok(MetricOutcome::clamped(1.0, None))
        }
    }

    struct NeedsContext;

    #[async_trait]
    impl Metric for NeedsContext {
        fn name(&self) -> &'static str {
            "needs_context"
        }
        fn category(&self) -> MetricCategory {
            MetricCategory::Rag
        }
        fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
            if item.context.trim().is_empty() {
                return Err(GaugeError::invalid("context is required"));
            }
            Ok(())
        }
        async fn evaluate(
            &self,
            _item: &EvaluationItem,
            _config: &MetricConfig,
        ) -> anyhow::Result<MetricOutcome> {
            Ok(MetricOutcome::clamped(0.9, None))
        }
    }

    fn registry() -> Arc<MetricRegistry> {
        let mut reg = MetricRegistry::new();
        reg.register(Arc::new(IndexEcho));
        reg.register(Arc::new(AlwaysFails));
        reg.register(Arc::new(Sleeper));
        reg.register(Arc::new(NeedsContext));
        Arc::new(reg)
    }

    fn items(n: usize) -> Vec<BatchItem> {
        (0..n)
            .map(|i| BatchItem {
                item_id: i.to_string(),
                evaluation_data: EvaluationItem {
                    question: format!("item-{}", i),
                    answer: "a".into(),
                    context: "c".into(),
                    ..Default::default()
                },
            })
            .collect()
    }

    fn request(n: usize, metrics: &[&str]) -> BatchMetricsRequest {
        BatchMetricsRequest::new(
            items(n),
            metrics.iter().map(ToString::to_string).collect(),
            "proc-1",
            "user-1",
        )
    }

    #[tokio::test]
    async fn preserves_input_order_despite_scrambled_completion() {
        let d = Dispatcher::new(registry(), EngineSettings::default());
        let resp = d.dispatch(&request(8, &["index_echo"])).await;

        assert!(resp.success);
        assert_eq!(resp.results.len(), 8);
        assert_eq!(resp.total_processed, 8);
        for (i, result) in resp.results.iter().enumerate() {
            assert_eq!(result.item_id, i.to_string());
            assert_eq!(result.question, format!("item-{}", i));
            let score = result.metric_scores["index_echo"];
            assert!((score - i as f64 / 100.0).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn failing_metric_marks_item_but_keeps_other_scores() {
        let d = Dispatcher::new(registry(), EngineSettings::default());
        let resp = d.dispatch(&request(2, &["index_echo", "always_fails"])).await;

        // Every item carries an error marker, so the batch as a whole fails,
        // but the partial scores survive and count as processed.
        assert!(!resp.success);
        assert_eq!(resp.successful_count, 0);
        assert_eq!(resp.failed_count, 2);
        assert_eq!(resp.total_processed, 2);
        for result in &resp.results {
            assert!(!result.success);
            assert!(result.metric_scores.contains_key("index_echo"));
            assert!(!result.metric_scores.contains_key("always_fails"));
            assert!(result.error_message.contains("judge unavailable"));
        }
    }

    #[tokio::test]
    async fn one_failing_item_does_not_abort_the_batch() {
        let mut req = request(3, &["needs_context"]);
        req.evaluation_items[1].evaluation_data.context.clear();
        let d = Dispatcher::new(registry(), EngineSettings::default());
        let resp = d.dispatch(&req).await;

        assert!(resp.success);
        assert_eq!(resp.successful_count, 2);
        assert_eq!(resp.failed_count, 1);
        assert_eq!(resp.total_processed, 2);
        assert!(!resp.results[1].success);
        assert!(resp.results[0].success && resp.results[2].success);
    }

    #[tokio::test]
    async fn all_items_failing_flips_overall_success() {
        let d = Dispatcher::new(registry(), EngineSettings::default());
        let resp = d.dispatch(&request(3, &["always_fails"])).await;

        assert!(!resp.success);
        assert!(!resp.error_message.is_empty());
        assert_eq!(resp.total_processed, 0);
        assert_eq!(resp.results.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn per_metric_timeout_fails_only_that_metric() {
        let settings = EngineSettings {
            metric_timeout_secs: 1,
            ..Default::default()
        };
        let d = Dispatcher::new(registry(), settings);
        let resp = d.dispatch(&request(1, &["sleeper", "index_echo"])).await;

        let result = &resp.results[0];
        assert!(!result.success);
        assert!(result.error_message.contains("timed out after 1s"));
        assert!(result.metric_scores.contains_key("index_echo"));
        assert!(!result.metric_scores.contains_key("sleeper"));
    }

    #[tokio::test]
    async fn per_metric_validation_failure_is_an_item_error() {
        let mut req = request(1, &["needs_context"]);
        req.evaluation_items[0].evaluation_data.context.clear();
        let d = Dispatcher::new(registry(), EngineSettings::default());
        let resp = d.dispatch(&req).await;

        assert!(!resp.success);
        assert!(resp.results[0]
            .error_message
            .contains("context is required"));
    }

    #[tokio::test]
    async fn identical_requests_yield_identical_scores() {
        let d = Dispatcher::new(registry(), EngineSettings::default());
        let req = request(4, &["index_echo"]);
        let first = d.dispatch(&req).await;
        let second = d.dispatch(&req).await;
        for (a, b) in first.results.iter().zip(second.results.iter()) {
            assert_eq!(a.metric_scores, b.metric_scores);
        }
    }
}
