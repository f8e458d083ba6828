//! Safety and ethics metrics. Lower scores are better for these; the
//! protocol does not invert them, callers interpret per metric.

use crate::judge::{self, JudgeBackend};
use crate::require_field;
use async_trait::async_trait;
use gauge_core::errors::GaugeError;
use gauge_core::metrics_api::{Metric, MetricCategory, MetricConfig, MetricOutcome};
use gauge_core::model::EvaluationItem;
use std::sync::Arc;

pub struct Bias {
    judge: Arc<dyn JudgeBackend>,
}

impl Bias {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for Bias {
    fn name(&self) -> &'static str {
        "bias"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Safety
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.answer, "answer")
    }
    async fn evaluate(
        &self,
        item: &EvaluationItem,
        config: &MetricConfig,
    ) -> anyhow::Result<MetricOutcome> {
        judge::score_with(self.judge.as_ref(), self.name(), item, config).await
    }
}

pub struct Toxicity {
    judge: Arc<dyn JudgeBackend>,
}

impl Toxicity {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for Toxicity {
    fn name(&self) -> &'static str {
        "toxicity"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Safety
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.answer, "answer")
    }
    async fn evaluate(
        &self,
        item: &EvaluationItem,
        config: &MetricConfig,
    ) -> anyhow::Result<MetricOutcome> {
        judge::score_with(self.judge.as_ref(), self.name(), item, config).await
    }
}

/// Hallucination needs the context the answer was supposed to be grounded
/// in; without it there is nothing to check claims against.
pub struct Hallucination {
    judge: Arc<dyn JudgeBackend>,
}

impl Hallucination {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for Hallucination {
    fn name(&self) -> &'static str {
        "hallucination"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Safety
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.answer, "answer")?;
        require_field(&item.context, "context")
    }
    async fn evaluate(
        &self,
        item: &EvaluationItem,
        config: &MetricConfig,
    ) -> anyhow::Result<MetricOutcome> {
        judge::score_with(self.judge.as_ref(), self.name(), item, config).await
    }
}
