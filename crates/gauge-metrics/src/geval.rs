//! GEval: scoring against caller-supplied evaluation criteria. The
//! criteria travel in the request's `global_config` under `criteria`; when
//! absent a generic quality prompt is used.

use crate::judge::{self, JudgeBackend};
use crate::require_field;
use async_trait::async_trait;
use gauge_core::errors::GaugeError;
use gauge_core::metrics_api::{Metric, MetricCategory, MetricConfig, MetricOutcome};
use gauge_core::model::EvaluationItem;
use std::sync::Arc;

pub const DEFAULT_CRITERIA: &str = "Evaluate the quality of the response";

pub struct GEval {
    judge: Arc<dyn JudgeBackend>,
}

impl GEval {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for GEval {
    fn name(&self) -> &'static str {
        "geval"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Custom
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.answer, "answer")
    }
    async fn evaluate(
        &self,
        item: &EvaluationItem,
        config: &MetricConfig,
    ) -> anyhow::Result<MetricOutcome> {
        let mut config = config.clone();
        config
            .entry("criteria".to_string())
            .or_insert_with(|| DEFAULT_CRITERIA.to_string());
        judge::score_with(self.judge.as_ref(), self.name(), item, &config).await
    }
}
