//! Task-specific metrics: summarization, classification, generation and
//! conversation quality. All of them only need a produced answer.

use crate::judge::{self, JudgeBackend};
use crate::require_field;
use async_trait::async_trait;
use gauge_core::errors::GaugeError;
use gauge_core::metrics_api::{Metric, MetricCategory, MetricConfig, MetricOutcome};
use gauge_core::model::EvaluationItem;
use std::sync::Arc;

macro_rules! task_metric {
    ($ty:ident, $name:literal) => {
        pub struct $ty {
            judge: Arc<dyn JudgeBackend>,
        }

        impl $ty {
            pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
                Self { judge }
            }
        }

        #[async_trait]
        impl Metric for $ty {
            fn name(&self) -> &'static str {
                $name
            }
            fn category(&self) -> MetricCategory {
                MetricCategory::TaskSpecific
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
    };
}

task_metric!(Summarization, "summarization");
task_metric!(Classification, "classification");
task_metric!(Generation, "generation");
task_metric!(Conversation, "conversation");
