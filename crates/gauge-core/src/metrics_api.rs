use crate::errors::GaugeError;
use crate::model::EvaluationItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form per-call configuration (the request's `global_config`),
/// e.g. geval criteria or judge model overrides.
pub type MetricConfig = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Rag,
    Safety,
    TaskSpecific,
    Custom,
}

impl MetricCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rag => "rag",
            Self::Safety => "safety",
            Self::TaskSpecific => "task_specific",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricOutcome {
    pub score: f64,
    pub reason: Option<String>,
}

impl MetricOutcome {
    /// Scores are defined on [0.0, 1.0]; backends occasionally return
    /// values slightly outside that range.
    pub fn clamped(score: f64, reason: Option<String>) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            reason,
        }
    }
}

#[async_trait]
pub trait Metric: Send + Sync {
    fn name(&self) -> &'static str;

    fn category(&self) -> MetricCategory;

    /// Cheap structural check before evaluation; the default accepts
    /// anything. Metrics that need specific fields override this.
    fn validate(&self, _item: &EvaluationItem) -> Result<(), GaugeError> {
        Ok(())
    }

    async fn evaluate(
        &self,
        item: &EvaluationItem,
        config: &MetricConfig,
    ) -> anyhow::Result<MetricOutcome>;
}
