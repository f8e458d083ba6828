//! Deterministic judge for tests and local development. Returns a
//! configured per-metric score, falling back to a uniform default.

use super::{JudgeBackend, JudgeVerdict};
use async_trait::async_trait;
use gauge_core::metrics_api::MetricConfig;
use gauge_core::model::EvaluationItem;
use std::collections::BTreeMap;

pub struct FixedJudge {
    default_score: f64,
    scores: BTreeMap<String, f64>,
}

impl FixedJudge {
    pub fn new(default_score: f64, scores: BTreeMap<String, f64>) -> Self {
        Self {
            default_score,
            scores,
        }
    }

    pub fn uniform(score: f64) -> Self {
        Self::new(score, BTreeMap::new())
    }
}

#[async_trait]
impl JudgeBackend for FixedJudge {
    async fn score(
        &self,
        metric: &str,
        _item: &EvaluationItem,
        _config: &MetricConfig,
    ) -> anyhow::Result<JudgeVerdict> {
        let score = self.scores.get(metric).copied().unwrap_or(self.default_score);
        Ok(JudgeVerdict {
            score,
            reason: Some(format!("fixed judge score for '{}'", metric)),
        })
    }
}
