//! The scoring collaborator seam. A judge takes (metric name, item,
//! per-call config) and returns a score in [0,1] with optional reasoning;
//! how it arrives at the score is not this crate's business.

pub mod fixed;
pub mod http;

use async_trait::async_trait;
use gauge_core::config::JudgeConfig;
use gauge_core::metrics_api::{MetricConfig, MetricOutcome};
use gauge_core::model::EvaluationItem;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct JudgeVerdict {
    pub score: f64,
    pub reason: Option<String>,
}

#[async_trait]
pub trait JudgeBackend: Send + Sync {
    async fn score(
        &self,
        metric: &str,
        item: &EvaluationItem,
        config: &MetricConfig,
    ) -> anyhow::Result<JudgeVerdict>;
}

pub fn from_config(cfg: &JudgeConfig) -> Arc<dyn JudgeBackend> {
    match cfg {
        JudgeConfig::Fixed {
            default_score,
            scores,
        } => Arc::new(fixed::FixedJudge::new(*default_score, scores.clone())),
        JudgeConfig::Http {
            endpoint,
            timeout_secs,
        } => Arc::new(http::HttpJudge::new(endpoint.clone(), *timeout_secs)),
    }
}

pub(crate) async fn score_with(
    judge: &dyn JudgeBackend,
    metric: &'static str,
    item: &EvaluationItem,
    config: &MetricConfig,
) -> anyhow::Result<MetricOutcome> {
    let verdict = judge.score(metric, item, config).await?;
    Ok(MetricOutcome::clamped(verdict.score, verdict.reason))
}
