//! RAG-quality metrics. These jointly assess retrieval and answer quality,
//! so most of them refuse to run without retrieved context.

use crate::judge::{self, JudgeBackend};
use crate::require_field;
use async_trait::async_trait;
use gauge_core::errors::GaugeError;
use gauge_core::metrics_api::{Metric, MetricCategory, MetricConfig, MetricOutcome};
use gauge_core::model::EvaluationItem;
use std::sync::Arc;

pub struct AnswerRelevancy {
    judge: Arc<dyn JudgeBackend>,
}

impl AnswerRelevancy {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for AnswerRelevancy {
    fn name(&self) -> &'static str {
        "answer_relevancy"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Rag
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.question, "question")?;
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

pub struct Faithfulness {
    judge: Arc<dyn JudgeBackend>,
}

impl Faithfulness {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for Faithfulness {
    fn name(&self) -> &'static str {
        "faithfulness"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Rag
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

pub struct ContextualPrecision {
    judge: Arc<dyn JudgeBackend>,
}

impl ContextualPrecision {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for ContextualPrecision {
    fn name(&self) -> &'static str {
        "contextual_precision"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Rag
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.question, "question")?;
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

pub struct ContextualRecall {
    judge: Arc<dyn JudgeBackend>,
}

impl ContextualRecall {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for ContextualRecall {
    fn name(&self) -> &'static str {
        "contextual_recall"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Rag
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.question, "question")?;
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

pub struct ContextualRelevancy {
    judge: Arc<dyn JudgeBackend>,
}

impl ContextualRelevancy {
    pub fn new(judge: Arc<dyn JudgeBackend>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl Metric for ContextualRelevancy {
    fn name(&self) -> &'static str {
        "contextual_relevancy"
    }
    fn category(&self) -> MetricCategory {
        MetricCategory::Rag
    }
    fn validate(&self, item: &EvaluationItem) -> Result<(), GaugeError> {
        require_field(&item.question, "question")?;
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
