//! The supported metric vocabulary. Each metric validates the fields it
//! needs and delegates the actual scoring to a [`judge::JudgeBackend`];
//! the scoring model itself lives behind that seam.

pub mod geval;
pub mod judge;
pub mod rag;
pub mod safety;
pub mod task;

use gauge_core::errors::GaugeError;
use gauge_core::registry::MetricRegistry;
use judge::JudgeBackend;
use std::sync::Arc;

/// Registry with the full built-in vocabulary wired to one judge backend.
pub fn builtin_registry(judge: Arc<dyn JudgeBackend>) -> MetricRegistry {
    let mut reg = MetricRegistry::new();

    reg.register(Arc::new(rag::AnswerRelevancy::new(judge.clone())));
    reg.register(Arc::new(rag::Faithfulness::new(judge.clone())));
    reg.register(Arc::new(rag::ContextualPrecision::new(judge.clone())));
    reg.register(Arc::new(rag::ContextualRecall::new(judge.clone())));
    reg.register(Arc::new(rag::ContextualRelevancy::new(judge.clone())));

    reg.register(Arc::new(safety::Bias::new(judge.clone())));
    reg.register(Arc::new(safety::Toxicity::new(judge.clone())));
    reg.register(Arc::new(safety::Hallucination::new(judge.clone())));

    reg.register(Arc::new(task::Summarization::new(judge.clone())));
    reg.register(Arc::new(task::Classification::new(judge.clone())));
    reg.register(Arc::new(task::Generation::new(judge.clone())));
    reg.register(Arc::new(task::Conversation::new(judge.clone())));

    reg.register(Arc::new(geval::GEval::new(judge)));

    reg
}

pub(crate) fn require_field(value: &str, field: &'static str) -> Result<(), GaugeError> {
    if value.trim().is_empty() {
        return Err(GaugeError::invalid(format!("{} is required", field)));
    }
    Ok(())
}
