//! Wire types for the batch-metrics call. Field names are the contract;
//! both sides serialize these with serde_json.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One evaluation unit: a question, the produced answer, and whatever
/// retrieval/reference material the metrics need. All fields except
/// `question` and `answer` are optional in practice and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub expected_answer: String,
    #[serde(default)]
    pub reference_output: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// An item plus its caller-assigned id. Position in `evaluation_items`
/// is the identity that matters; `item_id` is echoed back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub evaluation_data: EvaluationItem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMetricsRequest {
    pub evaluation_items: Vec<BatchItem>,
    pub metrics: Vec<String>,
    #[serde(default)]
    pub process_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub global_config: BTreeMap<String, String>,
}

/// Per-item result. `metric_scores` holds only the metrics that produced a
/// score; a failed metric is absent from the map and described in
/// `error_message` with `success = false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchItemResult {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub metric_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub metric_reasons: BTreeMap<String, String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMetricsResponse {
    pub results: Vec<BatchItemResult>,
    pub success: bool,
    #[serde(default)]
    pub error_message: String,
    pub total_processed: u64,
    #[serde(default)]
    pub successful_count: u64,
    #[serde(default)]
    pub failed_count: u64,
    #[serde(default)]
    pub total_execution_time_ms: f64,
}

impl BatchMetricsRequest {
    pub fn new(items: Vec<BatchItem>, metrics: Vec<String>, process_id: &str, user_id: &str) -> Self {
        Self {
            evaluation_items: items,
            metrics,
            process_id: process_id.to_string(),
            user_id: user_id.to_string(),
            global_config: BTreeMap::new(),
        }
    }
}

impl BatchMetricsResponse {
    /// A call-level failure with no per-item results (e.g. batch timeout).
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            success: false,
            error_message: message.into(),
            total_processed: 0,
            successful_count: 0,
            failed_count: 0,
            total_execution_time_ms: 0.0,
        }
    }
}
