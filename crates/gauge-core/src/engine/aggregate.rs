//! Response aggregation: derive the overall success flag and counts from
//! the ordered per-item results.
//!
//! An item counts as processed when at least one metric produced a score.
//! The batch as a whole succeeds unless every item failed.

use crate::model::{BatchItemResult, BatchMetricsResponse};

pub fn aggregate(results: Vec<BatchItemResult>, elapsed_ms: f64) -> BatchMetricsResponse {
    let total_processed = results
        .iter()
        .filter(|r| !r.metric_scores.is_empty())
        .count() as u64;
    let successful_count = results.iter().filter(|r| r.success).count() as u64;
    let failed_count = results.len() as u64 - successful_count;

    let all_failed = !results.is_empty() && successful_count == 0;
    let error_message = if all_failed {
        results
            .iter()
            .find(|r| !r.error_message.is_empty())
            .map(|r| format!("all {} items failed; first error: {}", results.len(), r.error_message))
            .unwrap_or_else(|| format!("all {} items failed", results.len()))
    } else {
        String::new()
    };

    BatchMetricsResponse {
        results,
        success: !all_failed,
        error_message,
        total_processed,
        successful_count,
        failed_count,
        total_execution_time_ms: elapsed_ms,
    }
}
