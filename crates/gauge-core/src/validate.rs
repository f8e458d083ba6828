//! Request validation. Rejects malformed batches before any computation;
//! a validation failure is fast-fail and never produces a partial response.

use crate::config::EngineSettings;
use crate::errors::GaugeError;
use crate::model::BatchMetricsRequest;
use crate::registry::MetricRegistry;

pub fn validate_request(
    req: &BatchMetricsRequest,
    registry: &MetricRegistry,
    settings: &EngineSettings,
) -> Result<(), GaugeError> {
    if req.evaluation_items.is_empty() {
        return Err(GaugeError::invalid("evaluation_items is empty"));
    }
    if req.evaluation_items.len() > settings.max_batch_size {
        return Err(GaugeError::invalid(format!(
            "batch of {} items exceeds max_batch_size {}",
            req.evaluation_items.len(),
            settings.max_batch_size
        )));
    }
    if req.metrics.is_empty() {
        return Err(GaugeError::invalid("metrics list is empty"));
    }
    for name in &req.metrics {
        if !registry.contains(name) {
            return Err(GaugeError::invalid(format!(
                "unsupported metric '{}' (supported: {})",
                name,
                registry.names().join(", ")
            )));
        }
    }
    if req.process_id.trim().is_empty() {
        return Err(GaugeError::invalid("process_id is required"));
    }
    if req.user_id.trim().is_empty() {
        return Err(GaugeError::invalid("user_id is required"));
    }
    Ok(())
}
