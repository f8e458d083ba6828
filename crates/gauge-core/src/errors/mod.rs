//! Error taxonomy for the batch-metrics protocol.
//!
//! InvalidRequest is rejected before any computation and must never be
//! retried. Computation and Timeout are per-metric failures that feed the
//! per-item error markers. Transport covers the call itself failing and is
//! the only retryable class.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("metric '{metric}' failed: {detail}")]
    Computation { metric: String, detail: String },

    #[error("metric '{metric}' timed out after {seconds}s")]
    Timeout { metric: String, seconds: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("config error: {0}")]
    Config(String),
}

impl GaugeError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidRequest(detail.into())
    }

    pub fn computation(metric: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Computation {
            metric: metric.into(),
            detail: detail.into(),
        }
    }

    /// Whether a caller-side retry can help. Only transport failures are
    /// transient; everything else reproduces deterministically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
