//! Judge backed by an external scoring service over HTTP. The service
//! wraps the actual LLM-based metrics library; this side only carries the
//! item across and maps failures into computation errors.

use super::{JudgeBackend, JudgeVerdict};
use anyhow::Context;
use async_trait::async_trait;
use gauge_core::metrics_api::MetricConfig;
use gauge_core::model::EvaluationItem;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct HttpJudge {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ScoreRequest<'a> {
    metric: &'a str,
    #[serde(flatten)]
    item: &'a EvaluationItem,
    config: &'a MetricConfig,
}

#[derive(Deserialize)]
struct ScoreResponse {
    score: f64,
    #[serde(default)]
    reason: Option<String>,
}

impl HttpJudge {
    pub fn new(endpoint: String, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self { endpoint, client }
    }
}

#[async_trait]
impl JudgeBackend for HttpJudge {
    async fn score(
        &self,
        metric: &str,
        item: &EvaluationItem,
        config: &MetricConfig,
    ) -> anyhow::Result<JudgeVerdict> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&ScoreRequest {
                metric,
                item,
                config,
            })
            .send()
            .await
            .with_context(|| format!("judge request for '{}' failed", metric))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("judge returned {} for '{}': {}", status, metric, body);
        }

        let parsed: ScoreResponse = resp
            .json()
            .await
            .with_context(|| format!("judge response for '{}' was not valid JSON", metric))?;
        tracing::debug!(metric, score = parsed.score, "judge verdict received");
        Ok(JudgeVerdict {
            score: parsed.score,
            reason: parsed.reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item() -> EvaluationItem {
        EvaluationItem {
            question: "What is RAG?".into(),
            answer: "Retrieval-augmented generation.".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn posts_metric_and_item_and_parses_verdict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/score"))
            .and(body_partial_json(serde_json::json!({
                "metric": "faithfulness",
                "question": "What is RAG?"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "score": 0.87,
                "reason": "claims are grounded"
            })))
            .mount(&server)
            .await;

        let judge = HttpJudge::new(format!("{}/score", server.uri()), 5);
        let verdict = judge
            .score("faithfulness", &item(), &MetricConfig::new())
            .await
            .unwrap();
        assert_eq!(verdict.score, 0.87);
        assert_eq!(verdict.reason.as_deref(), Some("claims are grounded"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error_naming_the_metric() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let judge = HttpJudge::new(server.uri(), 5);
        let err = judge
            .score("bias", &item(), &MetricConfig::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bias"));
        assert!(err.to_string().contains("503"));
    }
}
