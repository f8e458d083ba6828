//! HTTP surface: the batch call, the vocabulary listing, and health.
//!
//! Validation failures are HTTP 400 with a JSON error body and never
//! produce a partial `BatchMetricsResponse`; computation-phase failures
//! are encoded inside the response per the partial-failure policy.

use crate::state::{SharedState, VERSION};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gauge_core::model::{BatchMetricsRequest, BatchMetricsResponse};
use gauge_core::validate::validate_request;
use tokio::time::{timeout, Duration};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/v1/metrics/batch", post(batch_handler))
        .route("/v1/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn batch_handler(
    State(state): State<SharedState>,
    Json(req): Json<BatchMetricsRequest>,
) -> Response {
    if let Err(e) = validate_request(&req, state.dispatcher.registry(), state.dispatcher.settings())
    {
        tracing::warn!(process_id = %req.process_id, error = %e, "rejected batch request");
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    let budget_secs = state.dispatcher.settings().call_timeout_secs;
    let resp = match timeout(
        Duration::from_secs(budget_secs),
        state.dispatcher.dispatch(&req),
    )
    .await
    {
        Ok(resp) => resp,
        Err(_) => {
            tracing::error!(process_id = %req.process_id, "batch call timed out");
            BatchMetricsResponse::failure(format!("batch timed out after {}s", budget_secs))
        }
    };
    Json(resp).into_response()
}

async fn metrics_handler(State(state): State<SharedState>) -> Response {
    let registry = state.dispatcher.registry();
    Json(serde_json::json!({
        "metrics_by_category": registry.by_category(),
        "all_metrics": registry.names(),
    }))
    .into_response()
}

async fn health_handler(State(state): State<SharedState>) -> Response {
    Json(serde_json::json!({
        "status": "healthy",
        "version": VERSION,
        "available_metrics": state.dispatcher.registry().len(),
        "uptime_seconds": state.uptime_secs(),
        "last_check": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use gauge_core::config::ServerConfig;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::from_config(&ServerConfig::default()))
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1 << 20).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_vocabulary_size() {
        let req = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = ServiceExt::<axum::http::Request<Body>>::oneshot(app(), req)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["available_metrics"], 13);
    }

    #[tokio::test]
    async fn metrics_listing_groups_by_category() {
        let req = axum::http::Request::builder()
            .uri("/v1/metrics")
            .body(Body::empty())
            .unwrap();
        let resp = ServiceExt::<axum::http::Request<Body>>::oneshot(app(), req)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let json = body_json(resp).await;
        assert_eq!(json["metrics_by_category"]["safety"].as_array().unwrap().len(), 3);
        assert!(json["all_metrics"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("answer_relevancy")));
    }
}
