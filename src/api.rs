//! REST API server for the EmotionSense engine
//!
//! Exposes the orchestrator via HTTP endpoints for the dashboard UI

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::models::AnalysisInput;
use crate::orchestrator::Orchestrator;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    /// Epoch milliseconds when the user started typing
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub typing_start: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub typing_end: Option<DateTime<Utc>>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Which analyzer the next request will try first
async fn status(State(state): State<ApiState>) -> Json<ApiResponse> {
    let analyzer = if state.orchestrator.remote_configured() {
        state.orchestrator.remote_name()
    } else {
        "local"
    };

    Json(ApiResponse::success(serde_json::json!({
        "analyzer": analyzer,
        "remoteConfigured": state.orchestrator.remote_configured(),
    })))
}

/// =============================
/// Analysis Endpoint
/// =============================

async fn run_analysis(
    State(state): State<ApiState>,
    Json(req): Json<AnalyzeRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let input = match AnalysisInput::new(req.text, req.typing_start, req.typing_end) {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Rejected analysis request");
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string())));
        }
    };

    info!(chars = input.text().chars().count(), "Received analysis request");

    let outcome = state.orchestrator.analyze(&input).await;
    (StatusCode::OK, Json(ApiResponse::success(outcome)))
}

/// =============================
/// Router
/// =============================

pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    let state = ApiState { orchestrator };

    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status))
        .route("/api/analyze", post(run_analysis))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    orchestrator: Arc<Orchestrator>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::GeminiAnalyzer;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn local_router() -> Router {
        let orchestrator = Orchestrator::new(Box::new(GeminiAnalyzer::new(None)));
        create_router(Arc::new(orchestrator))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_request_timestamps_are_epoch_millis() {
        let req: AnalyzeRequest = serde_json::from_value(serde_json::json!({
            "text": "hi",
            "typingStart": 0,
            "typingEnd": 60000
        }))
        .unwrap();
        assert_eq!(req.typing_start.map(|t| t.timestamp_millis()), Some(0));
        assert_eq!(req.typing_end.map(|t| t.timestamp_millis()), Some(60_000));

        let req: AnalyzeRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert!(req.typing_start.is_none());
        assert!(req.typing_end.is_none());
    }

    #[tokio::test]
    async fn test_health() {
        let response = local_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_status_reports_local_without_key() {
        let response = local_router()
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["analyzer"], "local");
        assert_eq!(body["data"]["remoteConfigured"], false);
    }

    #[tokio::test]
    async fn test_analyze_local_fallback() {
        let response = local_router()
            .oneshot(post_json(
                "/api/analyze",
                serde_json::json!({
                    "text": "one two three four",
                    "typingStart": 0,
                    "typingEnd": 60000
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);

        let data = &body["data"];
        assert_eq!(data["source"], "local");
        assert_eq!(data["wpm"], 4);
        assert_eq!(data["wordCount"], 4);
        assert!(data["emotions"]["neutral"].is_u64());
        assert!(data["dominantEmotion"].is_string());
        assert!(data["notice"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_text() {
        let response = local_router()
            .oneshot(post_json("/api/analyze", serde_json::json!({ "text": "   " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("Please enter some text to analyze."));
    }
}
