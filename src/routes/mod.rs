//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers), tighten for production
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/api/v1/health", get(http::http_health))
        // Study plan text
        .route("/api/v1/study-plan/encode", post(http::http_post_encode))
        .route("/api/v1/study-plan/decode", post(http::http_post_decode))
        .route("/api/v1/study-plan/storage", post(http::http_post_storage))
        // Material recommendation
        .route("/api/v1/materials/catalog", get(http::http_get_catalog))
        .route("/api/v1/materials/recommend", post(http::http_post_recommend))
        // Generation
        .route("/api/v1/study-suggestions", post(http::http_post_study_suggestions))
        .route("/api/v1/quiz", post(http::http_post_quiz))
        .route("/api/v1/study-materials", post(http::http_post_study_materials))
        .route("/api/v1/study-summaries", post(http::http_post_study_summaries))
        .route("/api/v1/check-answer", post(http::http_post_check_answer))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let app = build_router(Arc::new(AppState::offline()));
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_model_status() {
        let app = build_router(Arc::new(AppState::offline()));
        let resp = app
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v, json!({ "ok": true, "openai": false }));
    }

    #[tokio::test]
    async fn encode_then_decode_over_http() {
        let plan = json!({
            "title": "Federalism Review",
            "learningObjectives": ["Define the Tenth Amendment", "Compare state vs federal power"],
            "overview": "Key topics include the Tenth Amendment and Commerce Clause.",
            "studyMethods": [{
                "name": "Elaboration",
                "steps": ["Draw a comparison chart", "Add real-world examples"],
                "rationale": "Connects new facts to prior knowledge."
            }]
        });
        let (status, encoded) = post_json("/api/v1/study-plan/encode", plan.clone()).await;
        assert_eq!(status, StatusCode::OK);
        let description = encoded["description"].as_str().unwrap().to_string();
        assert!(description.contains("(1) Define the Tenth Amendment"));

        let (status, decoded) = post_json("/api/v1/study-plan/decode", json!({ "description": description })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decoded["title"], "");
        assert_eq!(decoded["learningObjectives"], plan["learningObjectives"]);
        assert_eq!(decoded["overview"], plan["overview"]);
        assert_eq!(decoded["studyMethods"], plan["studyMethods"]);
    }

    #[tokio::test]
    async fn decode_accepts_storage_envelope() {
        let plan = json!({ "title": "T", "overview": "Study Methods: inline", "learningObjectives": [], "studyMethods": [] });
        let (_, stored) = post_json("/api/v1/study-plan/storage", plan.clone()).await;
        let (status, decoded) = post_json("/api/v1/study-plan/decode", json!({ "description": stored["stored"] })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decoded, plan);
    }

    #[tokio::test]
    async fn recommend_ranks_materials() {
        let (status, v) = post_json(
            "/api/v1/materials/recommend",
            json!({ "title": "Vocabulary", "description": "this covers key terms and definitions" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let list = v.as_array().unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0]["materialType"], "flashcards");
        assert_eq!(list[0]["isRecommended"], true);
    }

    #[tokio::test]
    async fn study_suggestions_validate_and_fall_back() {
        let (status, v) = post_json("/api/v1/study-suggestions", json!({ "documents": [] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"], "Invalid request body");

        let (status, v) = post_json(
            "/api/v1/study-suggestions",
            json!({ "documents": [{ "name": "Chapter 2", "importance": 4 }], "eventDate": "2025-05-02" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let s = &v["suggestions"][0];
        assert_eq!(s["origin"], "local");
        assert_eq!(s["title"], "Review: Chapter 2");
        assert!(s["description"].as_str().unwrap().contains("Study Methods:\nRetrieval Practice\n"));
    }

    #[tokio::test]
    async fn quiz_without_model_is_unavailable() {
        let (status, v) = post_json("/api/v1/quiz", json!({ "documents": [{ "name": "A" }] })).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(v["error"].as_str().unwrap().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn check_answer_round_trip() {
        let (status, v) = post_json(
            "/api/v1/check-answer",
            json!({ "selectedAnswer": "4", "correctAnswer": "4", "explanation": "2 + 2" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v, json!({ "isCorrect": true, "feedback": { "message": "Correct!", "explanation": "2 + 2" } }));
    }
}
