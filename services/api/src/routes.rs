use crate::infra::AppState;
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use lrs_scoring::error::AppError;
use lrs_scoring::profile::ScoredSchemaRecord;
use lrs_scoring::scoring::parse_answer_payload;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::value::RawValue;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
pub(crate) struct CalculateRequest {
    #[serde(default)]
    pub(crate) answers: Option<Box<RawValue>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CalculateResponse {
    pub(crate) top_schemas: Vec<ScoredSchemaRecord>,
}

/// API and operational routes, with the frontend build served for every other path.
pub(crate) fn app_router(state: AppState, frontend_dir: &Path) -> Router {
    let frontend =
        ServeDir::new(frontend_dir).fallback(ServeFile::new(frontend_dir.join("index.html")));
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/health", get(api_health))
        .route("/api/questions", get(questions_endpoint))
        .route("/api/calculate", post(calculate_endpoint))
        .fallback_service(frontend)
        .layer(Extension(state))
        .layer(cors)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn api_health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "LRS Scoring Engine Online",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn questions_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Response, AppError> {
    let questions = state.questions.ok_or(AppError::QuestionsUnavailable)?;
    Ok(Json(questions.as_ref()).into_response())
}

/// Bodies are read as raw bytes so malformed JSON surfaces as an `AppError`
/// with the usual `{"error": ...}` shape.
pub(crate) async fn calculate_endpoint(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<CalculateResponse>, AppError> {
    let payload: CalculateRequest = serde_json::from_slice(&body)?;
    let answers = parse_answer_payload(payload.answers.as_deref())?;

    let top_schemas = state.engine.score(&answers).map_err(|err| {
        if err.is_reference_data_failure() {
            error!(error = %err, "cannot score answers");
        }
        err
    })?;

    debug!(
        answers = answers.len(),
        leading = top_schemas.first().map(|record| record.name.as_str()),
        "scored questionnaire"
    );

    Ok(Json(CalculateResponse { top_schemas }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use lrs_scoring::catalog::SchemaCatalog;
    use lrs_scoring::profile::ProfileEngine;
    use lrs_scoring::scoring::WeightingRule;
    use lrs_scoring::tables::QuestionTableImporter;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn frontend_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/frontend")
    }

    fn state(weights: Option<Vec<WeightingRule>>, with_questions: bool) -> AppState {
        let questions = with_questions.then(|| {
            let csv = "ID,Question\n1,I worry people will leave me.\n2,Describe your week.\n";
            Arc::new(QuestionTableImporter::from_reader(csv.as_bytes()).expect("questions parse"))
        });

        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            engine: Arc::new(ProfileEngine::new(weights, SchemaCatalog::standard(), None)),
            questions,
        }
    }

    fn sample_weights() -> Vec<WeightingRule> {
        vec![
            WeightingRule::forward("1", "Abandonment / Instability", 2.0),
            WeightingRule::reverse("2", "Failure", 1.0),
        ]
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn calculate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    #[tokio::test]
    async fn api_health_reports_version() {
        let router = app_router(state(None, false), &frontend_dir());
        let (status, body) = send(router, get_request("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "LRS Scoring Engine Online");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn calculate_ranks_all_schemas() {
        let router = app_router(state(Some(sample_weights()), false), &frontend_dir());
        let (status, body) = send(
            router,
            calculate(r#"{"answers": {"1": 3, "2": 0, "3": "free text"}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let schemas = body["top_schemas"].as_array().expect("schema list");
        assert_eq!(schemas.len(), 18);
        assert_eq!(schemas[0]["name"], "Abandonment / Instability");
        assert_eq!(schemas[0]["score"], 6.0);
        assert_eq!(schemas[1]["name"], "Failure");
        assert_eq!(schemas[1]["score"], 5.0);
        assert!(schemas[0]["plan"]["week1"].is_string());
    }

    #[tokio::test]
    async fn calculate_rejects_empty_answers() {
        let router = app_router(state(Some(sample_weights()), false), &frontend_dir());
        let (status, body) = send(router.clone(), calculate(r#"{"answers": {}}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No answers provided");

        let (status, _) = send(router, calculate("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_answer_values_read_as_no_answers() {
        let router = app_router(state(Some(sample_weights()), false), &frontend_dir());
        for body in [r#"{"answers": null}"#, r#"{"answers": []}"#] {
            let (status, response) = send(router.clone(), calculate(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(response["error"], "No answers provided", "{body}");
        }
    }

    #[tokio::test]
    async fn malformed_bodies_get_json_errors() {
        let router = app_router(state(Some(sample_weights()), false), &frontend_dir());
        for body in [r#"{"answers": "#, r#"{"answers": [1, 2]}"#, "[1, 2]"] {
            let (status, response) = send(router.clone(), calculate(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert!(
                response["error"]
                    .as_str()
                    .is_some_and(|message| message.starts_with("invalid answers")),
                "{body}"
            );
        }
    }

    #[tokio::test]
    async fn oversized_number_is_skipped_not_fatal() {
        let router = app_router(state(Some(sample_weights()), false), &frontend_dir());
        let (status, body) = send(router, calculate(r#"{"answers": {"1": 3, "2": 1e400}}"#)).await;

        assert_eq!(status, StatusCode::OK);
        let schemas = body["top_schemas"].as_array().expect("schema list");
        assert_eq!(schemas[0]["name"], "Abandonment / Instability");
        assert_eq!(schemas[0]["score"], 6.0);
        let failure = schemas
            .iter()
            .find(|record| record["name"] == "Failure")
            .expect("failure listed");
        assert_eq!(failure["score"], 0.0);
    }

    #[tokio::test]
    async fn duplicate_question_ids_keep_the_scored_answer() {
        let router = app_router(state(Some(sample_weights()), false), &frontend_dir());
        let (status, body) =
            send(router, calculate(r#"{"answers": {"1": 3, "1.0": "skip"}}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["top_schemas"][0]["name"], "Abandonment / Instability");
        assert_eq!(body["top_schemas"][0]["score"], 6.0);
    }

    #[tokio::test]
    async fn liveness_reports_ok() {
        let router = app_router(state(None, false), &frontend_dir());
        let (status, body) = send(router, get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn metrics_use_prometheus_text_format() {
        let router = app_router(state(None, false), &frontend_dir());
        let response = router
            .oneshot(get_request("/metrics"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
    }

    #[tokio::test]
    async fn calculate_without_weights_is_server_error() {
        let router = app_router(state(None, false), &frontend_dir());
        let (status, body) = send(router, calculate(r#"{"answers": {"1": 2}}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .starts_with("Server data files missing"));
    }

    #[tokio::test]
    async fn questions_are_served_when_loaded() {
        let router = app_router(state(None, true), &frontend_dir());
        let (status, body) = send(router, get_request("/api/questions")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["ID"], 1);
        assert_eq!(body[1]["Question"], "Describe your week.");
    }

    #[tokio::test]
    async fn questions_missing_is_server_error() {
        let router = app_router(state(None, false), &frontend_dir());
        let (status, body) = send(router, get_request("/api/questions")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Questions file not loaded");
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let app_state = state(None, false);
        app_state
            .readiness
            .store(false, std::sync::atomic::Ordering::Release);
        let router = app_router(app_state, &frontend_dir());
        let (status, body) = send(router, get_request("/ready")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let router = app_router(state(None, false), &frontend_dir());
        let response = router
            .oneshot(get_request("/results/summary"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        assert!(String::from_utf8_lossy(&bytes).contains("LRS Questionnaire"));
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed() {
        let router = app_router(state(None, false), &frontend_dir());
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .expect("request builds");
        let response = router.oneshot(request).await.expect("router responds");

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
    }
}
