//! Router-level tests for the HTTP endpoints

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use classifier::traits::MockClassifier;
use classifier::{ClassificationRequest, ClassifyError, ImageLimits};
use orchestrator::GameConfig;
use shared::{Category, CategoryCatalog, Prediction, PredictionList};
use webserver::{AppState, HealthResponse, ServerConfig, WebServer};

const FORM: &str = "application/x-www-form-urlencoded";

fn catalog(size: u32) -> Arc<CategoryCatalog> {
    Arc::new((0..size).map(|i| Category::new(i, format!("thing{i}"))).collect())
}

fn router_with(classifier: MockClassifier, catalog: Arc<CategoryCatalog>, static_dir: &TempDir) -> Router {
    let config = ServerConfig {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        static_dir: static_dir.path().to_path_buf(),
        game: GameConfig::default(),
        limits: ImageLimits::new(10, 10),
    };
    let state = AppState::new(config, catalog, Arc::new(classifier));
    WebServer::new(state).build_router()
}

fn router(classifier: MockClassifier) -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    (router_with(classifier, catalog(10), &dir), dir)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(router: Router, uri: &str) -> axum::response::Response {
    router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(router: Router, body: impl Into<String>) -> axum::response::Response {
    router
        .oneshot(
            Request::post("/classify")
                .header(header::CONTENT_TYPE, FORM)
                .body(Body::from(body.into()))
                .unwrap(),
        )
        .await
        .unwrap()
}

fn categories_of(text: &str) -> Vec<Category> {
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_health_reports_catalog() {
    let (router, _dir) = router(MockClassifier::new());

    let response = get(router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.categories, 10);
    assert_eq!(health.active_sessions, 0);
}

#[tokio::test]
async fn test_categories_sample_is_distinct() {
    let (router, _dir) = router(MockClassifier::new());

    let response = get(router, "/categories?n=4").await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut picked = categories_of(&body_text(response).await);
    assert_eq!(picked.len(), 4);
    picked.sort_by_key(|c| c.index);
    picked.dedup_by_key(|c| c.index);
    assert_eq!(picked.len(), 4);
}

#[tokio::test]
async fn test_categories_count_defaults_and_clamps() {
    let dir = TempDir::new().unwrap();

    let text = body_text(get(router_with(MockClassifier::new(), catalog(10), &dir), "/categories").await).await;
    assert_eq!(categories_of(&text).len(), ServerConfig::DEFAULT_CATEGORY_COUNT);

    let text = body_text(get(router_with(MockClassifier::new(), catalog(10), &dir), "/categories?n=abc").await).await;
    assert_eq!(categories_of(&text).len(), ServerConfig::DEFAULT_CATEGORY_COUNT);

    let text = body_text(get(router_with(MockClassifier::new(), catalog(3), &dir), "/categories?n=50").await).await;
    assert_eq!(categories_of(&text).len(), 3);
}

#[tokio::test]
async fn test_categories_unavailable_without_catalog() {
    let dir = TempDir::new().unwrap();
    let router = router_with(MockClassifier::new(), Arc::new(CategoryCatalog::default()), &dir);

    let response = get(router, "/categories?n=2").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_classify_returns_ranked_predictions() {
    let mut classifier = MockClassifier::new();
    classifier
        .expect_classify()
        .withf(|request: &ClassificationRequest| {
            request.envelope == "data:image/png;base64,AAAA"
                && request.expected_category.as_deref() == Some("house")
                && request.session.is_none()
        })
        .times(1)
        .returning(|_| {
            Ok(PredictionList::from_ranked(vec![
                Prediction::new(2, "house", 0.8),
                Prediction::new(1, "dog", 0.15),
                Prediction::new(0, "cat", 0.05),
            ]))
        });
    let (router, _dir) = router(classifier);

    let response = post_form(
        router,
        "image=data%3Aimage%2Fpng%3Bbase64%2CAAAA&expected_category=house&session=not-a-uuid",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let predictions: Vec<Prediction> = serde_json::from_str(&body_text(response).await).unwrap();
    let names: Vec<_> = predictions.iter().map(|p| p.category_name.as_str()).collect();
    assert_eq!(names, vec!["house", "dog", "cat"]);
}

#[tokio::test]
async fn test_classify_blank_category_is_dropped() {
    let mut classifier = MockClassifier::new();
    classifier
        .expect_classify()
        .withf(|request: &ClassificationRequest| request.expected_category.is_none())
        .times(1)
        .returning(|_| Ok(PredictionList::from_ranked(Vec::new())));
    let (router, _dir) = router(classifier);

    let response = post_form(router, "image=x&expected_category=%20").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[tokio::test]
async fn test_classify_error_families_map_to_status() {
    let cases = [
        (ClassifyError::MalformedEnvelope, StatusCode::BAD_REQUEST),
        (ClassifyError::invalid_image("too wide"), StatusCode::BAD_REQUEST),
        (ClassifyError::unavailable("connection refused"), StatusCode::BAD_GATEWAY),
        (ClassifyError::protocol("not json"), StatusCode::BAD_GATEWAY),
        (
            ClassifyError::Internal {
                message: "task panicked".to_string(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, status) in cases {
        let mut classifier = MockClassifier::new();
        let returned = error.clone();
        classifier
            .expect_classify()
            .times(1)
            .returning(move |_| Err(returned.clone()));
        let (router, _dir) = router(classifier);

        let response = post_form(router, "image=x").await;
        assert_eq!(response.status(), status, "{error}");

        let text = body_text(response).await;
        if status == StatusCode::BAD_REQUEST {
            assert!(text.contains("image"), "{text}");
        } else {
            assert!(!text.contains(&error.to_string()), "{text}");
        }
    }
}

#[tokio::test]
async fn test_classify_rejects_oversized_body() {
    let mut classifier = MockClassifier::new();
    classifier.expect_classify().times(0);
    let (router, _dir) = router(classifier);

    let response = post_form(router, format!("image={}", "A".repeat(64 * 1024))).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_socket_route_requires_upgrade() {
    let (router, _dir) = router(MockClassifier::new());

    let response = get(router, "/ws").await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_static_client_is_served() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<canvas></canvas>").unwrap();
    let router = router_with(MockClassifier::new(), catalog(3), &dir);

    let response = get(router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<canvas></canvas>");
}
