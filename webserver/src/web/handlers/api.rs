//! REST API handlers

use axum::extract::{Query, State};
use axum::response::Json;
use axum::Form;
use tracing::debug;

use classifier::{ClassificationRequest, Classifier};
use orchestrator::CategoryProvider;
use shared::{Category, PredictionList, SessionId};

use crate::error::WebServerResult;
use crate::state::{AppState, ServerConfig};
use crate::types::{CategoriesQuery, ClassifyForm, HealthResponse};

/// `GET /categories?n=`: a random sample of distinct categories
pub async fn categories<C>(
    State(state): State<AppState<C>>,
    Query(query): Query<CategoriesQuery>,
) -> WebServerResult<Json<Vec<Category>>>
where
    C: Classifier + 'static,
{
    let requested = query.count(ServerConfig::DEFAULT_CATEGORY_COUNT);
    let picked = CategoryProvider::categories(state.catalog.as_ref(), requested).await?;
    debug!("Serving {} of {} requested categories", picked.len(), requested);
    Ok(Json(picked))
}

/// `POST /classify`: one-shot classification of a form-encoded drawing
pub async fn classify<C>(
    State(state): State<AppState<C>>,
    Form(form): Form<ClassifyForm>,
) -> WebServerResult<Json<PredictionList>>
where
    C: Classifier + 'static,
{
    let mut request = ClassificationRequest::new(form.image);
    if let Some(category) = form.expected_category.filter(|c| !c.trim().is_empty()) {
        request = request.with_expected_category(category);
    }
    if let Some(session) = form.session.as_deref().and_then(|s| SessionId::from_string(s).ok()) {
        request = request.with_session(session);
    }

    let predictions = state.classifier.classify(request).await?;
    Ok(Json(predictions))
}

/// `GET /health`
pub async fn health<C>(State(state): State<AppState<C>>) -> Json<HealthResponse>
where
    C: Classifier + 'static,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        categories: state.catalog.len(),
        active_sessions: state.active_sessions(),
        uptime_seconds: state.uptime_seconds(),
    })
}
