use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::service::{FieldSelector, FormSessionError, FormSessionService};
use crate::disclosure::ContentModel;
use crate::quality::FieldType;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub model: Option<ContentModel>,
}

#[derive(Debug, Deserialize)]
pub struct SelectModelRequest {
    pub model: ContentModel,
}

#[derive(Debug, Deserialize)]
pub struct FieldInputRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub selected: usize,
}

/// Ad-hoc scoring request; `field_id` wins over `field_type` when both are set.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub field_id: Option<String>,
    #[serde(default)]
    pub field_type: Option<String>,
}

/// Router builder exposing scoring and form-session endpoints.
pub fn form_router<R>(service: Arc<FormSessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/quality/evaluate", post(evaluate_handler::<R>))
        .route("/api/v1/forms/sessions", post(create_handler::<R>))
        .route(
            "/api/v1/forms/sessions/:session_id",
            get(snapshot_handler::<R>).delete(discard_handler::<R>),
        )
        .route(
            "/api/v1/forms/sessions/:session_id/model",
            put(select_model_handler::<R>),
        )
        .route(
            "/api/v1/forms/sessions/:session_id/fields/:field_id/input",
            post(input_handler::<R>),
        )
        .route(
            "/api/v1/forms/sessions/:session_id/fields/:field_id/selection",
            post(selection_handler::<R>),
        )
        .route(
            "/api/v1/forms/sessions/:session_id/groups/:group_id/show-all",
            post(show_all_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let selector = match (&request.field_id, &request.field_type) {
        (Some(field_id), _) => FieldSelector::Id(field_id.as_str()),
        (None, Some(field_type)) => FieldSelector::Type(FieldType::parse(field_type)),
        (None, None) => FieldSelector::Type(FieldType::Default),
    };
    let evaluation = service.evaluate(&request.text, selector);
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    axum::Json(request): axum::Json<CreateSessionRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.create(request.model) {
        Ok(snapshot) => (StatusCode::CREATED, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn discard_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.discard(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn select_model_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<SelectModelRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.select_model(&SessionId(session_id), request.model) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn input_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    Path((session_id, field_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<FieldInputRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.record_input(&SessionId(session_id), &field_id, &request.text) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn selection_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    Path((session_id, field_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.record_selection(&SessionId(session_id), &field_id, request.selected) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn show_all_handler<R>(
    State(service): State<Arc<FormSessionService<R>>>,
    Path((session_id, group_id)): Path<(String, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.show_all(&SessionId(session_id), &group_id) {
        Ok(revealed) => {
            let payload = json!({
                "group_id": group_id,
                "revealed": revealed,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: FormSessionError) -> Response {
    let status = match &error {
        FormSessionError::Repository(RepositoryError::NotFound)
        | FormSessionError::UnknownField(_)
        | FormSessionError::UnknownGroup(_) => StatusCode::NOT_FOUND,
        FormSessionError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        FormSessionError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
