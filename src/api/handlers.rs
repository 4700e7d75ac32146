use crate::api::pages::{self, Flash};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::export::{HistoryExporter, CSV_MIME_TYPE, EXPORT_FILE_NAME};
use crate::ml::PredictionOutcome;
use crate::models::{CoverType, HistoryRecord, TerrainInput};
use crate::session::{session_cookie, session_id_from_headers, Session};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.session_count(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: u64,
}

/// The cover-type label table
pub async fn list_cover_types() -> Json<Vec<CoverTypeResponse>> {
    Json(
        CoverType::all()
            .into_iter()
            .map(CoverTypeResponse::from)
            .collect(),
    )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoverTypeResponse {
    pub class: u8,
    pub label: String,
}

impl From<CoverType> for CoverTypeResponse {
    fn from(cover: CoverType) -> Self {
        Self {
            class: cover.class(),
            label: cover.label().to_string(),
        }
    }
}

/// Run a prediction for the caller's session
pub async fn create_prediction(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<TerrainInput>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(rejection_error)?;
    request.validate()?;

    let session = state.session_for(&headers).await;
    let outcome = run_prediction(&state, &session, &request).await?;

    let body = Json(PredictionResponse::new(session.id, outcome));
    Ok(with_session_cookie(&state, &session, (StatusCode::CREATED, body)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub session_id: Uuid,
    pub class: u8,
    pub label: String,
    pub record: HistoryRecord,
}

impl PredictionResponse {
    fn new(session_id: Uuid, outcome: PredictionOutcome) -> Self {
        Self {
            session_id,
            class: outcome.class,
            label: outcome.cover_type.label().to_string(),
            record: outcome.record,
        }
    }
}

/// The caller's history, most recent first
pub async fn get_history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session_for(&headers).await;

    let records: Vec<HistoryRecord> = session.history.lock().recent_first().cloned().collect();
    let body = Json(HistoryResponse {
        session_id: session.id,
        total: records.len(),
        records,
    });

    with_session_cookie(&state, &session, body)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub total: usize,
    pub records: Vec<HistoryRecord>,
}

/// Download the caller's history as CSV
pub async fn export_history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session_for(&headers).await;

    let csv = {
        let history = session.history.lock();
        HistoryExporter::to_csv(&history)
    };

    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME);
    let response = (
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", CSV_MIME_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    );

    with_session_cookie(&state, &session, response)
}

/// Clear the caller's history
pub async fn clear_history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session_for(&headers).await;
    let cleared = clear_session(&session);

    with_session_cookie(
        &state,
        &session,
        Json(ClearHistoryResponse {
            session_id: session.id,
            cleared,
            message: HISTORY_CLEARED.to_string(),
        }),
    )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub session_id: Uuid,
    pub cleared: usize,
    pub message: String,
}

const HISTORY_CLEARED: &str = "History cleared!";

/// Predict tab
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session_for(&headers).await;
    let html = pages::render_predict_page(&state.page, &TerrainInput::default(), None);
    with_session_cookie(&state, &session, Html(html))
}

/// Form submission from the predict tab
pub async fn submit_prediction(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Form<TerrainInput>, FormRejection>,
) -> Response {
    let session = state.session_for(&headers).await;

    // An unparseable submission re-renders the form with its defaults
    let (input, result) = match payload {
        Ok(Form(input)) => {
            let result = match input.validate() {
                Ok(()) => run_prediction(&state, &session, &input).await,
                Err(e) => Err(AppError::from(e)),
            };
            (input, result)
        }
        Err(rejection) => (TerrainInput::default(), Err(rejection_error(rejection))),
    };

    let (status, flash) = match result {
        Ok(outcome) => (
            StatusCode::OK,
            Flash::Success(format!(
                "Predicted Forest Cover Type: <strong>{}</strong> (Class {})",
                pages::escape_html(outcome.cover_type.label()),
                outcome.class
            )),
        ),
        Err(e) => {
            let message = if e.is_prediction_failure() {
                format!("Prediction failed: {}", e)
            } else {
                e.to_string()
            };
            (e.status_code(), Flash::Error(message))
        }
    };

    let html = pages::render_predict_page(&state.page, &input, Some(&flash));
    with_session_cookie(&state, &session, (status, Html(html)))
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryPageQuery {
    pub cleared: Option<bool>,
}

/// History tab
pub async fn history_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryPageQuery>,
) -> Response {
    let session = state.session_for(&headers).await;

    let flash = query
        .cleared
        .unwrap_or(false)
        .then(|| Flash::Success(HISTORY_CLEARED.to_string()));

    let html = {
        let history = session.history.lock();
        pages::render_history_page(&state.page, &history, flash.as_ref())
    };

    with_session_cookie(&state, &session, Html(html))
}

/// Clear button on the history tab
pub async fn clear_history_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session_for(&headers).await;
    clear_session(&session);
    with_session_cookie(&state, &session, Redirect::to("/history?cleared=true"))
}

/// Progress indicator, then one scale/classify/record attempt under the session lock
async fn run_prediction(
    state: &AppState,
    session: &Session,
    input: &TerrainInput,
) -> Result<PredictionOutcome> {
    state.progress.run().await;

    let mut history = session.history.lock();
    state.pipeline.predict(input, &mut history)
}

fn clear_session(session: &Session) -> usize {
    let mut history = session.history.lock();
    let cleared = history.len();
    history.clear();
    tracing::info!(session_id = %session.id, cleared, "Cleared prediction history");
    cleared
}

/// Body extraction failures are reported like any other invalid input
fn rejection_error(rejection: impl std::fmt::Display) -> AppError {
    AppError::Validation(rejection.to_string())
}

/// Attach `Set-Cookie` when the session was created by this request
fn with_session_cookie(state: &AppState, session: &Session, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();

    if session.is_new {
        match HeaderValue::from_str(&session_cookie(&state.cookie_name, &session.id)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Failed to build session cookie: {}", e),
        }
    }

    response
}

impl AppState {
    async fn session_for(&self, headers: &HeaderMap) -> Session {
        let id = session_id_from_headers(headers, &self.cookie_name);
        self.sessions.resolve(id).await
    }
}
