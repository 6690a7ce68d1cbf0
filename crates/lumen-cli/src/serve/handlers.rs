//! HTTP route handlers for the web server.
//!
//! Handlers are kept thin, delegating the question itself to the pipeline.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::info;

use lumen_core::config::AVAILABLE_MODELS;
use lumen_core::{ask_with_settings, Mode, ValidationError};

use super::models::{AskRequest, AskResponse, ErrorBody, ModeOption, OptionsResponse};
use super::templates;
use super::AppState;
use crate::overrides::QueryOverrides;

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - The question page, preset from the server's config.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let settings = &state.settings;
    Html(templates::render_ask_page(
        AVAILABLE_MODELS,
        &settings.llm.model,
        settings.pipeline.mode,
        settings.pipeline.follow_ups,
    ))
}

// =============================================================================
// API Handlers
// =============================================================================

/// GET `/api/options` - Models and modes for the pickers.
pub async fn api_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let settings = &state.settings;
    Json(OptionsResponse {
        models: AVAILABLE_MODELS.iter().map(|m| m.to_string()).collect(),
        default_model: settings.llm.model.clone(),
        modes: Mode::ALL
            .into_iter()
            .map(|mode| ModeOption {
                value: mode,
                label: mode.display_name(),
            })
            .collect(),
        default_mode: settings.pipeline.mode,
        follow_ups: settings.pipeline.follow_ups,
    })
}

/// POST `/api/ask` - Answer a question.
///
/// Omitted mode, model and follow-ups fall back to the server's config.
/// Missing keys or an empty question yield 400. Search and generation
/// failures still yield 200 with an `Error: ...` answer.
pub async fn api_ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let settings = &state.settings;
    let overrides = QueryOverrides {
        model: request.model,
        mode: request.mode,
        search_api_key: request.search_api_key,
        llm_api_key: request.llm_api_key,
    };
    let config = overrides.apply(settings.pipeline_config());
    let question = request.question.trim();

    config.validate(question)?;
    info!(model = %config.model, mode = %config.mode, "ask request");

    let with_follow_ups = request.follow_ups.unwrap_or(settings.pipeline.follow_ups);
    let result = ask_with_settings(settings, config, question, with_follow_ups, |_| {}).await;

    let sources = result
        .display_sources(settings.pipeline.source_display_limit)
        .to_vec();

    Ok(Json(AskResponse {
        answer: result.answer_text,
        sources,
        follow_ups: result.follow_up_questions,
    }))
}

// =============================================================================
// Errors
// =============================================================================

/// Rejected request, rendered as 400 with a JSON body.
pub struct ApiError(ValidationError);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
