use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::services::ServeDir;

use crate::page;
use crate::state::AppState;
use crate::translate::{Language, TranslateRequest, TranslateResponse, TranslationStatsSnapshot};

pub const MAX_JOKES_PER_REQUEST: usize = 10;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .route("/api/jokes", get(get_jokes))
        .route("/api/translate", post(translate))
        .route("/api/translation/stats", get(translation_stats));

    match &state.config.system_config.static_dir {
        Some(dir) => router.nest_service("/static", ServeDir::new(dir)),
        None => router,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JokesQuery {
    pub lang: Option<String>,
    pub count: Option<usize>,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message.into() })))
}

/// Unknown or missing languages fall back to the configured default.
fn page_language(state: &AppState, lang: Option<&str>) -> Language {
    lang.and_then(Language::parse)
        .unwrap_or(state.config.joke_config.default_language)
}

async fn index(State(state): State<AppState>, Query(query): Query<JokesQuery>) -> Html<String> {
    let language = page_language(&state, query.lang.as_deref());
    let jokes = state
        .jokes
        .jokes_for(language, state.config.joke_config.count)
        .await;
    Html(page::render(language, &jokes))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn get_jokes(
    State(state): State<AppState>,
    Query(query): Query<JokesQuery>,
) -> Result<Json<Value>, ApiError> {
    let language = match query.lang.as_deref() {
        Some(code) => Language::parse(code)
            .ok_or_else(|| bad_request(format!("unsupported language: {}", code)))?,
        None => state.config.joke_config.default_language,
    };
    let count = query
        .count
        .unwrap_or(state.config.joke_config.count)
        .clamp(1, MAX_JOKES_PER_REQUEST);

    let jokes = state.jokes.jokes_for(language, count).await;
    Ok(Json(json!({
        "language": language,
        "jokes": jokes,
    })))
}

async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(bad_request("text is required"));
    }
    let target = Language::parse(&payload.target_lang)
        .ok_or_else(|| bad_request(format!("unsupported language: {}", payload.target_lang)))?;

    let translated_text = state.translator.translate(&payload.text, target).await;
    Ok(Json(TranslateResponse {
        translated_text,
        target_lang: target,
    }))
}

async fn translation_stats(State(state): State<AppState>) -> Json<TranslationStatsSnapshot> {
    Json(state.translator.stats().await)
}
