//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; logs include parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::quiz::DEFAULT_QUIZ_LEN;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_phrases(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let catalog = phrase_catalog(&state);
  info!(target: "duoshao_backend", categories = catalog.len(), "HTTP phrase catalog served");
  Json(catalog)
}

#[instrument(level = "info", fields(level = %q.level.clone().unwrap_or_else(|| "easy".into())))]
pub async fn http_get_quiz(Query(q): Query<QuizQuery>) -> impl IntoResponse {
  let tier = tier_or_default(q.level.as_deref().unwrap_or(""));
  let count = q.count.unwrap_or(DEFAULT_QUIZ_LEN);
  let set = build_quiz_set(tier, count);
  info!(target: "quiz", id = %set.id, level = %tier.as_str(), "HTTP quiz set served");
  Json(set)
}

#[instrument(level = "info", fields(n = q.n))]
pub async fn http_get_number(Query(q): Query<NumberQuery>) -> Response {
  match format_number(q.n) {
    Ok(zh) => Json(NumberOut { n: q.n, zh }).into_response(),
    Err(e) => (
      StatusCode::BAD_REQUEST,
      Json(ErrorOut { message: e.to_string() }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_tts(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TtsIn>,
) -> Response {
  if body.text.trim().is_empty() {
    return (
      StatusCode::BAD_REQUEST,
      Json(TtsErrorOut { error: "Text is required".into(), details: String::new() }),
    )
      .into_response();
  }

  match synthesize_speech(&state, &body.text).await {
    Ok(audio) => (
      [
        (header::CONTENT_TYPE, "audio/mpeg"),
        (header::CACHE_CONTROL, "public, max-age=86400"),
      ],
      audio,
    )
      .into_response(),
    Err(e) => (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(TtsErrorOut { error: "Error generating speech".into(), details: e }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.level, answers = body.answers.len()))]
pub async fn http_post_summary(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SummaryIn>,
) -> Response {
  let (delivered, message) = deliver_summary(&state, &body.level, &body.answers).await;
  let status = if delivered { StatusCode::OK } else { StatusCode::INTERNAL_SERVER_ERROR };
  (status, Json(SummaryOut { delivered, message })).into_response()
}
