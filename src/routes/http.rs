//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, warn, instrument};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

const DEFAULT_LEVEL: &str = "a1";
const DEFAULT_TOPIC: &str = "presente-indicativo";

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(level = %q.level.clone().unwrap_or_else(|| DEFAULT_LEVEL.into())))]
pub async fn http_get_exercise(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ExerciseQuery>,
) -> impl IntoResponse {
  let level = q.level.unwrap_or_else(|| DEFAULT_LEVEL.into());
  let topic = q.topic.unwrap_or_else(|| DEFAULT_TOPIC.into());
  let (ex, origin) = state.choose_exercise(&level, &topic).await;
  info!(target: "exercise", %level, id = %ex.id, %origin, "HTTP exercise served");
  Json(crate::protocol::to_out(&ex))
}

#[instrument(level = "info", skip(state, body), fields(%body.exercise_id, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> impl IntoResponse {
  let (correct, expected, explanation) = evaluate_answer(&state, &body.exercise_id, &body.answer).await;
  info!(target: "exercise", id = %body.exercise_id, %correct, "HTTP submit_answer evaluated");
  Json(AnswerOut { correct, expected, explanation })
}

#[instrument(level = "info", skip(state), fields(%q.exercise_id))]
pub async fn http_get_options(
  State(state): State<Arc<AppState>>,
  Query(q): Query<OptionsQuery>,
) -> impl IntoResponse {
  match choice_options(&state, &q.exercise_id).await {
    Some(options) => {
      info!(target: "exercise", id = %q.exercise_id, n = options.len(), "HTTP options served");
      Json(OptionsOut { exercise_id: q.exercise_id, options }).into_response()
    }
    None => {
      warn!(target: "exercise", id = %q.exercise_id, "HTTP options requested for unknown exercise");
      (
        StatusCode::NOT_FOUND,
        Json(OptionsOut { exercise_id: q.exercise_id, options: vec![] }),
      )
        .into_response()
    }
  }
}
