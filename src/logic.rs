//! Core behaviors shared by the HTTP handlers.
//!
//! This includes:
//!   - Evaluating answers (Claude grading with the strict local checker as fallback)
//!   - Building the multiple-choice option set (Claude suggestions with
//!     offline synthesis as fallback, then filter + top-up + shuffle)

use rand::seq::SliceRandom;
use tracing::{error, info, instrument, warn};

use crate::answers::is_match;
use crate::distractors::{basic_distractors, build_option_set};
use crate::state::AppState;

/// Evaluate a submitted answer. Returns (correct, expected, explanation).
///
/// Claude grades in context when available; any failure degrades silently to
/// the strict local equality check.
#[instrument(level = "info", skip(state, answer), fields(%exercise_id, answer_len = answer.len()))]
pub async fn evaluate_answer(state: &AppState, exercise_id: &str, answer: &str) -> (bool, String, String) {
  let Some(ex) = state.get_exercise(exercise_id).await else {
    return (false, String::new(), format!("Unknown exerciseId: {}", exercise_id));
  };

  if let Some(claude) = &state.claude {
    match claude.grade_answer(&state.prompts, &ex, answer).await {
      Ok((correct, explanation)) => return (correct, ex.answer.clone(), explanation),
      Err(e) => {
        error!(target: "exercise", id = %ex.id, error = %e, "Claude grade_answer failed; using local check.");
      }
    }
  }

  let correct = is_match(answer, &ex.answer);
  let explanation = if correct {
    "(local) Exact match.".to_string()
  } else {
    format!("(local) Expected \"{}\" (exact match, accents included).", ex.answer)
  };
  (correct, ex.answer.clone(), explanation)
}

/// Build the shuffled multiple-choice option set for an exercise.
///
/// Raw candidates come from Claude when available, otherwise from the offline
/// generator; either way the set always contains the correct answer and is
/// deduplicated before shuffling. Returns None for an unknown exercise id.
#[instrument(level = "info", skip(state), fields(%exercise_id))]
pub async fn choice_options(state: &AppState, exercise_id: &str) -> Option<Vec<String>> {
  let ex = state.get_exercise(exercise_id).await?;

  let raw = if let Some(claude) = &state.claude {
    match claude.suggest_distractors(&state.prompts, &ex).await {
      Ok(candidates) => {
        info!(target: "exercise", id = %ex.id, n = candidates.len(), source = "claude", "Distractor candidates received");
        candidates
      }
      Err(e) => {
        error!(target: "exercise", id = %ex.id, error = %e, "Claude suggest_distractors failed; using offline synthesis.");
        basic_distractors(&ex.answer, &state.filler_vocab)
      }
    }
  } else {
    basic_distractors(&ex.answer, &state.filler_vocab)
  };

  let mut options = build_option_set(&ex.answer, &raw);
  if options.len() < crate::distractors::OPTION_SET_SIZE {
    warn!(target: "exercise", id = %ex.id, n = options.len(), "Option set is short of four entries");
  }
  options.shuffle(&mut rand::thread_rng());
  Some(options)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::distractors::OPTION_SET_SIZE;

  fn offline_state() -> AppState {
    let mut state = AppState::new();
    // Tests exercise the offline paths only, whatever the env says.
    state.claude = None;
    state
  }

  #[tokio::test]
  async fn local_grading_is_strict_equality() {
    let state = offline_state();
    let (ex, _) = state.choose_exercise("a1", "presente-indicativo").await;

    let (correct, expected, _) = evaluate_answer(&state, &ex.id, &ex.answer).await;
    assert!(correct);
    assert_eq!(expected, ex.answer);

    let shouted = format!("  {}  ", ex.answer.to_uppercase());
    let (correct, _, _) = evaluate_answer(&state, &ex.id, &shouted).await;
    assert!(correct, "case/trim must be ignored");

    let (correct, _, explanation) = evaluate_answer(&state, &ex.id, "definitely-wrong").await;
    assert!(!correct);
    assert!(explanation.contains(&ex.answer));
  }

  #[tokio::test]
  async fn unknown_exercise_is_reported_not_panicked() {
    let state = offline_state();
    let (correct, expected, explanation) = evaluate_answer(&state, "nope", "falo").await;
    assert!(!correct);
    assert!(expected.is_empty());
    assert!(explanation.contains("nope"));

    assert!(choice_options(&state, "nope").await.is_none());
  }

  #[tokio::test]
  async fn offline_options_are_complete_and_contain_the_answer() {
    let state = offline_state();
    for (level, topic) in [("a1", "presente-indicativo"), ("a2", "preterito-perfeito")] {
      let (ex, _) = state.choose_exercise(level, topic).await;
      let options = choice_options(&state, &ex.id).await.expect("known id");
      assert!(options.len() <= OPTION_SET_SIZE);
      assert!(options.contains(&ex.answer), "{level}: {options:?}");
      for (i, a) in options.iter().enumerate() {
        for b in &options[i + 1..] {
          assert_ne!(a, b, "{level}: duplicate in {options:?}");
        }
      }
    }
  }
}
