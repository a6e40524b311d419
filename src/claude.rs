//! Minimal Anthropic Messages API client for our use-cases.
//!
//! We only call /v1/messages and request either plain text or strict JSON
//! embedded in the reply. Calls are instrumented and log model names,
//! latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{instrument, info, error};

use crate::config::Prompts;
use crate::domain::{Exercise, ExerciseSource};
use crate::util::{fill_template, trunc_for_log};
use uuid::Uuid;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

#[derive(Clone)]
pub struct Claude {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub fast_model: String,
  pub strong_model: String,
}

#[derive(Deserialize)]
struct Gen {
  sentence: String,
  answer: String,
  #[serde(default)] translation_en: String,
  #[serde(default)] hint: Option<String>,
}

impl Claude {
  /// Construct the client if we find ANTHROPIC_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("ANTHROPIC_API_KEY").ok()?;
    let base_url =
      std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| "https://api.anthropic.com".into());
    let fast_model =
      std::env::var("ANTHROPIC_FAST_MODEL").unwrap_or_else(|_| "claude-3-5-haiku-latest".into());
    let strong_model =
      std::env::var("ANTHROPIC_STRONG_MODEL").unwrap_or_else(|_| "claude-3-5-sonnet-latest".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, fast_model, strong_model })
  }

  /// Plain-text message completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn message_plain(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<String, String> {
    let url = format!("{}/v1/messages", self.base_url);
    let req = MessagesRequest {
      model: model.to_string(),
      max_tokens: MAX_TOKENS,
      system: system.to_string(),
      messages: vec![MessageReq { role: "user".into(), content: user.into() }],
      temperature,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "tudobem-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-api-key", &self.api_key)
      .header("anthropic-version", ANTHROPIC_VERSION)
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_claude_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(format!("Anthropic HTTP {}: {}", status, msg));
    }

    let body: MessagesResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(input_tokens = ?usage.input_tokens, output_tokens = ?usage.output_tokens, "Claude usage");
    }
    let text = body.content.iter()
      .filter_map(|b| b.text.as_deref())
      .collect::<Vec<_>>()
      .join("")
      .trim()
      .to_string();

    Ok(text)
  }

  /// JSON message completion. Generic over the target type T.
  ///
  /// The Messages API has no JSON response mode, so the prompt must demand
  /// strict JSON and we tolerate code fences / prose around the payload.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn message_json<T: for<'a> Deserialize<'a>>(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<T, String> {
    let text = self.message_plain(model, system, user, temperature).await?;
    let payload = extract_json_payload(&text)
      .ok_or_else(|| format!("No JSON payload in reply: {}", trunc_for_log(&text, 120)))?;
    serde_json::from_str::<T>(payload).map_err(|e| format!("JSON parse error: {}", e))
  }

  // --- High-level helpers (domain-specialized) ---

  /// Generate a fresh gap-fill exercise for the given level and topic.
  #[instrument(
    level = "info",
    skip(self, prompts),
    fields(%level, %topic, model = %self.strong_model)
  )]
  pub async fn generate_exercise(
    &self,
    prompts: &Prompts,
    level: &str,
    topic: &str,
  ) -> Result<Exercise, String> {
    let system = &prompts.exercise_system;
    let user = fill_template(
      &prompts.exercise_user_template,
      &[("level", level), ("topic", topic)],
    );
    let start = std::time::Instant::now();
    let result = self.message_json::<Gen>(&self.strong_model, system, &user, 0.9).await;
    let elapsed = start.elapsed();

    match &result {
      Ok(_) => info!(?elapsed, "Model response received successfully"),
      Err(e) => {
        error!(?elapsed, error = %e, "Model call failed during exercise generation");
        return Err(format!("Model generation failed: {e}"));
      }
    }

    let gen = result?;
    if !gen.sentence.contains("___") || gen.answer.trim().is_empty() {
      return Err("Generated exercise is malformed (no gap or empty answer)".into());
    }

    let ex = Exercise {
      id: Uuid::new_v4().to_string(),
      level: level.to_string(),
      topic: topic.to_string(),
      source: ExerciseSource::Generated,
      sentence: gen.sentence,
      answer: gen.answer.trim().to_string(),
      translation_en: gen.translation_en,
      hint: gen.hint,
    };

    info!(
      exercise_id = %ex.id,
      sentence_preview = %ex.sentence.chars().take(40).collect::<String>(),
      "Exercise successfully generated"
    );

    Ok(ex)
  }

  /// Ask for wrong-answer candidates for a multiple-choice rendering.
  /// The reply is coerced at this boundary: only JSON string elements
  /// survive; numbers, nulls, and nested values are dropped.
  #[instrument(level = "info", skip(self, prompts, exercise),
               fields(exercise_id = %exercise.id, model = %self.fast_model))]
  pub async fn suggest_distractors(
    &self,
    prompts: &Prompts,
    exercise: &Exercise,
  ) -> Result<Vec<String>, String> {
    let system = &prompts.distractor_system;
    let user = fill_template(
      &prompts.distractor_user_template,
      &[("sentence", &exercise.sentence), ("answer", &exercise.answer)],
    );
    let value: serde_json::Value =
      self.message_json(&self.fast_model, system, &user, 0.7).await?;
    let candidates = coerce_string_list(&value);
    if candidates.is_empty() {
      return Err("Distractor reply contained no usable strings".into());
    }
    Ok(candidates)
  }

  /// Grade a submitted answer in context.
  #[instrument(level = "info", skip(self, prompts, exercise, user_answer),
               fields(exercise_id = %exercise.id, ans_len = user_answer.len()))]
  pub async fn grade_answer(
    &self,
    prompts: &Prompts,
    exercise: &Exercise,
    user_answer: &str,
  ) -> Result<(bool, String), String> {
    #[derive(Deserialize)]
    struct Graded { correct: bool, #[serde(default)] explanation: String }

    let system = &prompts.grading_system;
    let user = fill_template(
      &prompts.grading_user_template,
      &[
        ("sentence",    &exercise.sentence),
        ("answer",      &exercise.answer),
        ("user_answer", user_answer),
      ],
    );
    let g: Graded = self.message_json(&self.strong_model, system, &user, 0.2).await?;
    Ok((g.correct, g.explanation))
  }
}

// --- Messages API DTOs ---

#[derive(Serialize)]
struct MessagesRequest {
  model: String,
  max_tokens: u32,
  system: String,
  messages: Vec<MessageReq>,
  temperature: f32,
}
#[derive(Serialize)]
struct MessageReq { role: String, content: String }

#[derive(Deserialize)]
struct MessagesResponse {
  content: Vec<ContentBlock>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ContentBlock { #[serde(default)] text: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] input_tokens: Option<u32>,
  #[serde(default)] output_tokens: Option<u32>,
}

/// Keep only string elements of a JSON array, trimmed and non-empty.
/// Non-array values yield an empty list.
fn coerce_string_list(value: &serde_json::Value) -> Vec<String> {
  match value {
    serde_json::Value::Array(items) => items
      .iter()
      .filter_map(|v| v.as_str())
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
      .collect(),
    _ => Vec::new(),
  }
}

/// Slice out the first JSON object or array in a model reply, tolerating
/// markdown fences and surrounding prose.
fn extract_json_payload(text: &str) -> Option<&str> {
  let obj = text.find('{').and_then(|s| text.rfind('}').map(|e| (s, e)));
  let arr = text.find('[').and_then(|s| text.rfind(']').map(|e| (s, e)));
  let (start, end) = match (obj, arr) {
    (Some(o), Some(a)) => if a.0 < o.0 { a } else { o },
    (Some(o), None) => o,
    (None, Some(a)) => a,
    (None, None) => return None,
  };
  if end < start { return None; }
  Some(&text[start..=end])
}

/// Try to extract a clean error message from an Anthropic error body.
fn extract_claude_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
