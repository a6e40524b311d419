//! Loading app configuration (prompts + optional exercise bank + filler
//! vocabulary) from TOML.
//!
//! See `AppConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub exercises: Vec<ExerciseCfg>,
  /// Short function words blended into offline distractor synthesis.
  /// Override per deployment to match locale or level.
  #[serde(default = "default_filler_vocab")]
  pub filler_vocab: Vec<String>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      prompts: Prompts::default(),
      exercises: Vec::new(),
      filler_vocab: default_filler_vocab(),
    }
  }
}

/// Exercise entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ExerciseCfg {
  #[serde(default)] pub id: Option<String>,
  pub level: String,
  #[serde(default)] pub topic: Option<String>,
  #[serde(default)] pub sentence: Option<String>,
  #[serde(default)] pub answer: Option<String>,
  #[serde(default)] pub translation_en: Option<String>,
  #[serde(default)] pub hint: Option<String>,
}

/// Prompts used by the Claude client. Defaults are sensible for European
/// Portuguese training. You can override them in TOML to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  // Exercise generation
  pub exercise_system: String,
  pub exercise_user_template: String,
  // Distractor suggestions
  pub distractor_system: String,
  pub distractor_user_template: String,
  // Answer grading
  pub grading_system: String,
  pub grading_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      exercise_system: "You are a European Portuguese learning content generator. Respond ONLY with strict JSON.".into(),
      exercise_user_template: "Generate one gap-fill sentence for CEFR level '{level}' practising '{topic}'. Use '___' for the gap. Return JSON with fields: sentence, answer, translation_en, hint (infinitive of the gapped verb, or null). Keep it short and natural.".into(),
      distractor_system: "You suggest wrong answers for Portuguese multiple-choice exercises. Respond ONLY with a strict JSON array of strings.".into(),
      distractor_user_template: "Sentence: {sentence}\nCorrect answer: {answer}\nReturn a JSON array of 3 plausible but incorrect Portuguese options for the gap. Each must be clearly wrong in this sentence. No explanations.".into(),
      grading_system: "You are a strict European Portuguese answer grader. Reply as compact JSON.".into(),
      grading_user_template: "Sentence: {sentence}\nExpected answer: {answer}\nUser answer: {user_answer}\nReturn JSON {\"correct\": boolean, \"explanation\": string}. Accept only forms a native speaker would consider correct in this gap; explain briefly in English.".into(),
    }
  }
}

/// Built-in filler vocabulary: common short Portuguese function words.
pub fn default_filler_vocab() -> Vec<String> {
  [
    "mais", "muito", "bem", "já", "não", "sim", "aqui", "ali", "hoje",
    "sempre", "nunca", "também", "ainda", "depois", "antes", "agora",
    "então", "assim",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "tudobem_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "tudobem_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "tudobem_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn minimal_toml_gets_defaults() {
    let cfg: AppConfig = toml::from_str("").expect("empty config");
    assert!(cfg.exercises.is_empty());
    assert!(!cfg.filler_vocab.is_empty());
    assert!(cfg.prompts.exercise_user_template.contains("{level}"));
  }

  #[test]
  fn bank_entries_parse() {
    let cfg: AppConfig = toml::from_str(
      r#"
        [[exercises]]
        level = "a1"
        topic = "presente-indicativo"
        sentence = "Eu ___ português todos os dias."
        answer = "falo"
        hint = "falar"
      "#,
    )
    .expect("bank config");
    assert_eq!(cfg.exercises.len(), 1);
    assert_eq!(cfg.exercises[0].answer.as_deref(), Some("falo"));
  }
}
