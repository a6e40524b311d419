//! Domain models used by the backend: exercise provenance and the exercise itself.

use serde::{Deserialize, Serialize};

/// Where did we get the exercise from?
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseSource {
  LocalBank,   // from user-provided TOML bank
  Generated,   // generated via Claude and cached in memory
  Seed,  // built-in seeds (last resort)
}

/// A Portuguese gap-fill exercise. `sentence` contains a single "___" gap
/// that `answer` completes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
  pub id: String,
  pub level: String,    // CEFR-ish, free-form (e.g., "a1", "b2")
  pub topic: String,    // grammar topic (e.g., "presente-indicativo")
  pub source: ExerciseSource,

  pub sentence: String,
  pub answer: String,
  #[serde(default)] pub translation_en: String,
  /// Usually the infinitive of the gapped verb.
  #[serde(default)] pub hint: Option<String>,
}
