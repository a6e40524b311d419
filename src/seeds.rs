//! Seed data and small utilities related to default content.

use uuid::Uuid;

use crate::domain::{Exercise, ExerciseSource};

/// Minimal set of built-in exercises that guarantee the app
/// is useful even without external config or Claude.
pub fn seed_exercises() -> Vec<Exercise> {
  vec![
    Exercise {
      id: "e101".into(),
      level: "a1".into(),
      topic: "presente-indicativo".into(),
      source: ExerciseSource::Seed,
      sentence: "Eu ___ português todos os dias.".into(),
      answer: "falo".into(),
      translation_en: "I speak Portuguese every day.".into(),
      hint: Some("falar".into()),
    },
    Exercise {
      id: "e102".into(),
      level: "a1".into(),
      topic: "ser-estar".into(),
      source: ExerciseSource::Seed,
      sentence: "Nós ___ de Lisboa.".into(),
      answer: "somos".into(),
      translation_en: "We are from Lisbon.".into(),
      hint: Some("ser".into()),
    },
    Exercise {
      id: "e103".into(),
      level: "a2".into(),
      topic: "preterito-perfeito".into(),
      source: ExerciseSource::Seed,
      sentence: "Ontem eles ___ ao cinema.".into(),
      answer: "foram".into(),
      translation_en: "Yesterday they went to the cinema.".into(),
      hint: Some("ir".into()),
    },
    Exercise {
      id: "e104".into(),
      level: "b1".into(),
      topic: "imperfeito".into(),
      source: ExerciseSource::Seed,
      sentence: "Quando era criança, ela ___ muito.".into(),
      answer: "lia".into(),
      translation_en: "When she was a child, she used to read a lot.".into(),
      hint: Some("ler".into()),
    },
  ]
}

/// Absolute last-resort fallback: if all stores are empty, we inject this.
pub fn hard_fallback_exercise(level: String) -> Exercise {
  Exercise {
    id: Uuid::new_v4().to_string(),
    level,
    topic: "ser-estar".into(),
    source: ExerciseSource::Seed,
    sentence: "Ela ___ professora.".into(),
    answer: "é".into(),
    translation_en: "She is a teacher.".into(),
    hint: Some("ser".into()),
  }
}
