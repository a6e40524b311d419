//! Application state: in-memory stores, prompts, Claude client, and selection logic.
//!
//! This module owns:
//!   - exercise stores (by id, by level, last-by-level)
//!   - the filler vocabulary for offline distractor synthesis
//!   - the prompts struct (from TOML or defaults)
//!   - optional Claude client
//!
//! The selection policy generates fresh exercises by default.
//! If Claude is unavailable, we fall back to built-in seeds or a hard fallback.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::claude::Claude;
use crate::config::{load_app_config_from_env, Prompts};
use crate::domain::{Exercise, ExerciseSource};
use crate::seeds::{hard_fallback_exercise, seed_exercises};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub by_id: Arc<RwLock<HashMap<String, Exercise>>>,
    pub by_level: Arc<RwLock<HashMap<String, Vec<String>>>>,
    pub last_by_level: Arc<RwLock<HashMap<String, String>>>,
    pub claude: Option<Claude>,
    pub prompts: Prompts,
    pub filler_vocab: Vec<String>,
}

impl AppState {
    /// Build state from env: load config, seed exercises, build indices, init Claude.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        // Load TOML config if provided (prompts + optional local bank + vocab).
        let cfg = load_app_config_from_env().unwrap_or_default();
        let prompts = cfg.prompts.clone();
        let filler_vocab = cfg.filler_vocab.clone();

        let mut id_map = HashMap::<String, Exercise>::new();
        let mut level_map = HashMap::<String, Vec<String>>::new();

        // Insert config-based exercises (if any).
        for ec in &cfg.exercises {
            let id = ec.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
            let level = ec.level.clone();

            let (sentence, answer) = match (&ec.sentence, &ec.answer) {
                (Some(s), Some(a)) if s.contains("___") && !a.trim().is_empty() => {
                    (s.clone(), a.trim().to_string())
                }
                _ => {
                    error!(target: "exercise", %id, %level, "Skipping bank item: missing gap sentence or answer.");
                    continue;
                }
            };
            let ex = Exercise {
                id: id.clone(),
                level: level.clone(),
                topic: ec.topic.clone().unwrap_or_else(|| "geral".into()),
                source: ExerciseSource::LocalBank,
                sentence,
                answer,
                translation_en: ec.translation_en.clone().unwrap_or_default(),
                hint: ec.hint.clone(),
            };
            level_map.entry(level.clone()).or_default().push(id.clone());
            id_map.insert(id, ex);
        }

        // Always insert built-in seeds, but don't overwrite existing ids.
        for ex in seed_exercises() {
            let id = ex.id.clone();
            level_map
                .entry(ex.level.clone())
                .or_default()
                .push(id.clone());
            id_map.entry(id).or_insert(ex);
        }

        // Inventory summary by level/source.
        let mut count_by_level: HashMap<String, (usize, usize, usize)> = HashMap::new();
        for ex in id_map.values() {
            let entry = count_by_level
                .entry(ex.level.clone())
                .or_insert((0, 0, 0));
            match ex.source {
                ExerciseSource::LocalBank => entry.0 += 1,
                ExerciseSource::Generated => entry.1 += 1,
                ExerciseSource::Seed => entry.2 += 1,
            }
        }
        for (level, (bank, gen, seed)) in count_by_level {
            info!(target: "exercise", %level, local_bank = bank, generated = gen, seed = seed, "Startup exercise inventory");
        }

        // Build optional Claude client (if API key present).
        let claude = Claude::from_env();
        if let Some(c) = &claude {
            info!(target: "tudobem_backend", base_url = %c.base_url, fast_model = %c.fast_model, strong_model = %c.strong_model, "Claude enabled.");
        } else {
            info!(target: "tudobem_backend", "Claude disabled (no ANTHROPIC_API_KEY). Using local/seed logic.");
        }

        Self {
            by_id: Arc::new(RwLock::new(id_map)),
            by_level: Arc::new(RwLock::new(level_map)),
            last_by_level: Arc::new(RwLock::new(HashMap::new())),
            claude,
            prompts,
            filler_vocab,
        }
    }

    /// Insert exercise into stores (by_id and by_level).
    #[instrument(level = "debug", skip(self))]
    pub async fn insert_exercise(&self, ex: Exercise) {
        let mut by_id = self.by_id.write().await;
        let mut by_level = self.by_level.write().await;
        let id = ex.id.clone();
        let level = ex.level.clone();
        by_id.insert(id.clone(), ex);
        by_level.entry(level).or_default().push(id);
    }

    /// Selection policy:
    /// Generate a fresh exercise via Claude when available.
    /// Otherwise serve from the existing pool (avoiding the last-served item),
    /// then fall back hard.
    #[instrument(level = "info", skip(self), fields(%level, %topic))]
    pub async fn choose_exercise(&self, level: &str, topic: &str) -> (Exercise, &'static str) {
        if let Some(claude) = &self.claude {
            match claude.generate_exercise(&self.prompts, level, topic).await {
                Ok(ex) => {
                    let id = ex.id.clone();
                    self.insert_exercise(ex.clone()).await;
                    self.last_by_level
                        .write()
                        .await
                        .insert(level.to_string(), id.clone());
                    info!(target: "exercise", %level, chosen = %id, source = "claude_generated_new", "Generated fresh exercise");
                    return (ex, "claude_generated_new");
                }
                Err(e) => {
                    error!(target: "exercise", %level, error = %e, "Claude generation failed; trying existing pool");
                }
            }
        } else {
            warn!(target: "exercise", %level, "ANTHROPIC_API_KEY not set; trying existing pool then hard fallback");
        }

        // 2) If we already have exercises for this level (local bank or built-in
        // seeds), serve one of them before creating a new hard fallback.
        if let Some(ids) = { self.by_level.read().await.get(level).cloned() } {
            if !ids.is_empty() {
                let last = { self.last_by_level.read().await.get(level).cloned() };
                let chosen_id = if ids.len() == 1 {
                    ids[0].clone()
                } else if let Some(last_id) = last {
                    ids.iter()
                        .find(|id| *id != &last_id)
                        .cloned()
                        .unwrap_or_else(|| ids[0].clone())
                } else {
                    ids[0].clone()
                };

                if let Some(ex) = { self.by_id.read().await.get(&chosen_id).cloned() } {
                    self.last_by_level
                        .write()
                        .await
                        .insert(level.to_string(), chosen_id.clone());
                    warn!(target: "exercise", %level, chosen = %chosen_id, source = "existing_pool", "Serving existing exercise");
                    return (ex, "existing_pool");
                }
            }
        }

        // 3) Absolute last resort: hard fallback.
        let ex = hard_fallback_exercise(level.to_string());
        let id = ex.id.clone();
        self.insert_exercise(ex.clone()).await;
        self.last_by_level
            .write()
            .await
            .insert(level.to_string(), id.clone());
        warn!(target: "exercise", %level, chosen = %id, source = "hard_fallback", "Inserted hard fallback exercise");
        (ex, "hard_fallback")
    }

    /// Read-only access to an exercise by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_exercise(&self, id: &str) -> Option<Exercise> {
        let by_id = self.by_id.read().await;
        by_id.get(id).cloned()
    }
}
