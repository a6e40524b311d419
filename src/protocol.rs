//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Exercise, ExerciseSource};

/// DTO used for exercise delivery. The expected answer stays server-side;
/// checking happens through `/api/v1/answer`.
#[derive(Debug, Serialize)]
pub struct ExerciseOut {
    pub id: String,
    pub level: String,
    pub topic: String,
    pub source: ExerciseSource,

    pub sentence: String,
    pub translation_en: String,
    pub hint: Option<String>,
}

/// Convert full `Exercise` (internal) to the public DTO.
pub fn to_out(ex: &Exercise) -> ExerciseOut {
    ExerciseOut {
        id: ex.id.clone(),
        level: ex.level.clone(),
        topic: ex.topic.clone(),
        source: ex.source.clone(),

        sentence: ex.sentence.clone(),
        translation_en: ex.translation_en.clone(),
        hint: ex.hint.clone(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    pub level: Option<String>,
    pub topic: Option<String>,
}

#[derive(Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "exerciseId")]
    pub exercise_id: String,
    pub answer: String,
}
#[derive(Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub expected: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    #[serde(rename = "exerciseId")]
    pub exercise_id: String,
}
#[derive(Serialize)]
pub struct OptionsOut {
    #[serde(rename = "exerciseId")]
    pub exercise_id: String,
    pub options: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
