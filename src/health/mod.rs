//! Financial health scoring

mod score;

pub use score::{score_health, HealthComponent, HealthScoreInput, HealthScoreResult, LetterGrade};
