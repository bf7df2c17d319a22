use serde::Deserialize;

/// How repeated predictions for the same fixture by the same user are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Only the most recent prediction per user and fixture counts.
    #[default]
    KeepLatest,
    /// Every stored prediction counts, duplicates included.
    SumAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_exact_score_points")]
    pub exact_score_points: i32,
    #[serde(default = "default_correct_outcome_points")]
    pub correct_outcome_points: i32,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

fn default_exact_score_points() -> i32 {
    5
}

fn default_correct_outcome_points() -> i32 {
    2
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            exact_score_points: default_exact_score_points(),
            correct_outcome_points: default_correct_outcome_points(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}
