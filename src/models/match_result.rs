use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::Scoreline;

/// Final score of a fixture.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
pub struct MatchResult {
    pub fixture_id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: i32,
    pub away_goals: i32,
    pub updated_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn scoreline(&self) -> Scoreline {
        Scoreline::new(self.home_goals, self.away_goals)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResultRequest {
    pub home_goals: i32,
    pub away_goals: i32,
}
