use std::collections::HashMap;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::common::Scoreline;
use crate::models::fixture::match_label;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
pub struct Prediction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fixture_id: String,
    pub match_date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: i32,
    pub away_goals: i32,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn scoreline(&self) -> Scoreline {
        Scoreline::new(self.home_goals, self.away_goals)
    }
}

/// Raw goal inputs for one fixture as typed into the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalInputs {
    #[serde(default)]
    pub home: Option<Value>,
    #[serde(default)]
    pub away: Option<Value>,
}

/// Form state keyed by fixture id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitPredictionsRequest {
    #[serde(default)]
    pub predictions: HashMap<String, GoalInputs>,
}

/// A row of a user's own history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPrediction {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub result: Option<Scoreline>,
    pub points: i32,
    /// False when a newer prediction for the same fixture supersedes this one.
    pub counted: bool,
}

/// A row of the public prediction feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFeedItem {
    pub user: String,
    pub fixture_id: String,
    pub fixture: String,
    pub prediction: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Prediction> for PredictionFeedItem {
    fn from(prediction: &Prediction) -> Self {
        let user_id = prediction.user_id.to_string();
        Self {
            user: user_id[..8].to_string(),
            fixture_id: prediction.fixture_id.clone(),
            fixture: match_label(&prediction.home_team, &prediction.away_team),
            prediction: prediction.scoreline().to_string(),
            created_at: prediction.created_at,
        }
    }
}
