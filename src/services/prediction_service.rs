use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::PredictionStore;
use crate::errors::{RetrievalError, WriteError};
use crate::fixtures::FixtureCatalog;
use crate::models::prediction::{GoalInputs, Prediction, PredictionFeedItem};
use crate::utils::goal_input::parse_goal_input;

/// Turns submitted form state into prediction rows.
pub struct PredictionService {
    store: Arc<dyn PredictionStore>,
    catalog: Arc<FixtureCatalog>,
}

impl PredictionService {
    pub fn new(store: Arc<dyn PredictionStore>, catalog: Arc<FixtureCatalog>) -> Self {
        Self { store, catalog }
    }

    /// One prediction per catalog fixture, all stamped with `now`.
    ///
    /// Fixtures missing from `form` are predicted 0 - 0.
    pub fn build_predictions(
        &self,
        user_id: Uuid,
        form: &HashMap<String, GoalInputs>,
        now: DateTime<Utc>,
    ) -> Vec<Prediction> {
        for fixture_id in form.keys() {
            if self.catalog.get(fixture_id).is_none() {
                tracing::debug!(fixture_id = %fixture_id, "Ignoring input for unknown fixture");
            }
        }

        self.catalog
            .fixtures()
            .iter()
            .map(|fixture| {
                let inputs = form.get(&fixture.id);
                Prediction {
                    id: Uuid::new_v4(),
                    user_id,
                    fixture_id: fixture.id.clone(),
                    match_date: fixture.date,
                    home_team: fixture.home.clone(),
                    away_team: fixture.away.clone(),
                    home_goals: parse_goal_input(inputs.and_then(|i| i.home.as_ref())),
                    away_goals: parse_goal_input(inputs.and_then(|i| i.away.as_ref())),
                    created_at: now,
                }
            })
            .collect()
    }

    #[tracing::instrument(name = "Submit predictions", skip(self, form))]
    pub async fn submit(
        &self,
        user_id: Uuid,
        form: &HashMap<String, GoalInputs>,
    ) -> Result<Vec<Prediction>, WriteError> {
        let predictions = self.build_predictions(user_id, form, Utc::now());
        self.store
            .insert_predictions(&predictions)
            .await
            .map_err(|e| WriteError::from_store("predictions", e))?;

        tracing::info!("Saved {} predictions", predictions.len());
        Ok(predictions)
    }

    /// Every user's predictions, newest first.
    pub async fn feed(&self) -> Result<Vec<PredictionFeedItem>, RetrievalError> {
        let predictions = self
            .store
            .list_predictions()
            .await
            .map_err(|e| RetrievalError::new("predictions", e))?;
        Ok(predictions.iter().rev().map(PredictionFeedItem::from).collect())
    }
}
