use std::sync::Arc;
use uuid::Uuid;

use crate::config::scoring::ScoringSettings;
use crate::db::{PredictionStore, ResultStore, UserStore};
use crate::errors::RetrievalError;
use crate::models::leaderboard::LeaderboardEntry;
use crate::models::prediction::ScoredPrediction;
use crate::scoring::leaderboard::{counted_prediction_ids, rank, results_by_fixture, tally};
use crate::scoring::points::score_prediction;

/// Recomputes scores from full table reads on every call.
pub struct ScoringEngine {
    predictions: Arc<dyn PredictionStore>,
    results: Arc<dyn ResultStore>,
    users: Arc<dyn UserStore>,
    settings: ScoringSettings,
}

impl ScoringEngine {
    pub fn new(
        predictions: Arc<dyn PredictionStore>,
        results: Arc<dyn ResultStore>,
        users: Arc<dyn UserStore>,
        settings: ScoringSettings,
    ) -> Self {
        Self {
            predictions,
            results,
            users,
            settings,
        }
    }

    #[tracing::instrument(name = "Compute leaderboard", skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, RetrievalError> {
        // Two independent reads; they may see different snapshots
        let (predictions, results) = tokio::try_join!(
            async {
                self.predictions
                    .list_predictions()
                    .await
                    .map_err(|e| RetrievalError::new("predictions", e))
            },
            async {
                self.results
                    .list_results()
                    .await
                    .map_err(|e| RetrievalError::new("results", e))
            },
        )?;

        let scores = tally(&predictions, &results_by_fixture(&results), &self.settings);
        let user_ids: Vec<Uuid> = scores.iter().map(|score| score.user_id).collect();
        let emails = self
            .users
            .emails_for(&user_ids)
            .await
            .map_err(|e| RetrievalError::new("users", e))?;

        tracing::debug!(
            "Scored {} predictions for {} users",
            predictions.len(),
            user_ids.len()
        );
        Ok(rank(scores, &emails))
    }

    /// A user's predictions, newest first, each with the points it earned.
    #[tracing::instrument(name = "Compute prediction history", skip(self))]
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<ScoredPrediction>, RetrievalError> {
        let (predictions, results) = tokio::try_join!(
            async {
                self.predictions
                    .list_user_predictions(user_id)
                    .await
                    .map_err(|e| RetrievalError::new("predictions", e))
            },
            async {
                self.results
                    .list_results()
                    .await
                    .map_err(|e| RetrievalError::new("results", e))
            },
        )?;

        let results = results_by_fixture(&results);
        let counted = counted_prediction_ids(&predictions, self.settings.duplicate_policy);

        Ok(predictions
            .into_iter()
            .map(|prediction| {
                let result = results.get(prediction.fixture_id.as_str()).copied();
                let counted = counted.contains(&prediction.id);
                let points = if counted {
                    score_prediction(prediction.scoreline(), result, &self.settings)
                } else {
                    0
                };
                ScoredPrediction {
                    prediction,
                    result,
                    points,
                    counted,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use async_trait::async_trait;
    use crate::db::Stores;
    use crate::errors::StoreError;
    use crate::fixtures::FixtureCatalog;
    use crate::models::match_result::{MatchResult, PostResultRequest};
    use crate::services::prediction_service::PredictionService;
    use crate::services::result_service::ResultService;
    use serde_json::json;
    use crate::models::prediction::GoalInputs;

    const SAO_PAULO: &str = "2025-03-02-sao-paulo-bragantino";

    struct FailingResults;

    #[async_trait]
    impl ResultStore for FailingResults {
        async fn list_results(&self) -> Result<Vec<MatchResult>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn upsert_result(&self, _result: &MatchResult) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    fn form(home: i32, away: i32) -> HashMap<String, GoalInputs> {
        HashMap::from([(
            SAO_PAULO.to_string(),
            GoalInputs { home: Some(json!(home)), away: Some(json!(away)) },
        )])
    }

    #[tokio::test]
    async fn leaderboard_reflects_posted_results() {
        let stores = Stores::in_memory();
        let catalog = Arc::new(FixtureCatalog::builtin());
        let submissions = PredictionService::new(stores.predictions.clone(), catalog.clone());
        let results = ResultService::new(stores.results.clone(), catalog);
        let engine = ScoringEngine::new(
            stores.predictions.clone(),
            stores.results.clone(),
            stores.users.clone(),
            ScoringSettings::default(),
        );

        let exact = Uuid::new_v4();
        let outcome = Uuid::new_v4();
        submissions.submit(outcome, &form(3, 1)).await.unwrap();
        submissions.submit(exact, &form(2, 1)).await.unwrap();
        results
            .post_result(SAO_PAULO, &PostResultRequest { home_goals: 2, away_goals: 1 })
            .await
            .unwrap();

        let board = engine.leaderboard().await.unwrap();

        assert_eq!(board.len(), 2);
        assert_eq!((board[0].user_id, board[0].points, board[0].rank), (exact, 5, 1));
        assert_eq!((board[1].user_id, board[1].points, board[1].rank), (outcome, 2, 2));
        assert_eq!(board[0].predictions, 3);
    }

    #[tokio::test]
    async fn history_marks_superseded_rows() {
        let stores = Stores::in_memory();
        let catalog = Arc::new(FixtureCatalog::builtin());
        let submissions = PredictionService::new(stores.predictions.clone(), catalog.clone());
        let results = ResultService::new(stores.results.clone(), catalog);
        let engine = ScoringEngine::new(
            stores.predictions.clone(),
            stores.results.clone(),
            stores.users.clone(),
            ScoringSettings::default(),
        );

        let user = Uuid::new_v4();
        submissions.submit(user, &form(2, 1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        submissions.submit(user, &form(0, 0)).await.unwrap();
        results
            .post_result(SAO_PAULO, &PostResultRequest { home_goals: 2, away_goals: 1 })
            .await
            .unwrap();

        let history = engine.history(user).await.unwrap();
        let sao_paulo: Vec<&ScoredPrediction> = history
            .iter()
            .filter(|row| row.prediction.fixture_id == SAO_PAULO)
            .collect();

        assert_eq!(history.len(), 6);
        assert_eq!(sao_paulo.len(), 2);
        assert!(sao_paulo[0].counted);
        assert_eq!(sao_paulo[0].points, 0);
        assert!(!sao_paulo[1].counted);
        assert_eq!(sao_paulo[1].points, 0);
        assert_eq!(sao_paulo[1].result.map(|r| r.home_goals), Some(2));
    }

    #[tokio::test]
    async fn failed_reads_surface_as_retrieval_errors() {
        let stores = Stores::in_memory();
        let engine = ScoringEngine::new(
            stores.predictions,
            Arc::new(FailingResults),
            stores.users,
            ScoringSettings::default(),
        );

        let err = engine.leaderboard().await.unwrap_err();
        assert_eq!(err.table, "results");
    }
}
