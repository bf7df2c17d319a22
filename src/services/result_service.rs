use std::sync::Arc;
use chrono::Utc;

use crate::db::ResultStore;
use crate::errors::{RetrievalError, WriteError};
use crate::fixtures::FixtureCatalog;
use crate::models::match_result::{MatchResult, PostResultRequest};

pub struct ResultService {
    store: Arc<dyn ResultStore>,
    catalog: Arc<FixtureCatalog>,
}

impl ResultService {
    pub fn new(store: Arc<dyn ResultStore>, catalog: Arc<FixtureCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn list(&self) -> Result<Vec<MatchResult>, RetrievalError> {
        self.store
            .list_results()
            .await
            .map_err(|e| RetrievalError::new("results", e))
    }

    /// Record or correct the final score of a catalog fixture.
    #[tracing::instrument(name = "Post match result", skip(self, request))]
    pub async fn post_result(
        &self,
        fixture_id: &str,
        request: &PostResultRequest,
    ) -> Result<MatchResult, WriteError> {
        let fixture = self
            .catalog
            .get(fixture_id)
            .ok_or_else(|| WriteError::UnknownFixture(fixture_id.to_string()))?;

        if request.home_goals < 0 || request.away_goals < 0 {
            return Err(WriteError::Invalid("Goal counts cannot be negative".into()));
        }

        let result = MatchResult {
            fixture_id: fixture.id.clone(),
            home_team: fixture.home.clone(),
            away_team: fixture.away.clone(),
            home_goals: request.home_goals,
            away_goals: request.away_goals,
            updated_at: Utc::now(),
        };
        self.store
            .upsert_result(&result)
            .await
            .map_err(|e| WriteError::from_store("results", e))?;

        tracing::info!(
            "Result for {} set to {} - {}",
            result.fixture_id, result.home_goals, result.away_goals
        );
        Ok(result)
    }
}
