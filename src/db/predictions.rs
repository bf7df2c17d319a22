use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::helpers::map_write_error;
use crate::db::PredictionStore;
use crate::errors::StoreError;
use crate::models::prediction::Prediction;

const PREDICTION_COLUMNS: &str = "id, user_id, fixture_id, match_date, home_team, away_team, home_goals, away_goals, created_at";

pub struct PgPredictionStore {
    pool: PgPool,
}

impl PgPredictionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionStore for PgPredictionStore {
    async fn insert_predictions(&self, predictions: &[Prediction]) -> Result<(), StoreError> {
        if predictions.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("INSERT INTO predictions ({}) ", PREDICTION_COLUMNS));
        builder.push_values(predictions, |mut row, prediction| {
            row.push_bind(prediction.id)
                .push_bind(prediction.user_id)
                .push_bind(prediction.fixture_id.clone())
                .push_bind(prediction.match_date)
                .push_bind(prediction.home_team.clone())
                .push_bind(prediction.away_team.clone())
                .push_bind(prediction.home_goals)
                .push_bind(prediction.away_goals)
                .push_bind(prediction.created_at);
        });

        builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert {} predictions: {:?}", predictions.len(), e);
                map_write_error(e)
            })?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_predictions(&self) -> Result<Vec<Prediction>, StoreError> {
        let predictions = sqlx::query_as::<_, Prediction>(&format!(
            "SELECT {} FROM predictions ORDER BY created_at ASC, seq ASC",
            PREDICTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(predictions)
    }

    async fn list_user_predictions(&self, user_id: Uuid) -> Result<Vec<Prediction>, StoreError> {
        let predictions = sqlx::query_as::<_, Prediction>(&format!(
            "SELECT {} FROM predictions WHERE user_id = $1 ORDER BY created_at DESC, seq DESC",
            PREDICTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(predictions)
    }
}
