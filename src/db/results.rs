use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::helpers::map_write_error;
use crate::db::ResultStore;
use crate::errors::StoreError;
use crate::models::match_result::MatchResult;

pub struct PgResultStore {
    pool: PgPool,
}

impl PgResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn list_results(&self) -> Result<Vec<MatchResult>, StoreError> {
        let results = sqlx::query_as::<_, MatchResult>(
            r#"
            SELECT fixture_id, home_team, away_team, home_goals, away_goals, updated_at
            FROM results
            ORDER BY fixture_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(results)
    }

    async fn upsert_result(&self, result: &MatchResult) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO results (fixture_id, home_team, away_team, home_goals, away_goals, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (fixture_id) DO UPDATE SET
                home_team = EXCLUDED.home_team,
                away_team = EXCLUDED.away_team,
                home_goals = EXCLUDED.home_goals,
                away_goals = EXCLUDED.away_goals,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&result.fixture_id)
        .bind(&result.home_team)
        .bind(&result.away_team)
        .bind(result.home_goals)
        .bind(result.away_goals)
        .bind(result.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert result for {}: {:?}", result.fixture_id, e);
            map_write_error(e)
        })?;
        Ok(())
    }
}
