//! Table stores behind the services.
//!
//! Each table is reached through a trait so the same services run against
//! Postgres in production and against [`memory::InMemoryStore`] locally and
//! in tests.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::auth::Session;
use crate::models::match_result::MatchResult;
use crate::models::prediction::Prediction;
use crate::models::user::User;

pub mod helpers;
pub mod memory;
pub mod predictions;
pub mod results;
pub mod sessions;
pub mod users;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the e-mail is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError>;
    /// Mark the user holding `token` as confirmed and clear the token.
    async fn confirm_email(&self, token: &str, at: DateTime<Utc>) -> Result<Option<User>, StoreError>;
    async fn emails_for(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, session: &Session) -> Result<(), StoreError>;
    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, StoreError>;
    /// Returns false when the session is unknown or already revoked.
    async fn touch_session(&self, session_id: Uuid, at: DateTime<Utc>) -> Result<bool, StoreError>;
    /// Returns false when the session is unknown or already revoked.
    async fn revoke_session(&self, session_id: Uuid, at: DateTime<Utc>) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// All rows land or none do.
    async fn insert_predictions(&self, predictions: &[Prediction]) -> Result<(), StoreError>;
    /// Every prediction, oldest first.
    async fn list_predictions(&self) -> Result<Vec<Prediction>, StoreError>;
    /// One user's predictions, newest first.
    async fn list_user_predictions(&self, user_id: Uuid) -> Result<Vec<Prediction>, StoreError>;
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn list_results(&self) -> Result<Vec<MatchResult>, StoreError>;
    /// Insert or replace the result of `result.fixture_id`.
    async fn upsert_result(&self, result: &MatchResult) -> Result<(), StoreError>;
}

/// Handles on every table, created once at startup and shared.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub predictions: Arc<dyn PredictionStore>,
    pub results: Arc<dyn ResultStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(users::PgUserStore::new(pool.clone())),
            sessions: Arc::new(sessions::PgSessionStore::new(pool.clone())),
            predictions: Arc::new(predictions::PgPredictionStore::new(pool.clone())),
            results: Arc::new(results::PgResultStore::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(memory::InMemoryStore::default());
        Self {
            users: store.clone(),
            sessions: store.clone(),
            predictions: store.clone(),
            results: store,
        }
    }
}
