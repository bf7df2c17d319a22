use std::collections::{HashMap, HashSet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{PredictionStore, ResultStore, SessionStore, UserStore};
use crate::errors::StoreError;
use crate::models::auth::Session;
use crate::models::match_result::MatchResult;
use crate::models::prediction::Prediction;
use crate::models::user::User;

/// Process-local tables with the same contracts as the Postgres stores.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    sessions: RwLock<HashMap<Uuid, Session>>,
    // Insertion order doubles as the tie-break for equal timestamps
    predictions: RwLock<Vec<Prediction>>,
    results: RwLock<Vec<MatchResult>>,
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.to_lowercase() == user.email.to_lowercase()) {
            return Err(StoreError::Conflict(format!("email {} already registered", user.email)));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        let email = email.to_lowercase();
        Ok(users.iter().find(|u| u.email.to_lowercase() == email).cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn confirm_email(&self, token: &str, at: DateTime<Utc>) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users
            .iter_mut()
            .find(|u| u.confirmation_token.as_deref() == Some(token))
        else {
            return Ok(None);
        };
        user.email_confirmed_at = Some(at);
        user.confirmation_token = None;
        user.updated_at = at;
        Ok(Some(user.clone()))
    }

    async fn emails_for(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| user_ids.contains(&u.id))
            .map(|u| (u.id, u.email.clone()))
            .collect())
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn insert_session(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(StoreError::Conflict(format!("session {} exists", session.id)));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn touch_session(&self, session_id: Uuid, at: DateTime<Utc>) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session_id) {
            Some(session) if session.is_active() => {
                session.refreshed_at = at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_session(&self, session_id: Uuid, at: DateTime<Utc>) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session_id) {
            Some(session) if session.is_active() => {
                session.revoked_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl PredictionStore for InMemoryStore {
    async fn insert_predictions(&self, predictions: &[Prediction]) -> Result<(), StoreError> {
        let mut stored = self.predictions.write().await;
        let mut seen = HashSet::new();
        if let Some(duplicate) = predictions
            .iter()
            .find(|p| !seen.insert(p.id) || stored.iter().any(|s| s.id == p.id))
        {
            return Err(StoreError::Conflict(format!("prediction {} exists", duplicate.id)));
        }
        stored.extend_from_slice(predictions);
        Ok(())
    }

    async fn list_predictions(&self) -> Result<Vec<Prediction>, StoreError> {
        let mut predictions = self.predictions.read().await.clone();
        // Stable, so equal timestamps keep insertion order
        predictions.sort_by_key(|p| p.created_at);
        Ok(predictions)
    }

    async fn list_user_predictions(&self, user_id: Uuid) -> Result<Vec<Prediction>, StoreError> {
        let mut predictions: Vec<Prediction> = self
            .predictions
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        predictions.sort_by_key(|p| p.created_at);
        predictions.reverse();
        Ok(predictions)
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    async fn list_results(&self) -> Result<Vec<MatchResult>, StoreError> {
        let mut results = self.results.read().await.clone();
        results.sort_by(|a, b| a.fixture_id.cmp(&b.fixture_id));
        Ok(results)
    }

    async fn upsert_result(&self, result: &MatchResult) -> Result<(), StoreError> {
        let mut results = self.results.write().await;
        match results.iter_mut().find(|r| r.fixture_id == result.fixture_id) {
            Some(existing) => *existing = result.clone(),
            None => results.push(result.clone()),
        }
        Ok(())
    }
}
