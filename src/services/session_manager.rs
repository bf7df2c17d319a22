use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::auth::SignUpPolicy;
use crate::config::jwt::JwtSettings;
use crate::db::{SessionStore, UserStore};
use crate::errors::{AuthError, StoreError};
use crate::middleware::auth::Claims;
use crate::models::auth::{LoginResponse, Session, TokenResponse};
use crate::models::user::{RegistrationResponse, SessionUser, User, UserRole};
use crate::utils::password::{hash_password, verify_password, verify_unknown_user};

const MIN_PASSWORD_LENGTH: usize = 6;
const EVENT_BUFFER: usize = 64;

/// Notifications fired whenever a session changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedUp { user_id: Uuid },
    SignedIn { user_id: Uuid, session_id: Uuid },
    SignedOut { user_id: Uuid, session_id: Uuid },
    TokenRefreshed { user_id: Uuid, session_id: Uuid },
}

/// Sign-up, sign-in, sign-out and token refresh on top of the account stores.
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    jwt_settings: JwtSettings,
    policy: SignUpPolicy,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        jwt_settings: JwtSettings,
        policy: SignUpPolicy,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            users,
            sessions,
            jwt_settings,
            policy,
            events,
        }
    }

    /// Receive every future [`SessionEvent`]. Lagging receivers skip old events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: SessionEvent) {
        // Having no subscriber is fine
        let _ = self.events.send(event);
    }

    #[tracing::instrument(
        name = "Adding a new user",
        skip(self, email, password),
        fields(email = %email)
    )]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<RegistrationResponse, AuthError> {
        let email = normalize_email(email)?;
        validate_password(password)?;

        let now = Utc::now();
        let confirmation_token = self
            .policy
            .require_email_confirmation
            .then(generate_confirmation_token);
        let role = if self.policy.is_admin_email(&email) {
            UserRole::Admin
        } else {
            UserRole::User
        };

        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: hash_password(password.expose_secret())?,
            role,
            email_confirmed_at: if confirmation_token.is_some() { None } else { Some(now) },
            confirmation_token: confirmation_token.clone(),
            created_at: now,
            updated_at: now,
        };

        match self.users.insert_user(&user).await {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                tracing::info!("Email already registered");
                return Err(AuthError::EmailTaken);
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(token) = &confirmation_token {
            // No mailer is wired in; operators hand the token out manually
            tracing::info!(user_id = %user.id, confirmation_token = %token, "Confirmation token issued");
        }
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        self.publish(SessionEvent::SignedUp { user_id: user.id });

        Ok(RegistrationResponse {
            user: SessionUser::from(&user),
            confirmation_required: confirmation_token.is_some(),
        })
    }

    #[tracing::instrument(name = "Confirm email", skip(self, token))]
    pub async fn confirm_email(&self, token: &str) -> Result<SessionUser, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidConfirmationToken);
        }
        match self.users.confirm_email(token, Utc::now()).await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, "Email confirmed");
                Ok(SessionUser::from(&user))
            }
            None => Err(AuthError::InvalidConfirmationToken),
        }
    }

    #[tracing::instrument(
        name = "Login user attempt",
        skip(self, email, password),
        fields(email = %email)
    )]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AuthError> {
        let user = match normalize_email(email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };
        let Some(user) = user else {
            verify_unknown_user(password.expose_secret());
            tracing::info!("User not found or invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password.expose_secret(), &user.password_hash) {
            tracing::info!("Invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_confirmed() {
            return Err(AuthError::EmailNotConfirmed);
        }

        let session = Session::new(user.id, Utc::now());
        self.sessions.insert_session(&session).await?;
        let token = self.issue_token(&user, session.id)?;

        self.publish(SessionEvent::SignedIn {
            user_id: user.id,
            session_id: session.id,
        });

        Ok(LoginResponse {
            token,
            user: SessionUser::from(&user),
        })
    }

    #[tracing::instrument(name = "Logout user", skip(self, claims), fields(user_id = %claims.sub))]
    pub async fn sign_out(&self, claims: &Claims) -> Result<(), AuthError> {
        if !self.sessions.revoke_session(claims.sid, Utc::now()).await? {
            return Err(AuthError::SessionRevoked);
        }
        self.publish(SessionEvent::SignedOut {
            user_id: claims.sub,
            session_id: claims.sid,
        });
        Ok(())
    }

    /// Issue a fresh token for the session the presented token belongs to.
    #[tracing::instrument(name = "Refresh token", skip(self, claims), fields(user_id = %claims.sub))]
    pub async fn refresh(&self, claims: &Claims) -> Result<TokenResponse, AuthError> {
        if !self.sessions.touch_session(claims.sid, Utc::now()).await? {
            return Err(AuthError::SessionRevoked);
        }
        let Some(user) = self.users.find_by_id(claims.sub).await? else {
            return Err(AuthError::SessionRevoked);
        };

        let token = self.issue_token(&user, claims.sid)?;
        self.publish(SessionEvent::TokenRefreshed {
            user_id: user.id,
            session_id: claims.sid,
        });
        Ok(TokenResponse { token })
    }

    pub async fn current_user(&self, claims: &Claims) -> Result<Option<SessionUser>, AuthError> {
        let user = self.users.find_by_id(claims.sub).await?;
        Ok(user.as_ref().map(SessionUser::from))
    }

    /// Reject tokens whose session was revoked or belongs to someone else.
    pub async fn ensure_active(&self, claims: &Claims) -> Result<(), AuthError> {
        match self.sessions.find_session(claims.sid).await? {
            Some(session) if session.is_active() && session.user_id == claims.sub => Ok(()),
            _ => Err(AuthError::SessionRevoked),
        }
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(token_data.claims)
    }

    fn issue_token(&self, user: &User, session_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt_settings.expiration_hours);

        let claims = Claims {
            sub: user.id,
            sid: session_id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("Error generating JWT token: {:?}", e);
            e
        })?;
        Ok(token)
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid || email.len() > 254 {
        return Err(AuthError::InvalidInput("A valid email address is required".into()));
    }
    Ok(email)
}

fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn generate_confirmation_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Stores;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string().into_boxed_str())
    }

    fn manager(policy: SignUpPolicy) -> SessionManager {
        let stores = Stores::in_memory();
        SessionManager::new(
            stores.users,
            stores.sessions,
            JwtSettings::new("test-secret".to_string(), 1),
            policy,
        )
    }

    #[test]
    fn emails_are_normalized_and_checked() {
        assert_eq!(normalize_email("  Fan@Example.COM ").unwrap(), "fan@example.com");
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("a@b@c").is_err());
    }

    #[tokio::test]
    async fn sign_in_after_sign_up_yields_decodable_token() {
        let manager = manager(SignUpPolicy::default());
        manager.sign_up("fan@example.com", &secret("password123")).await.unwrap();

        let login = manager.sign_in("fan@example.com", &secret("password123")).await.unwrap();
        let claims = manager.decode_token(&login.token).unwrap();

        assert_eq!(claims.sub, login.user.id);
        assert_eq!(claims.email, "fan@example.com");
        assert!(manager.ensure_active(&claims).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let manager = manager(SignUpPolicy::default());
        manager.sign_up("fan@example.com", &secret("password123")).await.unwrap();

        let err = manager.sign_up("FAN@example.com", &secret("password123")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn short_passwords_are_rejected() {
        let manager = manager(SignUpPolicy::default());
        let err = manager.sign_up("fan@example.com", &secret("12345")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let manager = manager(SignUpPolicy::default());
        manager.sign_up("fan@example.com", &secret("password123")).await.unwrap();

        let err = manager.sign_in("fan@example.com", &secret("password124")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sign_in_folds_email_case_before_lookup() {
        let manager = manager(SignUpPolicy::default());
        manager.sign_up("Émile@Example.com", &secret("password123")).await.unwrap();

        let login = manager.sign_in("  ÉMILE@EXAMPLE.COM", &secret("password123")).await.unwrap();
        assert_eq!(login.user.email, "émile@example.com");
    }

    #[tokio::test]
    async fn unknown_and_malformed_emails_are_invalid_credentials() {
        let manager = manager(SignUpPolicy::default());

        let unknown = manager.sign_in("nobody@example.com", &secret("password123")).await.unwrap_err();
        let malformed = manager.sign_in("not-an-email", &secret("password123")).await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(malformed, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn admin_emails_get_admin_role() {
        let manager = manager(SignUpPolicy {
            admin_emails: vec!["Admin@Example.com".to_string()],
            require_email_confirmation: false,
        });
        let admin = manager.sign_up("admin@example.com", &secret("password123")).await.unwrap();
        let fan = manager.sign_up("fan@example.com", &secret("password123")).await.unwrap();

        assert_eq!(admin.user.role, UserRole::Admin);
        assert_eq!(fan.user.role, UserRole::User);
    }

    #[tokio::test]
    async fn unconfirmed_accounts_cannot_sign_in() {
        let stores = Stores::in_memory();
        let manager = SessionManager::new(
            stores.users.clone(),
            stores.sessions,
            JwtSettings::new("test-secret".to_string(), 1),
            SignUpPolicy {
                admin_emails: vec![],
                require_email_confirmation: true,
            },
        );
        let registered = manager.sign_up("fan@example.com", &secret("password123")).await.unwrap();
        assert!(registered.confirmation_required);

        let err = manager.sign_in("fan@example.com", &secret("password123")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailNotConfirmed));

        let token = stores
            .users
            .find_by_email("fan@example.com")
            .await
            .unwrap()
            .and_then(|u| u.confirmation_token)
            .expect("token stored");
        manager.confirm_email(&token).await.unwrap();
        assert!(manager.sign_in("fan@example.com", &secret("password123")).await.is_ok());

        let err = manager.confirm_email(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidConfirmationToken));
    }

    #[tokio::test]
    async fn sign_out_revokes_the_session_and_notifies() {
        let manager = manager(SignUpPolicy::default());
        let mut events = manager.subscribe();
        manager.sign_up("fan@example.com", &secret("password123")).await.unwrap();
        let login = manager.sign_in("fan@example.com", &secret("password123")).await.unwrap();
        let claims = manager.decode_token(&login.token).unwrap();

        manager.sign_out(&claims).await.unwrap();

        assert!(matches!(manager.ensure_active(&claims).await, Err(AuthError::SessionRevoked)));
        assert!(matches!(manager.refresh(&claims).await, Err(AuthError::SessionRevoked)));

        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedUp { user_id: login.user.id });
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::SignedIn { user_id: login.user.id, session_id: claims.sid }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::SignedOut { user_id: login.user.id, session_id: claims.sid }
        );
    }

    #[tokio::test]
    async fn refresh_keeps_the_session() {
        let manager = manager(SignUpPolicy::default());
        manager.sign_up("fan@example.com", &secret("password123")).await.unwrap();
        let login = manager.sign_in("fan@example.com", &secret("password123")).await.unwrap();
        let claims = manager.decode_token(&login.token).unwrap();

        let refreshed = manager.refresh(&claims).await.unwrap();
        let refreshed_claims = manager.decode_token(&refreshed.token).unwrap();

        assert_eq!(refreshed_claims.sid, claims.sid);
        assert_eq!(refreshed_claims.sub, claims.sub);
    }
}
