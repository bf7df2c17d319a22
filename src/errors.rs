use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failure reported by a table store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record already exists: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("A user with this email is already registered")]
    EmailTaken,
    #[error("Email address has not been confirmed")]
    EmailNotConfirmed,
    #[error("Invalid or already used confirmation token")]
    InvalidConfirmationToken,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Session is no longer active")]
    SessionRevoked,
    #[error("Insufficient privileges")]
    Forbidden,
    #[error("Failed to issue token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Failed to hash password: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("Account store failure: {0}")]
    Store(#[from] StoreError),
}

/// A table read failed. Nothing is retried.
#[derive(Debug, Error)]
#[error("Failed to retrieve {table}: {source}")]
pub struct RetrievalError {
    pub table: &'static str,
    #[source]
    pub source: StoreError,
}

impl RetrievalError {
    pub fn new(table: &'static str, source: StoreError) -> Self {
        Self { table, source }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{0}")]
    Invalid(String),
    #[error("Write rejected: {0}")]
    Rejected(String),
    #[error("Unknown fixture: {0}")]
    UnknownFixture(String),
    #[error("Failed to write {table}: {source}")]
    Store {
        table: &'static str,
        #[source]
        source: StoreError,
    },
}

impl WriteError {
    pub fn from_store(table: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::Conflict(message) => WriteError::Rejected(message),
            source => WriteError::Store { table, source },
        }
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "success": false,
        "message": message.into()
    }))
}

/// An error outside the typed enums, rendered with the same JSON body.
pub fn json_error(status: StatusCode, message: &'static str) -> actix_web::Error {
    InternalError::from_response(message, error_body(status, message)).into()
}

/// Body extractor failures, e.g. malformed JSON or a missing field.
pub fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected request body: {}", err);
    let status = err.status_code();
    let message = format!("Invalid request body: {}", err);
    InternalError::from_response(err, error_body(status, message)).into()
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::SessionRevoked => StatusCode::UNAUTHORIZED,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::EmailNotConfirmed | AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::InvalidConfirmationToken | AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::Token(_) | AuthError::Hashing(_) | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            return error_body(status, "Internal server error");
        }
        error_body(status, self.to_string())
    }
}

impl ResponseError for RetrievalError {
    fn status_code(&self) -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    fn error_response(&self) -> HttpResponse {
        error_body(self.status_code(), format!("Failed to retrieve {}", self.table))
    }
}

impl ResponseError for WriteError {
    fn status_code(&self) -> StatusCode {
        match self {
            WriteError::Invalid(_) => StatusCode::BAD_REQUEST,
            WriteError::Rejected(_) => StatusCode::CONFLICT,
            WriteError::UnknownFixture(_) => StatusCode::NOT_FOUND,
            WriteError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            WriteError::Store { table, .. } => {
                error_body(self.status_code(), format!("Failed to save {}", table))
            }
            _ => error_body(self.status_code(), self.to_string()),
        }
    }
}
