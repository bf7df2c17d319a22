// src/middleware/auth.rs
use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, StatusCode},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{json_error, AuthError};
use crate::models::user::UserRole;
use crate::services::SessionManager;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,    // Subject (user id)
    pub sid: Uuid,    // Session the token was issued for
    pub email: String,
    pub role: UserRole,
    pub iat: usize,
    pub exp: usize,   // Expiration time (as UTC timestamp)
}

fn session_manager(req: &ServiceRequest) -> Result<web::Data<SessionManager>, Error> {
    req.app_data::<web::Data<SessionManager>>()
        .cloned()
        .ok_or_else(|| json_error(StatusCode::INTERNAL_SERVER_ERROR, "Session manager not configured"))
}

/// Extract the bearer token and decode it, without touching the session store.
pub fn validate_jwt_from_request(req: &ServiceRequest) -> Result<Claims, Error> {
    let session_manager = session_manager(req)?;

    let auth_header = req.headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)?;

    session_manager.decode_token(token).map_err(|e| {
        tracing::info!("Failed to decode token: {:?}", e);
        Error::from(AuthError::InvalidToken)
    })
}

/// Decode the token and check that its session is still live.
pub async fn authenticate(req: &ServiceRequest) -> Result<Claims, Error> {
    let claims = validate_jwt_from_request(req)?;
    session_manager(req)?.ensure_active(&claims).await?;
    Ok(claims)
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let claims = authenticate(&req).await?;

            // Handlers read the claims through `web::ReqData<Claims>`
            req.extensions_mut().insert(claims);

            service.call(req).await
        })
    }
}
