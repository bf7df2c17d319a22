use actix_web::{get, post, web, HttpResponse, Result};

use crate::handlers::session_handler;
use crate::middleware::auth::Claims;
use crate::services::SessionManager;

/// Who the presented token belongs to
#[get("")]
async fn current_session(
    claims: web::ReqData<Claims>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    session_handler::current_session(claims, session_manager).await
}

#[post("/refresh")]
async fn refresh_session(
    claims: web::ReqData<Claims>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    session_handler::refresh_session(claims, session_manager).await
}

#[post("/logout")]
async fn logout(
    claims: web::ReqData<Claims>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    session_handler::logout(claims, session_manager).await
}
