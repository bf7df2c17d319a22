// src/routes/auth.rs
use actix_web::{post, web, HttpResponse, Result};

use crate::handlers::auth_handler;
use crate::models::auth::{ConfirmEmailRequest, LoginRequest};
use crate::services::SessionManager;

#[post("/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    auth_handler::login_user(login_form, session_manager).await
}

#[post("/confirm_email")]
async fn confirm_email(
    confirm_form: web::Json<ConfirmEmailRequest>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    auth_handler::confirm_email(confirm_form, session_manager).await
}
