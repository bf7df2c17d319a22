// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse, Result};

use crate::models::auth::{ConfirmEmailRequest, LoginRequest};
use crate::models::common::ApiResponse;
use crate::services::SessionManager;

pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let login = session_manager
        .sign_in(&login_form.email, &login_form.password)
        .await?;
    Ok(HttpResponse::Ok().json(login))
}

pub async fn confirm_email(
    confirm_form: web::Json<ConfirmEmailRequest>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let user = session_manager.confirm_email(&confirm_form.token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Email confirmed", user)))
}
