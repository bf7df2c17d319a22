use actix_web::{web, HttpResponse, Result};

use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::services::SessionManager;

pub async fn current_session(
    claims: web::ReqData<Claims>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    match session_manager.current_user(&claims).await? {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success("Signed in", user))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("User not found"))),
    }
}

pub async fn refresh_session(
    claims: web::ReqData<Claims>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let refreshed = session_manager.refresh(&claims).await?;
    Ok(HttpResponse::Ok().json(refreshed))
}

pub async fn logout(
    claims: web::ReqData<Claims>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    session_manager.sign_out(&claims).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Signed out")))
}
