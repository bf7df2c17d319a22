use actix_web::{web, HttpResponse, Result};

use crate::models::common::ApiResponse;
use crate::models::user::RegistrationRequest;
use crate::services::SessionManager;

pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let registration = session_manager
        .sign_up(&user_form.email, &user_form.password)
        .await?;

    let message = if registration.confirmation_required {
        "Registration successful! Check your email to confirm."
    } else {
        "Registration successful!"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(message, registration)))
}
