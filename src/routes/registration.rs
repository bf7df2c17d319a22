use actix_web::{post, web, HttpResponse, Result};

use crate::handlers::registration_handler::register_user;
use crate::models::user::RegistrationRequest;
use crate::services::SessionManager;

#[post("/register_user")]
async fn register(
    user_form: web::Json<RegistrationRequest>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    register_user(user_form, session_manager).await
}
