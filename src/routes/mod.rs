use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod fixtures;
pub mod leaderboard;
pub mod predictions;
pub mod registration;
pub mod results;
pub mod session;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login)
        .service(auth::confirm_email)
        .service(fixtures::list_fixtures);

    // Session routes (require authentication)
    cfg.service(
        web::scope("/session")
            .wrap(AuthMiddleware)
            .service(session::current_session)
            .service(session::refresh_session)
            .service(session::logout)
    );
    // Prediction routes (require authentication)
    cfg.service(
        web::scope("/predictions")
            .wrap(AuthMiddleware)
            .service(predictions::submit_predictions)
            .service(predictions::my_predictions)
            .service(predictions::prediction_feed)
    );
    cfg.service(
        web::scope("/results")
            .wrap(AuthMiddleware)
            .service(results::list_results)
    );
    cfg.service(
        web::scope("/leaderboard")
            .wrap(AuthMiddleware)
            .service(leaderboard::get_leaderboard)
    );

    admin::init_admin_routes(cfg);
}
