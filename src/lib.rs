use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod utils;
pub mod middleware;
pub mod db;
pub mod errors;
pub mod fixtures;
pub mod scoring;
pub mod services;
pub mod telemetry;
use crate::errors::json_payload_error;
use crate::routes::init_routes;
use crate::services::AppServices;

pub fn run(
    listener: TcpListener,
    services: AppServices,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let catalog = web::Data::from(services.catalog);
    let session_manager = web::Data::new(services.session_manager);
    let prediction_service = web::Data::new(services.prediction_service);
    let result_service = web::Data::new(services.result_service);
    let scoring_engine = web::Data::new(services.scoring_engine);

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::JsonConfig::default().error_handler(json_payload_error))
            .app_data(catalog.clone())
            .app_data(session_manager.clone())
            .app_data(prediction_service.clone())
            .app_data(result_service.clone())
            .app_data(scoring_engine.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
