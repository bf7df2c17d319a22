use actix_web::{get, web, HttpResponse};

use crate::fixtures::FixtureCatalog;
use crate::handlers::fixture_handler;

#[get("/fixtures")]
async fn list_fixtures(catalog: web::Data<FixtureCatalog>) -> HttpResponse {
    fixture_handler::list_fixtures(catalog).await
}
