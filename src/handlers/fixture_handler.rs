use actix_web::{web, HttpResponse};

use crate::fixtures::FixtureCatalog;
use crate::models::common::ApiResponse;

pub async fn list_fixtures(catalog: web::Data<FixtureCatalog>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("Fixtures", catalog.fixtures()))
}
