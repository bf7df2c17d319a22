use actix_web::{get, web, HttpResponse, Result};

use crate::handlers::result_handler;
use crate::middleware::auth::Claims;
use crate::models::match_result::PostResultRequest;
use crate::services::ResultService;

#[get("")]
async fn list_results(result_service: web::Data<ResultService>) -> Result<HttpResponse> {
    result_handler::list_results(result_service).await
}

pub async fn put_result(
    path: web::Path<String>,
    result_request: web::Json<PostResultRequest>,
    result_service: web::Data<ResultService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    result_handler::post_result(fixture_id, result_request, result_service, claims).await
}
