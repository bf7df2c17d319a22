use actix_web::{web, HttpResponse, Result};

use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::match_result::PostResultRequest;
use crate::services::ResultService;

pub async fn list_results(result_service: web::Data<ResultService>) -> Result<HttpResponse> {
    let results = result_service.list().await.map_err(|e| {
        tracing::error!("Failed to load results: {}", e);
        e
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Results", results)))
}

#[tracing::instrument(
    name = "Update match result",
    skip(result_request, result_service, claims),
    fields(admin_user = %claims.email)
)]
pub async fn post_result(
    fixture_id: String,
    result_request: web::Json<PostResultRequest>,
    result_service: web::Data<ResultService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let result = result_service
        .post_result(&fixture_id, &result_request)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Result saved", result)))
}
