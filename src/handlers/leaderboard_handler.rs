use actix_web::{web, HttpResponse, Result};

use crate::models::common::ApiResponse;
use crate::scoring::ScoringEngine;

pub async fn get_leaderboard(scoring_engine: web::Data<ScoringEngine>) -> Result<HttpResponse> {
    let entries = scoring_engine.leaderboard().await.map_err(|e| {
        tracing::error!("Error fetching leaderboard: {}", e);
        e
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Leaderboard", entries)))
}
