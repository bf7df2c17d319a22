use actix_web::{get, web, HttpResponse, Result};

use crate::handlers::leaderboard_handler;
use crate::scoring::ScoringEngine;

#[get("")]
async fn get_leaderboard(scoring_engine: web::Data<ScoringEngine>) -> Result<HttpResponse> {
    leaderboard_handler::get_leaderboard(scoring_engine).await
}
