use actix_web::{get, post, web, HttpResponse, Result};

use crate::handlers::prediction_handler;
use crate::middleware::auth::Claims;
use crate::models::prediction::SubmitPredictionsRequest;
use crate::scoring::ScoringEngine;
use crate::services::PredictionService;

/// Submit the prediction form
#[post("")]
async fn submit_predictions(
    form: web::Json<SubmitPredictionsRequest>,
    claims: web::ReqData<Claims>,
    prediction_service: web::Data<PredictionService>,
    scoring_engine: web::Data<ScoringEngine>,
) -> Result<HttpResponse> {
    prediction_handler::submit_predictions(form, claims, prediction_service, scoring_engine).await
}

/// Own predictions with points
#[get("/me")]
async fn my_predictions(
    claims: web::ReqData<Claims>,
    scoring_engine: web::Data<ScoringEngine>,
) -> Result<HttpResponse> {
    prediction_handler::my_predictions(claims, scoring_engine).await
}

/// Everyone's predictions, newest first
#[get("")]
async fn prediction_feed(
    prediction_service: web::Data<PredictionService>,
) -> Result<HttpResponse> {
    prediction_handler::prediction_feed(prediction_service).await
}
