use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::prediction::SubmitPredictionsRequest;
use crate::scoring::ScoringEngine;
use crate::services::PredictionService;

/// Save one prediction per fixture, then answer with the recomputed leaderboard.
#[tracing::instrument(
    name = "Submit predictions request",
    skip(form, claims, prediction_service, scoring_engine),
    fields(user_id = %claims.sub)
)]
pub async fn submit_predictions(
    form: web::Json<SubmitPredictionsRequest>,
    claims: web::ReqData<Claims>,
    prediction_service: web::Data<PredictionService>,
    scoring_engine: web::Data<ScoringEngine>,
) -> Result<HttpResponse> {
    let saved = prediction_service
        .submit(claims.sub, &form.predictions)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save predictions: {}", e);
            e
        })?;

    // The write already succeeded, so a failed refresh only leaves the board out
    let leaderboard = match scoring_engine.leaderboard().await {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::error!("Failed to refresh leaderboard after submission: {}", e);
            None
        }
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Predictions saved successfully!",
        json!({
            "predictions": saved,
            "leaderboard": leaderboard
        }),
    )))
}

pub async fn my_predictions(
    claims: web::ReqData<Claims>,
    scoring_engine: web::Data<ScoringEngine>,
) -> Result<HttpResponse> {
    let history = scoring_engine.history(claims.sub).await.map_err(|e| {
        tracing::error!("Failed to load prediction history for {}: {}", claims.sub, e);
        e
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Prediction history", history)))
}

pub async fn prediction_feed(
    prediction_service: web::Data<PredictionService>,
) -> Result<HttpResponse> {
    let feed = prediction_service.feed().await.map_err(|e| {
        tracing::error!("Failed to load prediction feed: {}", e);
        e
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Predictions", feed)))
}
