pub mod prediction_service;
pub mod result_service;
pub mod session_manager;

pub use prediction_service::PredictionService;
pub use result_service::ResultService;
pub use session_manager::{SessionEvent, SessionManager};

use std::sync::Arc;

use crate::config::auth::SignUpPolicy;
use crate::config::jwt::JwtSettings;
use crate::config::scoring::ScoringSettings;
use crate::db::Stores;
use crate::fixtures::FixtureCatalog;
use crate::scoring::ScoringEngine;

/// Everything the HTTP layer needs, built once and handed to `run`.
pub struct AppServices {
    pub catalog: Arc<FixtureCatalog>,
    pub session_manager: SessionManager,
    pub prediction_service: PredictionService,
    pub result_service: ResultService,
    pub scoring_engine: ScoringEngine,
}

impl AppServices {
    pub fn new(
        stores: Stores,
        catalog: FixtureCatalog,
        jwt_settings: JwtSettings,
        sign_up_policy: SignUpPolicy,
        scoring_settings: ScoringSettings,
    ) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            session_manager: SessionManager::new(
                stores.users.clone(),
                stores.sessions.clone(),
                jwt_settings,
                sign_up_policy,
            ),
            prediction_service: PredictionService::new(stores.predictions.clone(), catalog.clone()),
            result_service: ResultService::new(stores.results.clone(), catalog.clone()),
            scoring_engine: ScoringEngine::new(
                stores.predictions,
                stores.results,
                stores.users,
                scoring_settings,
            ),
            catalog,
        }
    }
}
