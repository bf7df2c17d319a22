pub mod auth_handler;
pub mod backend_health_handler;
pub mod fixture_handler;
pub mod leaderboard_handler;
pub mod prediction_handler;
pub mod registration_handler;
pub mod result_handler;
pub mod session_handler;
