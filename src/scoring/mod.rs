pub mod engine;
pub mod leaderboard;
pub mod points;

pub use engine::ScoringEngine;
pub use points::{score_prediction, Outcome};
