pub mod auth;
pub mod common;
pub mod fixture;
pub mod leaderboard;
pub mod match_result;
pub mod prediction;
pub mod user;
