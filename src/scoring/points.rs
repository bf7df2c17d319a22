use std::cmp::Ordering;
use serde::Serialize;

use crate::config::scoring::ScoringSettings;
use crate::models::common::Scoreline;

/// Sign of the goal difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl Outcome {
    pub fn of(score: Scoreline) -> Self {
        match score.home_goals.cmp(&score.away_goals) {
            Ordering::Greater => Outcome::HomeWin,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::AwayWin,
        }
    }
}

/// Points earned by one prediction against the result of its fixture.
///
/// Exact scoreline beats correct outcome; no result yet means no points.
pub fn score_prediction(
    predicted: Scoreline,
    actual: Option<Scoreline>,
    settings: &ScoringSettings,
) -> i32 {
    let Some(actual) = actual else {
        return 0;
    };

    if predicted == actual {
        settings.exact_score_points
    } else if Outcome::of(predicted) == Outcome::of(actual) {
        settings.correct_outcome_points
    } else {
        0
    }
}
