use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::config::scoring::{DuplicatePolicy, ScoringSettings};
use crate::models::common::Scoreline;
use crate::models::leaderboard::LeaderboardEntry;
use crate::models::match_result::MatchResult;
use crate::models::prediction::Prediction;
use crate::scoring::points::score_prediction;

/// Aggregated points of one user before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScore {
    pub user_id: Uuid,
    pub points: i32,
    pub predictions: usize,
}

/// Index results by fixture id. A later row for the same fixture wins.
pub fn results_by_fixture(results: &[MatchResult]) -> HashMap<&str, Scoreline> {
    results
        .iter()
        .map(|result| (result.fixture_id.as_str(), result.scoreline()))
        .collect()
}

/// Ids of the predictions that count under `policy`.
///
/// With `KeepLatest` the newest row per (user, fixture) survives; rows with
/// the same timestamp resolve to the one seen last.
pub fn counted_prediction_ids(predictions: &[Prediction], policy: DuplicatePolicy) -> HashSet<Uuid> {
    match policy {
        DuplicatePolicy::SumAll => predictions.iter().map(|p| p.id).collect(),
        DuplicatePolicy::KeepLatest => {
            let mut latest: HashMap<(Uuid, &str), &Prediction> = HashMap::new();
            for prediction in predictions {
                let key = (prediction.user_id, prediction.fixture_id.as_str());
                let newer = latest
                    .get(&key)
                    .map_or(true, |current| prediction.created_at >= current.created_at);
                if newer {
                    latest.insert(key, prediction);
                }
            }
            latest.values().map(|p| p.id).collect()
        }
    }
}

/// Sum points per user and sort by descending points.
///
/// The sort is stable: equal totals keep the order in which each user first
/// appears in `predictions`.
pub fn tally(
    predictions: &[Prediction],
    results: &HashMap<&str, Scoreline>,
    settings: &ScoringSettings,
) -> Vec<UserScore> {
    let counted = counted_prediction_ids(predictions, settings.duplicate_policy);

    let mut order = Vec::new();
    let mut totals: HashMap<Uuid, UserScore> = HashMap::new();
    for prediction in predictions {
        let entry = totals.entry(prediction.user_id).or_insert_with(|| {
            order.push(prediction.user_id);
            UserScore {
                user_id: prediction.user_id,
                points: 0,
                predictions: 0,
            }
        });

        if !counted.contains(&prediction.id) {
            continue;
        }
        let actual = results.get(prediction.fixture_id.as_str()).copied();
        entry.points += score_prediction(prediction.scoreline(), actual, settings);
        entry.predictions += 1;
    }

    let mut scores: Vec<UserScore> = order
        .into_iter()
        .filter_map(|user_id| totals.remove(&user_id))
        .collect();
    scores.sort_by(|a, b| b.points.cmp(&a.points));
    scores
}

/// Attach ranks and e-mails. Equal points share a rank (1, 1, 3).
pub fn rank(scores: Vec<UserScore>, emails: &HashMap<Uuid, String>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(scores.len());
    for (index, score) in scores.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(previous) if previous.points == score.points => previous.rank,
            _ => index + 1,
        };
        entries.push(LeaderboardEntry {
            rank,
            user_id: score.user_id,
            email: emails.get(&score.user_id).cloned(),
            points: score.points,
            predictions: score.predictions,
        });
    }
    entries
}
