use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A scheduled match. `id` is the stable key predictions and results refer to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fixture {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub home: String,
    pub away: String,
}

/// Display name of a match, e.g. `Sao Paulo vs Bragantino`.
pub fn match_label(home: &str, away: &str) -> String {
    format!("{} vs {}", home, away)
}
