use chrono::{NaiveDate, NaiveTime};

use crate::models::fixture::Fixture;

type FixtureRow = (&'static str, &'static str, &'static str, &'static str);

/// (date, kick-off, home, away) of every match open for predictions.
const FIXTURES: &[FixtureRow] = &[
    ("2025-03-02", "22:00", "Sao Paulo", "Bragantino"),
    ("2025-03-03", "16:00", "Esteghlal FC", "Al-Nassr"),
    ("2025-03-03", "19:30", "Nottingham Forest", "Ipswich Town"),
];

/// The fixed list of fixtures, built once at startup.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    fixtures: Vec<Fixture>,
}

impl FixtureCatalog {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self { fixtures }
    }

    pub fn builtin() -> Self {
        Self::from_rows(FIXTURES)
    }

    /// Panics on a malformed date or kick-off time: the rows are compiled in.
    fn from_rows(rows: &[FixtureRow]) -> Self {
        let fixtures = rows
            .iter()
            .map(|(date, time, home, away)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .unwrap_or_else(|e| panic!("Bad date {:?} for {} vs {}: {}", date, home, away, e));
                let time = NaiveTime::parse_from_str(time, "%H:%M")
                    .unwrap_or_else(|e| panic!("Bad kick-off {:?} for {} vs {}: {}", time, home, away, e));
                Fixture {
                    id: fixture_key(date, home, away),
                    date,
                    time,
                    home: home.to_string(),
                    away: away.to_string(),
                }
            })
            .collect();
        Self::new(fixtures)
    }

    pub fn get(&self, fixture_id: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|fixture| fixture.id == fixture_id)
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

/// Stable key for a fixture, e.g. `2025-03-02-sao-paulo-bragantino`.
pub fn fixture_key(date: NaiveDate, home: &str, away: &str) -> String {
    format!("{}-{}-{}", date.format("%Y-%m-%d"), slugify(home), slugify(away))
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
