// ── Match domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// What kind of fixture a match is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MatchKind {
    #[default]
    Match,
    Training,
    Friendly,
    Tournament,
    Other(String),
}

impl MatchKind {
    /// Wire string (`PARTIDO`, `ENTRENAMIENTO`, `AMISTOSO`, `TORNEO`).
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Match => "PARTIDO",
            Self::Training => "ENTRENAMIENTO",
            Self::Friendly => "AMISTOSO",
            Self::Tournament => "TORNEO",
            Self::Other(raw) => raw,
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "PARTIDO" | "MATCH" | "" => Self::Match,
            "ENTRENAMIENTO" | "TRAINING" => Self::Training,
            "AMISTOSO" | "FRIENDLY" => Self::Friendly,
            "TORNEO" | "TOURNAMENT" => Self::Tournament,
            _ => Self::Other(raw.to_owned()),
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => f.write_str("match"),
            Self::Training => f.write_str("training"),
            Self::Friendly => f.write_str("friendly"),
            Self::Tournament => f.write_str("tournament"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for MatchKind {
    fn from(raw: String) -> Self {
        Self::from_wire(&raw)
    }
}

impl From<MatchKind> for String {
    fn from(kind: MatchKind) -> Self {
        kind.to_string()
    }
}

/// A fixture. Scores stay `None` until the match is played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: EntityId,
    pub date: NaiveDate,
    pub opponent: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub venue: String,
    pub kind: MatchKind,
}

impl Match {
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// `"2-1"`, or `"-"` before kickoff.
    pub fn score_line(&self) -> String {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => format!("{home}-{away}"),
            _ => "-".into(),
        }
    }
}

/// Editable match fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub date: NaiveDate,
    pub opponent: String,
    #[serde(default)]
    pub home_score: Option<i32>,
    #[serde(default)]
    pub away_score: Option<i32>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub kind: MatchKind,
}

impl Default for MatchInput {
    fn default() -> Self {
        Self {
            date: chrono::Local::now().date_naive(),
            opponent: String::new(),
            home_score: None,
            away_score: None,
            venue: String::new(),
            kind: MatchKind::Match,
        }
    }
}

impl From<&Match> for MatchInput {
    fn from(m: &Match) -> Self {
        Self {
            date: m.date,
            opponent: m.opponent.clone(),
            home_score: m.home_score,
            away_score: m.away_score,
            venue: m.venue.clone(),
            kind: m.kind.clone(),
        }
    }
}
