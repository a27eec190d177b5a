// ── Statistics domain types ──
//
// Per-match player lines, server-aggregated summaries, and the sort/filter
// parameters of the summary endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::entity_id::EntityId;
use super::fixture::MatchKind;

// ── Per-match lines ─────────────────────────────────────────────────

/// One player's line for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub id: EntityId,
    pub player_id: EntityId,
    pub match_id: EntityId,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub minutes_played: u32,
    pub starter: bool,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Body for recording a line. Unset numbers are `0`, `starter` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticInput {
    pub player_id: EntityId,
    pub match_id: EntityId,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
    #[serde(default)]
    pub minutes_played: u32,
    #[serde(default)]
    pub starter: bool,
}

impl StatisticInput {
    /// An all-zero line for `player_id` in `match_id`.
    pub fn zeroed(player_id: EntityId, match_id: EntityId) -> Self {
        Self {
            player_id,
            match_id,
            goals: 0,
            assists: 0,
            yellow_cards: 0,
            red_cards: 0,
            minutes_played: 0,
            starter: false,
        }
    }
}

impl From<&Statistic> for StatisticInput {
    fn from(s: &Statistic) -> Self {
        Self {
            player_id: s.player_id.clone(),
            match_id: s.match_id.clone(),
            goals: s.goals,
            assists: s.assists,
            yellow_cards: s.yellow_cards,
            red_cards: s.red_cards,
            minutes_played: s.minutes_played,
            starter: s.starter,
        }
    }
}

/// A match plus every recorded line for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub match_id: EntityId,
    pub date: Option<NaiveDate>,
    pub opponent: Option<String>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub venue: Option<String>,
    pub kind: Option<MatchKind>,
    pub lines: Vec<Statistic>,
}

// ── Aggregates ──────────────────────────────────────────────────────

/// Totals for one player, computed by the backend. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub player_id: EntityId,
    pub player_name: String,
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub minutes: u32,
    pub average_minutes: f64,
}

// ── Sorting and filtering ───────────────────────────────────────────

/// Column the backend sorts the summary by.
///
/// Parses from the wire name (`goles`) or the English name (`goals`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
    #[serde(rename = "partidos", alias = "matches")]
    #[strum(to_string = "partidos", serialize = "matches")]
    Matches,
    #[serde(rename = "goles", alias = "goals")]
    #[strum(to_string = "goles", serialize = "goals")]
    Goals,
    #[serde(rename = "asistencias", alias = "assists")]
    #[strum(to_string = "asistencias", serialize = "assists")]
    Assists,
    #[serde(rename = "amarillas", alias = "yellow")]
    #[strum(to_string = "amarillas", serialize = "yellow", serialize = "yellow_cards")]
    YellowCards,
    #[serde(rename = "rojas", alias = "red")]
    #[strum(to_string = "rojas", serialize = "red", serialize = "red_cards")]
    RedCards,
    #[serde(rename = "minutos", alias = "minutes")]
    #[strum(to_string = "minutos", serialize = "minutes")]
    Minutes,
    #[serde(rename = "promedio_minutos", alias = "average_minutes")]
    #[strum(to_string = "promedio_minutos", serialize = "average_minutes", serialize = "avg")]
    AverageMinutes,
}

impl SortField {
    /// Value sent as `ordenar_por`.
    pub fn as_wire(self) -> &'static str {
        self.into()
    }
}

/// Sort state: one field plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummarySort {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SummarySort {
    fn default() -> Self {
        Self {
            field: SortField::Goals,
            descending: true,
        }
    }
}

impl SummarySort {
    /// Same field flips the direction; a new field starts descending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.descending = !self.descending;
        } else {
            self.field = field;
            self.descending = true;
        }
    }
}

/// Optional thresholds applied by the backend before sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryFilter {
    pub min_goals: Option<u32>,
    pub min_assists: Option<u32>,
    pub min_matches: Option<u32>,
    pub min_minutes: Option<u32>,
    pub max_yellow_cards: Option<u32>,
    pub max_red_cards: Option<u32>,
}

/// Everything that shapes one summary request. Doubles as the cache key,
/// so two queries share a cached result only if every parameter matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub sort: SummarySort,
    pub filter: SummaryFilter,
}

impl SummaryQuery {
    pub fn to_params(&self) -> plantel_api::types::SummaryParams {
        plantel_api::types::SummaryParams {
            sort_by: self.sort.field.as_wire().to_owned(),
            descending: self.sort.descending,
            min_goals: self.filter.min_goals,
            min_assists: self.filter.min_assists,
            min_matches: self.filter.min_matches,
            min_minutes: self.filter.min_minutes,
            max_yellow_cards: self.filter.max_yellow_cards,
            max_red_cards: self.filter.max_red_cards,
        }
    }
}
