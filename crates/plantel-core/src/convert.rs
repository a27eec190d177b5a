// ── API-to-domain type conversions ──
//
// Bridges raw `plantel_api::types` into `plantel_core::model`, and domain
// inputs back into request bodies. Enumerated strings are parsed into
// enums, timestamps into `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use plantel_api::types::{
    AssignmentResponse, AttendanceCreateUpdate, AttendanceResponse, EquipmentCreateUpdate,
    EquipmentResponse, MatchCreateUpdate, MatchResponse, MatchStatisticsResponse,
    PlayerCreateUpdate, PlayerResponse, PlayerSummaryResponse, StatisticCreate, StatisticResponse,
};

use crate::model::{
    Assignment, Attendance, AttendanceInput, Equipment, EquipmentInput, EquipmentKind, EventKind,
    Match, MatchInput, MatchKind, MatchStatistics, Player, PlayerInput, Statistic,
    StatisticInput, StatisticsSummary,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(raw: Option<&String>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a date that may arrive as `YYYY-MM-DD` or as a full timestamp.
fn parse_date(raw: Option<&String>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Treat blank strings from the backend as absent.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

// ── Players ────────────────────────────────────────────────────────

impl From<PlayerResponse> for Player {
    fn from(p: PlayerResponse) -> Self {
        Self {
            created_at: parse_timestamp(p.created_at.as_ref()),
            updated_at: parse_timestamp(p.updated_at.as_ref()),
            id: p.id.into(),
            name: p.name,
            surname: non_empty(p.surname),
            birth_date: p.birth_date,
            position: non_empty(p.position),
            number: p.number,
            active: p.active,
        }
    }
}

impl From<&PlayerInput> for PlayerCreateUpdate {
    fn from(input: &PlayerInput) -> Self {
        Self {
            name: input.name.trim().to_owned(),
            surname: input.surname.clone(),
            birth_date: input.birth_date,
            position: input.position.clone(),
            number: input.number,
            active: input.active,
        }
    }
}

// ── Attendance ─────────────────────────────────────────────────────

impl From<AttendanceResponse> for Attendance {
    fn from(a: AttendanceResponse) -> Self {
        Self {
            id: a.id.into(),
            player_id: a.player_id.into(),
            date: a.date,
            kind: EventKind::from_wire(&a.kind),
            present: a.present,
        }
    }
}

impl From<&AttendanceInput> for AttendanceCreateUpdate {
    fn from(input: &AttendanceInput) -> Self {
        Self {
            player_id: input.player_id.to_wire(),
            date: input.date,
            kind: input.kind.as_wire().to_owned(),
            present: input.present,
        }
    }
}

// ── Equipment ──────────────────────────────────────────────────────

impl From<EquipmentResponse> for Equipment {
    fn from(e: EquipmentResponse) -> Self {
        Self {
            id: e.id.into(),
            name: e.name,
            description: non_empty(e.description),
            kind: EquipmentKind::from_wire(&e.kind),
            quantity: e.quantity,
            active: e.active,
        }
    }
}

impl From<&EquipmentInput> for EquipmentCreateUpdate {
    fn from(input: &EquipmentInput) -> Self {
        Self {
            name: input.name.trim().to_owned(),
            description: input.description.clone(),
            kind: input.kind.as_wire().to_owned(),
            quantity: input.quantity,
            active: input.active,
        }
    }
}

impl From<AssignmentResponse> for Assignment {
    fn from(a: AssignmentResponse) -> Self {
        Self {
            assigned_on: parse_date(a.assigned_at.as_ref()),
            id: a.id.into(),
            player_id: a.player_id.into(),
            equipment_id: a.equipment_id.into(),
            active: a.active,
        }
    }
}

// ── Matches ────────────────────────────────────────────────────────

impl From<MatchResponse> for Match {
    fn from(m: MatchResponse) -> Self {
        Self {
            id: m.id.into(),
            date: m.date,
            opponent: m.opponent,
            home_score: m.home_score,
            away_score: m.away_score,
            venue: m.venue,
            kind: MatchKind::from_wire(&m.kind),
        }
    }
}

impl From<&MatchInput> for MatchCreateUpdate {
    fn from(input: &MatchInput) -> Self {
        Self {
            date: input.date,
            opponent: input.opponent.trim().to_owned(),
            home_score: input.home_score,
            away_score: input.away_score,
            venue: input.venue.clone(),
            kind: input.kind.as_wire().to_owned(),
        }
    }
}

// ── Statistics ─────────────────────────────────────────────────────

impl From<StatisticResponse> for Statistic {
    fn from(s: StatisticResponse) -> Self {
        Self {
            recorded_at: parse_timestamp(s.recorded_at.as_ref()),
            id: s.id.into(),
            player_id: s.player_id.into(),
            match_id: s.match_id.into(),
            goals: s.goals,
            assists: s.assists,
            yellow_cards: s.yellow_cards,
            red_cards: s.red_cards,
            minutes_played: s.minutes_played,
            starter: s.starter,
        }
    }
}

impl From<&StatisticInput> for StatisticCreate {
    fn from(input: &StatisticInput) -> Self {
        Self {
            player_id: input.player_id.to_wire(),
            match_id: input.match_id.to_wire(),
            goals: input.goals,
            assists: input.assists,
            yellow_cards: input.yellow_cards,
            red_cards: input.red_cards,
            minutes_played: input.minutes_played,
            starter: input.starter,
        }
    }
}

impl From<PlayerSummaryResponse> for StatisticsSummary {
    fn from(s: PlayerSummaryResponse) -> Self {
        Self {
            player_id: s.player_id.into(),
            player_name: s.player_name,
            matches: s.matches,
            goals: s.goals,
            assists: s.assists,
            yellow_cards: s.yellow_cards,
            red_cards: s.red_cards,
            minutes: s.minutes,
            average_minutes: s.average_minutes,
        }
    }
}

impl From<MatchStatisticsResponse> for MatchStatistics {
    fn from(m: MatchStatisticsResponse) -> Self {
        Self {
            date: parse_date(m.date.as_ref()),
            match_id: m.match_id.into(),
            opponent: m.opponent,
            home_score: m.home_score,
            away_score: m.away_score,
            venue: m.venue,
            kind: m.kind.as_deref().map(MatchKind::from_wire),
            lines: m.players.into_iter().map(Statistic::from).collect(),
        }
    }
}
