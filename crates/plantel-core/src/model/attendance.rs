// ── Attendance domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Kind of session an attendance record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EventKind {
    Training,
    Match,
    Other(String),
}

impl EventKind {
    /// Wire string (`ENTRENAMIENTO`, `PARTIDO`).
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Training => "ENTRENAMIENTO",
            Self::Match => "PARTIDO",
            Self::Other(raw) => raw,
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "ENTRENAMIENTO" | "TRAINING" => Self::Training,
            "PARTIDO" | "MATCH" => Self::Match,
            _ => Self::Other(raw.to_owned()),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Training => f.write_str("training"),
            Self::Match => f.write_str("match"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for EventKind {
    fn from(raw: String) -> Self {
        Self::from_wire(&raw)
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.to_string()
    }
}

/// Whether one player attended one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: EntityId,
    pub player_id: EntityId,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub present: bool,
}

/// Body for recording or correcting attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceInput {
    pub player_id: EntityId,
    pub date: NaiveDate,
    pub kind: EventKind,
    #[serde(default = "default_present")]
    pub present: bool,
}

impl From<&Attendance> for AttendanceInput {
    fn from(a: &Attendance) -> Self {
        Self {
            player_id: a.player_id.clone(),
            date: a.date,
            kind: a.kind.clone(),
            present: a.present,
        }
    }
}

/// Server-side filter for `GET /asistencias`; also the cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendanceFilter {
    pub date: Option<NaiveDate>,
    pub kind: Option<EventKind>,
}

fn default_present() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::EventKind;

    #[test]
    fn event_kind_wire_names() {
        assert_eq!(EventKind::from_wire("ENTRENAMIENTO"), EventKind::Training);
        assert_eq!(EventKind::from_wire("partido"), EventKind::Match);
        assert_eq!(EventKind::Training.as_wire(), "ENTRENAMIENTO");
        assert_eq!(
            EventKind::from_wire("TORNEO"),
            EventKind::Other("TORNEO".into())
        );
    }
}
