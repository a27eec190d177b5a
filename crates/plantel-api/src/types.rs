//! Wire types for the plantel backend.
//!
//! Every struct matches the JSON exchanged with the backend. Field names
//! on the wire are Spanish (`nombre`, `jugador_id`, ...); Rust fields are
//! renamed with `#[serde(rename = "...")]`. Enumerated strings such as
//! `tipo` stay as `String` here and are parsed by `plantel-core`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Identifiers ──────────────────────────────────────────────────────

/// Primary key as sent by the backend.
///
/// Integer keys are the norm; some backend revisions use UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Uuid(Uuid),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Uuid(u) => write!(f, "{u}"),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Uuid> for ResourceId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

// ── Players (jugadores) ──────────────────────────────────────────────

/// Player record (from `GET /jugadores`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: ResourceId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido", default)]
    pub surname: Option<String>,
    #[serde(rename = "fecha_nacimiento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "posicion", default)]
    pub position: Option<String>,
    #[serde(rename = "numero", default)]
    pub number: Option<i32>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    /// ISO 8601 date-time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO 8601 date-time.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /jugadores` and `PUT /jugadores/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCreateUpdate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(rename = "fecha_nacimiento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "posicion", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "numero", skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(rename = "activo")]
    pub active: bool,
}

// ── Attendance (asistencias) ─────────────────────────────────────────

/// Attendance record (from `GET /asistencias`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub id: ResourceId,
    #[serde(rename = "jugador_id")]
    pub player_id: ResourceId,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    /// One of: `ENTRENAMIENTO`, `PARTIDO`.
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "presente", default = "default_true")]
    pub present: bool,
}

/// Body for `POST /asistencias` and `PUT /asistencias/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceCreateUpdate {
    #[serde(rename = "jugador_id")]
    pub player_id: ResourceId,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "presente")]
    pub present: bool,
}

// ── Equipment (elementos) ────────────────────────────────────────────

/// Equipment item (from `GET /elementos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentResponse {
    pub id: ResourceId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// One of: `PELOTA`, `PECHERA`, `AGUA`, `CONJUNTO`.
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "cantidad", default)]
    pub quantity: i32,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

/// Body for `POST /elementos` and `PUT /elementos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCreateUpdate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "activo")]
    pub active: bool,
}

// ── Assignments (asignaciones) ───────────────────────────────────────

/// Equipment custody record (from `GET /asignaciones/pendientes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub id: ResourceId,
    #[serde(rename = "jugador_id")]
    pub player_id: ResourceId,
    #[serde(rename = "elemento_id")]
    pub equipment_id: ResourceId,
    /// Date or ISO 8601 date-time, depending on the backend revision.
    #[serde(rename = "fecha_asignacion", default)]
    pub assigned_at: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

/// Body for `POST /asignaciones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentCreate {
    #[serde(rename = "jugador_id")]
    pub player_id: ResourceId,
    #[serde(rename = "elemento_id")]
    pub equipment_id: ResourceId,
    #[serde(rename = "fecha_asignacion", skip_serializing_if = "Option::is_none")]
    pub assigned_on: Option<NaiveDate>,
}

/// `{"message": "..."}` acknowledgement returned by return/unassign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ── Matches (partidos) ───────────────────────────────────────────────

/// Match record (from `GET /partidos/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub id: ResourceId,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "rival")]
    pub opponent: String,
    #[serde(rename = "resultado_local", default)]
    pub home_score: Option<i32>,
    #[serde(rename = "resultado_visitante", default)]
    pub away_score: Option<i32>,
    #[serde(rename = "lugar", default)]
    pub venue: String,
    /// One of: `PARTIDO`, `ENTRENAMIENTO`, `AMISTOSO`, `TORNEO`.
    #[serde(rename = "tipo", default)]
    pub kind: String,
}

/// Body for `POST /partidos/` and `PUT /partidos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCreateUpdate {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "rival")]
    pub opponent: String,
    #[serde(rename = "resultado_local")]
    pub home_score: Option<i32>,
    #[serde(rename = "resultado_visitante")]
    pub away_score: Option<i32>,
    #[serde(rename = "lugar")]
    pub venue: String,
    #[serde(rename = "tipo")]
    pub kind: String,
}

// ── Statistics (estadisticas) ────────────────────────────────────────

/// One player's line for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticResponse {
    pub id: ResourceId,
    #[serde(rename = "jugador_id")]
    pub player_id: ResourceId,
    #[serde(rename = "partido_id")]
    pub match_id: ResourceId,
    #[serde(rename = "goles", default)]
    pub goals: u32,
    #[serde(rename = "asistencias", default)]
    pub assists: u32,
    #[serde(rename = "tarjetas_amarillas", default)]
    pub yellow_cards: u32,
    #[serde(rename = "tarjetas_rojas", default)]
    pub red_cards: u32,
    #[serde(rename = "minutos_jugados", default)]
    pub minutes_played: u32,
    #[serde(rename = "titular", default)]
    pub starter: bool,
    /// ISO 8601 date-time.
    #[serde(rename = "fecha_registro", default)]
    pub recorded_at: Option<String>,
}

/// Body for `POST /estadisticas/registro/` (and each element of
/// `POST /estadisticas/registro-multiple/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticCreate {
    #[serde(rename = "jugador_id")]
    pub player_id: ResourceId,
    #[serde(rename = "partido_id")]
    pub match_id: ResourceId,
    #[serde(rename = "goles")]
    pub goals: u32,
    #[serde(rename = "asistencias")]
    pub assists: u32,
    #[serde(rename = "tarjetas_amarillas")]
    pub yellow_cards: u32,
    #[serde(rename = "tarjetas_rojas")]
    pub red_cards: u32,
    #[serde(rename = "minutos_jugados")]
    pub minutes_played: u32,
    #[serde(rename = "titular")]
    pub starter: bool,
}

/// Aggregated totals for one player (from `GET /estadisticas/resumen/`
/// and `GET /estadisticas/jugadores/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummaryResponse {
    #[serde(rename = "jugador_id")]
    pub player_id: ResourceId,
    #[serde(rename = "nombre_jugador")]
    pub player_name: String,
    #[serde(rename = "total_partidos", default)]
    pub matches: u32,
    #[serde(rename = "total_goles", default)]
    pub goals: u32,
    #[serde(rename = "total_asistencias", default)]
    pub assists: u32,
    #[serde(rename = "total_amarillas", default)]
    pub yellow_cards: u32,
    #[serde(rename = "total_rojas", default)]
    pub red_cards: u32,
    #[serde(rename = "minutos_totales", default)]
    pub minutes: u32,
    #[serde(rename = "promedio_minutos", default)]
    pub average_minutes: f64,
}

/// A match together with every recorded player line
/// (from `GET /estadisticas/partidos/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatisticsResponse {
    #[serde(rename = "partido_id")]
    pub match_id: ResourceId,
    /// Date or ISO 8601 date-time.
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "rival", default)]
    pub opponent: Option<String>,
    #[serde(rename = "resultado_local", default)]
    pub home_score: Option<i32>,
    #[serde(rename = "resultado_visitante", default)]
    pub away_score: Option<i32>,
    #[serde(rename = "lugar", default)]
    pub venue: Option<String>,
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
    #[serde(rename = "jugadores", default)]
    pub players: Vec<StatisticResponse>,
}

// ── Query parameters ─────────────────────────────────────────────────

/// Query string for `GET /estadisticas/resumen/`.
///
/// `sort_by`/`descending` are always sent; the thresholds only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryParams {
    /// Wire name of the sort field (`goles`, `asistencias`, ...).
    pub sort_by: String,
    pub descending: bool,
    pub min_goals: Option<u32>,
    pub min_assists: Option<u32>,
    pub min_matches: Option<u32>,
    pub min_minutes: Option<u32>,
    pub max_yellow_cards: Option<u32>,
    pub max_red_cards: Option<u32>,
}

impl SummaryParams {
    /// Encode as `(name, value)` pairs in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ordenar_por", self.sort_by.clone()),
            (
                "orden",
                if self.descending { "desc" } else { "asc" }.to_owned(),
            ),
        ];
        let thresholds = [
            ("min_goles", self.min_goals),
            ("min_asistencias", self.min_assists),
            ("min_partidos", self.min_matches),
            ("min_minutos", self.min_minutes),
            ("max_amarillas", self.max_yellow_cards),
            ("max_rojas", self.max_red_cards),
        ];
        params.extend(
            thresholds
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v.to_string()))),
        );
        params
    }
}

fn default_true() -> bool {
    true
}
