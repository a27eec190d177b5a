// ── Command API ──
//
// All write operations flow through a unified `Command` enum.
// The controller routes each variant to one backend call and, on
// success, invalidates the families listed by `Command::invalidates`.

use crate::error::CoreError;
use crate::model::{
    Assignment, AssignmentInput, Attendance, AttendanceInput, EntityId, Equipment,
    EquipmentInput, Match, MatchInput, Player, PlayerInput, Statistic, StatisticInput,
};
use crate::store::QueryFamily;

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All possible write operations against the backend.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Players ──────────────────────────────────────────────────────
    CreatePlayer(PlayerInput),
    UpdatePlayer { id: EntityId, input: PlayerInput },
    DeletePlayer { id: EntityId },

    // ── Attendance ───────────────────────────────────────────────────
    RecordAttendance(AttendanceInput),
    UpdateAttendance { id: EntityId, input: AttendanceInput },

    // ── Equipment ────────────────────────────────────────────────────
    CreateEquipment(EquipmentInput),
    UpdateEquipment { id: EntityId, input: EquipmentInput },
    DeleteEquipment { id: EntityId },

    // ── Assignments ──────────────────────────────────────────────────
    AssignEquipment(AssignmentInput),
    /// Mark an assignment returned (`PUT devolver/{id}`).
    ReturnEquipment { id: EntityId },
    UnassignEquipment {
        player_id: EntityId,
        equipment_id: EntityId,
    },
    /// Ask the backend to redistribute equipment among active players.
    RotateEquipment,

    // ── Matches ──────────────────────────────────────────────────────
    CreateMatch(MatchInput),
    UpdateMatch { id: EntityId, input: MatchInput },
    DeleteMatch { id: EntityId },

    // ── Statistics ───────────────────────────────────────────────────
    RecordStatistic(StatisticInput),
    /// One `registro-multiple` call for a whole batch.
    RecordStatistics(Vec<StatisticInput>),
}

impl Command {
    /// Cache families to invalidate after this command succeeds.
    ///
    /// Each family appears at most once. Statistics are aggregated from
    /// matches server-side, so recording them also invalidates `Matches`.
    pub fn invalidates(&self) -> &'static [QueryFamily] {
        match self {
            Self::CreatePlayer(_) | Self::UpdatePlayer { .. } | Self::DeletePlayer { .. } => {
                &[QueryFamily::Players]
            }
            Self::RecordAttendance(_) | Self::UpdateAttendance { .. } => {
                &[QueryFamily::Attendance]
            }
            Self::CreateEquipment(_)
            | Self::UpdateEquipment { .. }
            | Self::DeleteEquipment { .. } => &[QueryFamily::Equipment],
            Self::AssignEquipment(_)
            | Self::ReturnEquipment { .. }
            | Self::UnassignEquipment { .. }
            | Self::RotateEquipment => &[QueryFamily::Assignments],
            Self::CreateMatch(_) | Self::UpdateMatch { .. } | Self::DeleteMatch { .. } => {
                &[QueryFamily::Matches]
            }
            Self::RecordStatistic(_) | Self::RecordStatistics(_) => {
                &[QueryFamily::Statistics, QueryFamily::Matches]
            }
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePlayer(_) => "create_player",
            Self::UpdatePlayer { .. } => "update_player",
            Self::DeletePlayer { .. } => "delete_player",
            Self::RecordAttendance(_) => "record_attendance",
            Self::UpdateAttendance { .. } => "update_attendance",
            Self::CreateEquipment(_) => "create_equipment",
            Self::UpdateEquipment { .. } => "update_equipment",
            Self::DeleteEquipment { .. } => "delete_equipment",
            Self::AssignEquipment(_) => "assign_equipment",
            Self::ReturnEquipment { .. } => "return_equipment",
            Self::UnassignEquipment { .. } => "unassign_equipment",
            Self::RotateEquipment => "rotate_equipment",
            Self::CreateMatch(_) => "create_match",
            Self::UpdateMatch { .. } => "update_match",
            Self::DeleteMatch { .. } => "delete_match",
            Self::RecordStatistic(_) => "record_statistic",
            Self::RecordStatistics(_) => "record_statistics",
        }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Ok,
    /// Confirmation text returned by the backend (`{"message": ...}`).
    Message(String),
    Player(Player),
    Attendance(Attendance),
    Equipment(Equipment),
    Assignment(Assignment),
    Match(Match),
    Statistic(Statistic),
    Statistics(Vec<Statistic>),
}
