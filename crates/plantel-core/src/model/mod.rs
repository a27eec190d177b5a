// ── Domain model ──
//
// Canonical types shared by every consumer. Wire types from
// `plantel_api::types` are converted into these in `crate::convert`.

pub mod attendance;
pub mod entity_id;
pub mod equipment;
pub mod fixture;
pub mod player;
pub mod statistic;

pub use attendance::{Attendance, AttendanceFilter, AttendanceInput, EventKind};
pub use entity_id::{EntityId, ParseEntityIdError};
pub use equipment::{Assignment, AssignmentInput, Equipment, EquipmentInput, EquipmentKind};
pub use fixture::{Match, MatchInput, MatchKind};
pub use player::{Player, PlayerInput};
pub use statistic::{
    MatchStatistics, SortField, Statistic, StatisticInput, StatisticsSummary, SummaryFilter,
    SummaryQuery, SummarySort,
};
