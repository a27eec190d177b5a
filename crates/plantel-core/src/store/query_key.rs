// ── Cache key families ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// One invalidation family per backend resource.
///
/// Invalidating a family marks every cached query of that resource stale,
/// whatever its parameters (a summary sorted by goals and one sorted by
/// minutes both belong to `Statistics`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    IntoStaticStr,
)]
pub enum QueryFamily {
    #[strum(to_string = "jugadores")]
    Players,
    #[strum(to_string = "asistencias")]
    Attendance,
    #[strum(to_string = "elementos")]
    Equipment,
    #[strum(to_string = "asignaciones")]
    Assignments,
    #[strum(to_string = "partidos")]
    Matches,
    #[strum(to_string = "estadisticas")]
    Statistics,
}

impl QueryFamily {
    /// Cache key name, matching the backend resource path.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Players => 0,
            Self::Attendance => 1,
            Self::Equipment => 2,
            Self::Assignments => 3,
            Self::Matches => 4,
            Self::Statistics => 5,
        }
    }
}

/// Broadcast whenever a family is invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub family: QueryFamily,
    /// Running invalidation count for `family`, including this one.
    pub count: u64,
}
