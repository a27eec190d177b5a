//! Query cache and entity controllers between `plantel-api` and the CLI.
//!
//! - **[`Controller`]**: connection lifecycle, cached reads and the command
//!   channel. [`connect()`](Controller::connect) verifies the backend and
//!   seeds the players cache; [`Controller::oneshot()`](Controller::oneshot)
//!   is the lightweight mode for single CLI invocations.
//!
//! - **[`DataStore`]**: generation-tracked query slots grouped by
//!   [`QueryFamily`]. A successful [`Command`] invalidates exactly the
//!   families it touches; the next read of a stale slot refetches.
//!
//! - **[`QueryStream<T>`]**: subscription handle for one cached query,
//!   with `current()` / `latest()` / `changed()` and a `Stream` adapter.
//!
//! - **[`EntityController<R>`]**: the list/create/update/delete cycle with
//!   a form dialog, generic over [`Players`], [`Matches`],
//!   [`EquipmentItems`] and [`Assignments`].
//!
//! - **[`SummaryView`]** and **[`MatchStatsEditor`]**: server-sorted
//!   statistics table and bulk per-match statistics entry.

pub mod command;
pub mod config;
pub mod controller;
mod convert;
pub mod entity;
pub mod error;
pub mod match_stats;
pub mod model;
pub mod store;
pub mod stream;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::{ControllerConfig, DEFAULT_BACKEND, TlsVerification};
pub use controller::{ConnectionState, Controller};
pub use entity::{
    Assignments, DialogMode, DialogState, EntityController, EquipmentItems, FormDialog, Matches,
    Mutable, MutationState, Players, Resource,
};
pub use error::CoreError;
pub use match_stats::{MatchStatsEditor, StatRow};
pub use store::{DataStore, Invalidation, QueryFamily};
pub use stream::{QueryStream, QueryWatchStream};
pub use summary::SummaryView;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Squad
    Player, PlayerInput,
    // Attendance
    Attendance, AttendanceFilter, AttendanceInput, EventKind,
    // Equipment
    Assignment, AssignmentInput, Equipment, EquipmentInput, EquipmentKind,
    // Fixtures
    Match, MatchInput, MatchKind,
    // Statistics
    MatchStatistics, SortField, Statistic, StatisticInput, StatisticsSummary, SummaryFilter,
    SummaryQuery, SummarySort,
    // Identifiers
    EntityId, ParseEntityIdError,
};
