// ── Central query cache ──
//
// Every cached backend read lives here, grouped by invalidation family.
// The store is created with the `Controller` and shared by `Arc`; nothing
// writes to it except fetch results and invalidations.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use strum::EnumCount;
use tokio::sync::broadcast;
use tracing::debug;

use super::query_key::{Invalidation, QueryFamily};
use super::slot::{QuerySlot, SlotMap};
use crate::model::{
    Assignment, Attendance, AttendanceFilter, EntityId, Equipment, Match, MatchStatistics,
    Player, StatisticsSummary, SummaryQuery,
};
use crate::stream::QueryStream;

const INVALIDATION_CHANNEL_SIZE: usize = 64;

/// Query cache for one backend.
pub struct DataStore {
    // ── Collections (one slot each) ──
    pub(crate) players: QuerySlot<Vec<Player>>,
    pub(crate) matches: QuerySlot<Vec<Match>>,
    pub(crate) equipment: QuerySlot<Vec<Equipment>>,
    pub(crate) assignments: QuerySlot<Vec<Assignment>>,

    // ── Parameterized queries ──
    pub(crate) attendance: SlotMap<AttendanceFilter, Vec<Attendance>>,
    pub(crate) player_attendance: SlotMap<EntityId, Vec<Attendance>>,
    pub(crate) player_equipment: SlotMap<EntityId, Vec<Equipment>>,
    pub(crate) match_details: SlotMap<EntityId, Match>,
    pub(crate) summaries: SlotMap<SummaryQuery, Vec<StatisticsSummary>>,
    pub(crate) player_statistics: SlotMap<EntityId, StatisticsSummary>,
    pub(crate) match_statistics: SlotMap<EntityId, MatchStatistics>,

    invalidation_counts: [AtomicU64; QueryFamily::COUNT],
    invalidations: broadcast::Sender<Invalidation>,
}

impl DataStore {
    pub fn new() -> Self {
        let (invalidations, _) = broadcast::channel(INVALIDATION_CHANNEL_SIZE);
        Self {
            players: QuerySlot::new(),
            matches: QuerySlot::new(),
            equipment: QuerySlot::new(),
            assignments: QuerySlot::new(),
            attendance: SlotMap::new(),
            player_attendance: SlotMap::new(),
            player_equipment: SlotMap::new(),
            match_details: SlotMap::new(),
            summaries: SlotMap::new(),
            player_statistics: SlotMap::new(),
            match_statistics: SlotMap::new(),
            invalidation_counts: std::array::from_fn(|_| AtomicU64::new(0)),
            invalidations,
        }
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Mark every query of `family` stale and notify listeners.
    pub fn invalidate(&self, family: QueryFamily) {
        match family {
            QueryFamily::Players => self.players.invalidate(),
            QueryFamily::Attendance => {
                self.attendance.invalidate_all();
                self.player_attendance.invalidate_all();
            }
            QueryFamily::Equipment => self.equipment.invalidate(),
            QueryFamily::Assignments => {
                self.assignments.invalidate();
                self.player_equipment.invalidate_all();
            }
            QueryFamily::Matches => {
                self.matches.invalidate();
                self.match_details.invalidate_all();
            }
            QueryFamily::Statistics => {
                self.summaries.invalidate_all();
                self.player_statistics.invalidate_all();
                self.match_statistics.invalidate_all();
            }
        }

        let count = self.invalidation_counts[family.index()].fetch_add(1, Ordering::AcqRel) + 1;
        debug!(family = %family, count, "cache invalidated");
        // No receivers is fine: nobody is mounted.
        let _ = self.invalidations.send(Invalidation { family, count });
    }

    /// Total invalidations of `family` since the store was created.
    pub fn invalidation_count(&self, family: QueryFamily) -> u64 {
        self.invalidation_counts[family.index()].load(Ordering::Acquire)
    }

    /// Subscribe to invalidation notifications.
    pub fn invalidations(&self) -> broadcast::Receiver<Invalidation> {
        self.invalidations.subscribe()
    }

    /// `true` if the family's unparameterized collection is cached and fresh.
    ///
    /// `Attendance` and `Statistics` only have parameterized slots and
    /// always report `false`; ask the keyed query instead.
    pub fn is_fresh(&self, family: QueryFamily) -> bool {
        match family {
            QueryFamily::Players => self.players.is_fresh(),
            QueryFamily::Equipment => self.equipment.is_fresh(),
            QueryFamily::Assignments => self.assignments.is_fresh(),
            QueryFamily::Matches => self.matches.is_fresh(),
            QueryFamily::Attendance | QueryFamily::Statistics => false,
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn players_snapshot(&self) -> Option<Arc<Vec<Player>>> {
        self.players.latest()
    }

    pub fn matches_snapshot(&self) -> Option<Arc<Vec<Match>>> {
        self.matches.latest()
    }

    pub fn equipment_snapshot(&self) -> Option<Arc<Vec<Equipment>>> {
        self.equipment.latest()
    }

    pub fn assignments_snapshot(&self) -> Option<Arc<Vec<Assignment>>> {
        self.assignments.latest()
    }

    pub fn summary_snapshot(&self, query: &SummaryQuery) -> Option<Arc<Vec<StatisticsSummary>>> {
        self.summaries.slot(query).latest()
    }

    /// Number of summary queries with a cached slot.
    pub fn summary_query_count(&self) -> usize {
        self.summaries.len()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_players(&self) -> QueryStream<Vec<Player>> {
        QueryStream::new(self.players.subscribe())
    }

    pub fn subscribe_matches(&self) -> QueryStream<Vec<Match>> {
        QueryStream::new(self.matches.subscribe())
    }

    pub fn subscribe_equipment(&self) -> QueryStream<Vec<Equipment>> {
        QueryStream::new(self.equipment.subscribe())
    }

    pub fn subscribe_assignments(&self) -> QueryStream<Vec<Assignment>> {
        QueryStream::new(self.assignments.subscribe())
    }

    pub fn subscribe_summary(&self, query: &SummaryQuery) -> QueryStream<Vec<StatisticsSummary>> {
        QueryStream::new(self.summaries.slot(query).subscribe())
    }

    pub fn subscribe_match_statistics(&self, match_id: &EntityId) -> QueryStream<MatchStatistics> {
        QueryStream::new(self.match_statistics.slot(match_id).subscribe())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn invalidate_counts_only_the_named_family() {
        let store = DataStore::new();
        store.invalidate(QueryFamily::Players);

        for family in QueryFamily::iter() {
            let expected = u64::from(family == QueryFamily::Players);
            assert_eq!(store.invalidation_count(family), expected, "{family}");
        }
    }

    #[test]
    fn statistics_invalidation_marks_every_summary_stale() {
        let store = DataStore::new();
        let by_goals = SummaryQuery::default();
        let mut by_minutes = SummaryQuery::default();
        by_minutes.sort.toggle(crate::model::SortField::Minutes);

        let slots: Vec<_> = [&by_goals, &by_minutes]
            .into_iter()
            .map(|query| {
                let slot = store.summaries.slot(query);
                slot.store(slot.begin_fetch(), Vec::new());
                assert!(slot.is_fresh());
                slot
            })
            .collect();
        let _watching = store.subscribe_summary(&by_goals);
        assert_eq!(store.summary_query_count(), 2);

        store.invalidate(QueryFamily::Statistics);
        assert!(slots.iter().all(|slot| !slot.is_fresh()));
        // Only the subscribed query keeps its slot.
        assert_eq!(store.summary_query_count(), 1);
        assert!(store.summary_snapshot(&by_goals).is_some());
    }

    #[test]
    fn parameterized_families_never_report_fresh() {
        let store = DataStore::new();
        let slot = store.summaries.slot(&SummaryQuery::default());
        slot.store(slot.begin_fetch(), Vec::new());
        assert!(!store.is_fresh(QueryFamily::Statistics));
        assert!(!store.is_fresh(QueryFamily::Attendance));

        store.players.store(store.players.begin_fetch(), Vec::new());
        assert!(store.is_fresh(QueryFamily::Players));
    }

    #[test]
    fn matches_invalidation_leaves_players_fresh() {
        let store = DataStore::new();
        store.players.store(store.players.begin_fetch(), Vec::new());
        store.matches.store(store.matches.begin_fetch(), Vec::new());

        store.invalidate(QueryFamily::Matches);
        assert!(store.is_fresh(QueryFamily::Players));
        assert!(!store.is_fresh(QueryFamily::Matches));
    }

    #[tokio::test]
    async fn invalidations_are_broadcast() {
        let store = DataStore::new();
        let mut rx = store.invalidations();
        store.invalidate(QueryFamily::Assignments);
        store.invalidate(QueryFamily::Assignments);

        let first = rx.recv().await.expect("first");
        let second = rx.recv().await.expect("second");
        assert_eq!(first.family, QueryFamily::Assignments);
        assert_eq!(first.count, 1);
        assert_eq!(second.count, 2);
    }
}
