// ── Statistics summary view ──

use std::sync::Arc;

use crate::controller::Controller;
use crate::error::CoreError;
use crate::model::{SortField, StatisticsSummary, SummaryFilter, SummaryQuery, SummarySort};
use crate::stream::QueryStream;

/// Sort and filter state for the per-player summary table.
///
/// Sorting happens on the backend. Rows come back in the order the
/// backend chose and are never reordered here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryView {
    pub sort: SummarySort,
    pub filter: SummaryFilter,
}

impl SummaryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click on a column header.
    pub fn toggle(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    pub fn set_filter(&mut self, filter: SummaryFilter) {
        self.filter = filter;
    }

    pub fn query(&self) -> SummaryQuery {
        SummaryQuery {
            sort: self.sort,
            filter: self.filter,
        }
    }

    /// Rows for the current query, cached under the full query so any
    /// change of field, direction or filter is a fresh request.
    pub async fn fetch(
        &self,
        controller: &Controller,
    ) -> Result<Arc<Vec<StatisticsSummary>>, CoreError> {
        controller.statistics_summary(&self.query()).await
    }

    pub fn subscribe(&self, controller: &Controller) -> QueryStream<Vec<StatisticsSummary>> {
        controller.subscribe_summary(&self.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_field_flips_direction() {
        let mut view = SummaryView::new();
        assert_eq!(view.sort.field, SortField::Goals);
        assert!(view.sort.descending);

        view.toggle(SortField::Goals);
        assert_eq!(view.sort.field, SortField::Goals);
        assert!(!view.sort.descending);
    }

    #[test]
    fn double_toggle_returns_to_descending() {
        let mut view = SummaryView::new();
        view.toggle(SortField::Goals);
        view.toggle(SortField::Goals);
        assert!(view.sort.descending);
    }

    #[test]
    fn new_field_resets_to_descending() {
        let mut view = SummaryView::new();
        view.toggle(SortField::Goals);
        assert!(!view.sort.descending);

        view.toggle(SortField::Minutes);
        assert_eq!(view.sort.field, SortField::Minutes);
        assert!(view.sort.descending);
    }

    #[test]
    fn every_toggle_changes_the_query_key() {
        let mut view = SummaryView::new();
        let mut seen = vec![view.query()];
        for field in [SortField::Goals, SortField::Assists, SortField::Assists] {
            view.toggle(field);
            let query = view.query();
            assert!(!seen.contains(&query), "{query:?} reused");
            seen.push(query);
        }
    }

    #[test]
    fn filter_is_part_of_the_query() {
        let mut view = SummaryView::new();
        let before = view.query();
        view.set_filter(SummaryFilter {
            min_matches: Some(3),
            ..SummaryFilter::default()
        });
        assert_ne!(view.query(), before);
        assert_eq!(view.query().to_params().min_matches, Some(3));
    }
}
