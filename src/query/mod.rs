//! Query pipeline: filter, count, sort, paginate.
//!
//! Pure functions over a borrowed record slice. The source collection is
//! never reordered; sorting works on a vector of references and only the
//! returned page is cloned.

use crate::model::LogRecord;
use crate::view_state::{
    DataState, ItemsPerPage, PageNumber, SortDirection, SortField, SortSpec, ViewState,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;

// ===== PageResult =====

/// One page of records plus the counts needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    /// Records on the requested page, in display order.
    pub records: Vec<LogRecord>,
    /// `ceil(total_matches / items_per_page)`, zero when nothing matched.
    pub total_pages: usize,
    /// Number of records that passed the filters.
    pub total_matches: usize,
}

impl PageResult {
    /// Result with no records and no pages.
    pub fn empty() -> Self {
        Self::default()
    }
}

// ===== Outcome =====

/// How a load settled, per the simulated data state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Pipeline ran; the page may still be empty.
    Page(PageResult),
    /// Simulated empty response.
    Empty,
    /// Simulated request that never settles.
    Loading,
    /// Simulated failure.
    Failed,
}

impl Outcome {
    /// Records to display. Only `Page` has any.
    pub fn records(&self) -> &[LogRecord] {
        match self {
            Self::Page(page) => &page.records,
            Self::Empty | Self::Loading | Self::Failed => &[],
        }
    }

    /// Total page count. Zero for every simulated mode.
    pub fn total_pages(&self) -> usize {
        match self {
            Self::Page(page) => page.total_pages,
            Self::Empty | Self::Loading | Self::Failed => 0,
        }
    }

    /// Whether the in-flight flag stays set after settling.
    pub fn keeps_in_flight(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

// ===== Pipeline =====

/// Resolve a view against the records, honoring the simulated data state.
///
/// Only `DataState::Success` runs the pipeline; the other modes ignore
/// filters and sort entirely.
pub fn resolve(records: &[LogRecord], view: &ViewState) -> Outcome {
    match view.data_state {
        DataState::Success => Outcome::Page(run(records, view)),
        DataState::Empty => Outcome::Empty,
        DataState::Loading => Outcome::Loading,
        DataState::Error => Outcome::Failed,
    }
}

/// Run filter, count, sort and paginate, in that order.
pub fn run(records: &[LogRecord], view: &ViewState) -> PageResult {
    let mut matched = filter(records, view);
    let total_matches = matched.len();
    let total_pages = page_count(total_matches, view.items_per_page);

    if let Some(spec) = &view.sort {
        sort(&mut matched, spec);
    }

    let page = paginate(&matched, view.page, view.items_per_page)
        .iter()
        .map(|record| (*record).clone())
        .collect();

    PageResult {
        records: page,
        total_pages,
        total_matches,
    }
}

/// Whether a record satisfies every active filter.
///
/// Filters without a value impose no constraint.
pub fn matches_filters(record: &LogRecord, view: &ViewState) -> bool {
    let user_ok = view
        .user_filter
        .as_deref()
        .is_none_or(|user| record.user().as_str() == user);
    let action_ok = view
        .action_filter
        .as_deref()
        .is_none_or(|action| record.action().as_str() == action);
    user_ok && action_ok
}

/// Records passing the view's filters, in collection order.
pub fn filter<'a>(records: &'a [LogRecord], view: &ViewState) -> Vec<&'a LogRecord> {
    records
        .iter()
        .filter(|record| matches_filters(record, view))
        .collect()
}

/// Number of pages needed for `matches` records. Zero when there are none.
pub fn page_count(matches: usize, items_per_page: ItemsPerPage) -> usize {
    matches.div_ceil(items_per_page.get())
}

/// Compare two records on one field, ascending.
pub fn compare_by(a: &LogRecord, b: &LogRecord, field: SortField) -> Ordering {
    match field {
        SortField::Timestamp => a.timestamp().cmp(&b.timestamp()),
        SortField::User => a.user().as_str().cmp(b.user().as_str()),
        SortField::Action => a.action().as_str().cmp(b.action().as_str()),
        SortField::Resource => a.resource().cmp(b.resource()),
    }
}

/// Stable sort. `Desc` reverses the comparison, so equal keys keep their
/// input order in both directions.
pub fn sort(records: &mut [&LogRecord], spec: &SortSpec) {
    records.sort_by(|a, b| match spec.direction {
        SortDirection::Asc => compare_by(a, b, spec.field),
        SortDirection::Desc => compare_by(b, a, spec.field),
    });
}

/// Slice `[(page-1)*n, page*n)`. Pages past the end give an empty slice.
pub fn paginate<T>(items: &[T], page: PageNumber, items_per_page: ItemsPerPage) -> &[T] {
    let per_page = items_per_page.get();
    let Some(start) = (page.get() - 1).checked_mul(per_page) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

// ===== Filter options =====

/// Sorted, de-duplicated users, for the user filter picker.
pub fn distinct_users(records: &[LogRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.user().as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted, de-duplicated actions, for the action filter picker.
pub fn distinct_actions(records: &[LogRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.action().as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
