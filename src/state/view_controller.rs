//! View controller: location, in-flight flag and simulated loads.
//!
//! The query string is the only view state. Every navigation replaces the
//! location, raises the in-flight flag and schedules a load that settles
//! after the configured latency. Time is passed in by the caller, so the
//! controller itself never sleeps.

use crate::model::LogRecord;
use crate::pagination::{self, PageLink};
use crate::query::{self, Outcome, PageResult};
use crate::view_state::{
    DataState, ItemsPerPage, PageNumber, ParamKey, QueryString, SortDirection, SortField,
    SortSpec, ViewDefaults, ViewState,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

// ===== StalePolicy =====

/// What to do with a load that settles after a newer one was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Drop superseded loads; only the latest one updates the view.
    #[default]
    Discard,
    /// Every load that settles overwrites the view and clears the
    /// in-flight flag, even when a newer load is still pending.
    LastSettledWins,
}

impl StalePolicy {
    /// Parse a policy name as written in config.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "discard" => Some(Self::Discard),
            "last-settled-wins" => Some(Self::LastSettledWins),
            _ => None,
        }
    }
}

// ===== ControllerOptions =====

/// Tunables for a [`ViewController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Simulated network latency applied to every load.
    pub latency: Duration,
    /// Handling of superseded loads.
    pub stale_policy: StalePolicy,
    /// Defaults for absent query parameters.
    pub defaults: ViewDefaults,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(500),
            stale_policy: StalePolicy::default(),
            defaults: ViewDefaults::default(),
        }
    }
}

// ===== ViewSnapshot =====

/// Everything a renderer needs, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Current location query string.
    pub query: String,
    /// View state decoded from `query`.
    pub view: ViewState,
    /// Whether a load is outstanding.
    pub in_flight: bool,
    /// Most recently applied load outcome.
    pub outcome: Outcome,
    /// Pagination control for `view.page` and the outcome's page count.
    pub page_links: Vec<PageLink>,
    /// Values offered by the user filter picker.
    pub user_options: Vec<String>,
    /// Values offered by the action filter picker.
    pub action_options: Vec<String>,
}

// ===== ViewController =====

#[derive(Debug, Clone)]
struct PendingLoad {
    seq: u64,
    due: Instant,
    view: ViewState,
    records: Arc<[LogRecord]>,
}

/// Owns the location and drives loads for it.
#[derive(Debug, Clone)]
pub struct ViewController {
    records: Arc<[LogRecord]>,
    location: QueryString,
    options: ControllerOptions,
    in_flight: bool,
    outcome: Outcome,
    pending: Vec<PendingLoad>,
    /// Sequence number of the most recently scheduled load.
    issued: u64,
    /// Sequence number of the load currently displayed.
    applied: Option<u64>,
}

impl ViewController {
    /// Create a controller at `initial_query` and schedule its first load.
    pub fn new(
        records: Arc<[LogRecord]>,
        options: ControllerOptions,
        initial_query: &str,
        now: Instant,
    ) -> Self {
        let mut controller = Self {
            records,
            location: QueryString::parse(initial_query),
            options,
            in_flight: false,
            outcome: Outcome::Page(PageResult::empty()),
            pending: Vec::new(),
            issued: 0,
            applied: None,
        };
        controller.schedule(now);
        controller
    }

    // ===== Accessors =====

    /// Current location.
    pub fn location(&self) -> &QueryString {
        &self.location
    }

    /// View state decoded from the current location.
    pub fn view_state(&self) -> ViewState {
        self.location.view_state(&self.options.defaults)
    }

    /// The full record collection.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Whether a load is outstanding.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Most recently applied outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Controller options.
    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Deadline of the earliest pending load.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|load| load.due).min()
    }

    /// Number of loads scheduled but not yet settled.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    // ===== Navigation =====

    /// Replace the whole location, e.g. when opening a shared link.
    pub fn navigate_to(&mut self, query: &str, now: Instant) {
        self.replace_location(QueryString::parse(query), now);
    }

    /// Set one parameter, keeping every other.
    pub fn set_param(&mut self, key: ParamKey, value: &str, now: Instant) {
        let next = self.location.with(key.as_str(), value);
        self.replace_location(next, now);
    }

    /// Remove the listed parameters, keeping every other.
    pub fn clear_params(&mut self, keys: &[ParamKey], now: Instant) {
        let names: Vec<&str> = keys.iter().map(ParamKey::as_str).collect();
        let next = self.location.without(names.as_slice());
        self.replace_location(next, now);
    }

    /// Filter by user, or clear the user filter with `None`.
    pub fn filter_user(&mut self, user: Option<&str>, now: Instant) {
        match user {
            Some(user) => self.set_param(ParamKey::User, user, now),
            None => self.clear_params(&[ParamKey::User], now),
        }
    }

    /// Filter by action, or clear the action filter with `None`.
    pub fn filter_action(&mut self, action: Option<&str>, now: Instant) {
        match action {
            Some(action) => self.set_param(ParamKey::Action, action, now),
            None => self.clear_params(&[ParamKey::Action], now),
        }
    }

    /// Column-header click: ascending first, then flip on the same field.
    pub fn toggle_sort(&mut self, field: SortField, now: Instant) {
        let direction = match self.view_state().sort {
            Some(current) if current.field == field => current.direction.reversed(),
            _ => SortDirection::Asc,
        };
        let spec = SortSpec::new(field, direction);
        self.set_param(ParamKey::Sort, &spec.to_param(), now);
    }

    /// Jump to a page.
    pub fn go_to_page(&mut self, page: PageNumber, now: Instant) {
        self.set_param(ParamKey::Page, &page.to_string(), now);
    }

    /// Step forward one page. Returns `false` on the last page.
    pub fn next_page(&mut self, now: Instant) -> bool {
        let current = self.view_state().page.get();
        let target = pagination::next_page(current, self.outcome.total_pages())
            .and_then(PageNumber::new);
        match target {
            Some(page) => {
                self.go_to_page(page, now);
                true
            }
            None => false,
        }
    }

    /// Step back one page. Returns `false` on the first page.
    pub fn previous_page(&mut self, now: Instant) -> bool {
        let current = self.view_state().page.get();
        let target = pagination::previous_page(current, self.outcome.total_pages())
            .and_then(PageNumber::new);
        match target {
            Some(page) => {
                self.go_to_page(page, now);
                true
            }
            None => false,
        }
    }

    /// Change the page size and return to the first page.
    pub fn set_items_per_page(&mut self, items: ItemsPerPage, now: Instant) {
        let next = self
            .location
            .with(ParamKey::Items.as_str(), &items.to_string())
            .without(&[ParamKey::Page.as_str()]);
        self.replace_location(next, now);
    }

    /// Select a simulated response mode.
    pub fn set_data_state(&mut self, state: DataState, now: Instant) {
        self.set_param(ParamKey::DataState, state.as_str(), now);
    }

    /// Drop filters, sort and page, keeping page size and data state.
    pub fn clear_filters(&mut self, now: Instant) {
        self.clear_params(
            &[ParamKey::User, ParamKey::Action, ParamKey::Sort, ParamKey::Page],
            now,
        );
    }

    /// Swap the record collection and recompute.
    pub fn replace_records(&mut self, records: Arc<[LogRecord]>, now: Instant) {
        self.records = records;
        self.schedule(now);
    }

    // ===== Loads =====

    /// Settle every load whose deadline has passed. Returns how many were
    /// applied to the view.
    pub fn tick(&mut self, now: Instant) -> usize {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|load| load.due <= now);
        self.pending = waiting;
        due.sort_by_key(|load| (load.due, load.seq));

        let mut applied = 0;
        for load in due {
            if self.options.stale_policy == StalePolicy::Discard && load.seq != self.issued {
                debug!(seq = load.seq, latest = self.issued, "Discarding superseded load");
                continue;
            }
            self.outcome = query::resolve(&load.records, &load.view);
            self.in_flight = self.outcome.keeps_in_flight();
            self.applied = Some(load.seq);
            applied += 1;
            debug!(
                seq = load.seq,
                total_pages = self.outcome.total_pages(),
                in_flight = self.in_flight,
                "Load settled"
            );
        }
        applied
    }

    /// Settle everything regardless of deadlines.
    pub fn settle_all(&mut self) -> usize {
        match self.pending.iter().map(|load| load.due).max() {
            Some(latest) => self.tick(latest),
            None => 0,
        }
    }

    /// Sequence number of the load currently displayed.
    pub fn applied_seq(&self) -> Option<u64> {
        self.applied
    }

    /// Capture the state a renderer needs.
    pub fn snapshot(&self) -> ViewSnapshot {
        let view = self.view_state();
        let page_links = pagination::build_page_index(view.page.get(), self.outcome.total_pages());
        ViewSnapshot {
            query: self.location.to_string(),
            view,
            in_flight: self.in_flight,
            outcome: self.outcome.clone(),
            page_links,
            user_options: query::distinct_users(&self.records),
            action_options: query::distinct_actions(&self.records),
        }
    }

    fn replace_location(&mut self, next: QueryString, now: Instant) {
        debug!(from = %self.location, to = %next, "Navigating");
        self.location = next;
        self.schedule(now);
    }

    fn schedule(&mut self, now: Instant) {
        self.issued += 1;
        self.in_flight = true;
        let due = now + self.options.latency;
        trace!(seq = self.issued, latency = ?self.options.latency, "Scheduling load");
        self.pending.push(PendingLoad {
            seq: self.issued,
            due,
            view: self.view_state(),
            records: Arc::clone(&self.records),
        });
    }
}

#[cfg(test)]
#[path = "view_controller_tests.rs"]
mod tests;
