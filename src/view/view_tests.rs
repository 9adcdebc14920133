//! Tests for the plain-text renderer.

use super::*;
use crate::source;
use crate::state::{ControllerOptions, ViewController};
use crate::view_state::{DataState, ItemsPerPage};
use std::time::{Duration, Instant};

// ===== Test Helpers =====

fn settled(query: &str) -> ViewSnapshot {
    let records = source::bundled().expect("bundled dataset parses");
    let options = ControllerOptions {
        latency: Duration::ZERO,
        ..ControllerOptions::default()
    };
    let mut controller = ViewController::new(records, options, query, Instant::now());
    controller.settle_all();
    controller.snapshot()
}

fn page(n: usize) -> PageNumber {
    PageNumber::new(n).unwrap()
}

// ===== render =====

#[test]
fn render_alice_newest_first() {
    let output = render(&settled("user=alice&sort=timestamp:desc"));

    insta::assert_snapshot!(output, @r"
user: alice · action: all · sort: timestamp desc · 10 per page
TIMESTAMP ↓          USER   ACTION  RESOURCE
2024-03-01 09:45:12  alice  logout  /auth/session
2024-03-01 08:50:47  alice  export  /reports/q1-usage.csv
2024-03-01 08:15:37  alice  update  /projects/atlas/settings
2024-03-01 08:05:43  alice  login   /auth/session
Page 1 of 1 · 4 matching records
Pages: [1]
");
}

#[test]
fn render_exports_sorted_by_action_keeps_dataset_order() {
    let output = render(&settled("action=export&sort=action:asc&items=2"));

    insta::assert_snapshot!(output, @r"
user: all · action: export · sort: action asc · 2 per page
TIMESTAMP            USER   ACTION ↑  RESOURCE
2024-03-01 08:22:30  dave   export    /reports/q1-usage.csv
2024-03-01 08:50:47  alice  export    /reports/q1-usage.csv
Page 1 of 2 · 3 matching records
Pages: [1] 2
");
}

#[test]
fn render_while_loading_shows_skeleton() {
    let records = source::bundled().unwrap();
    let controller = ViewController::new(
        records,
        ControllerOptions::default(),
        "user=alice",
        Instant::now(),
    );

    let output = render(&controller.snapshot());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], LOADING_MESSAGE);
    assert!(lines[2..].iter().all(|line| line.starts_with('░')));
}

#[test]
fn render_error_mode_shows_failure_message_only() {
    let output = render(&settled("data-state=error&user=alice"));
    assert_eq!(
        output,
        format!(
            "user: alice · action: all · sort: none · 10 per page\n{}",
            ERROR_MESSAGE
        )
    );
}

#[test]
fn render_empty_mode_shows_empty_message() {
    let output = render(&settled("data-state=empty"));
    assert!(output.ends_with(EMPTY_MESSAGE));
    assert!(!output.contains("Page "));
}

#[test]
fn render_loading_mode_stays_on_skeleton() {
    let snapshot = settled("data-state=loading");
    assert!(snapshot.in_flight);
    assert!(render(&snapshot).contains(LOADING_MESSAGE));
}

#[test]
fn render_no_matches_shows_empty_message_without_status() {
    let output = render(&settled("user=nobody"));
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["user: nobody · action: all · sort: none · 10 per page", EMPTY_MESSAGE]);
}

#[test]
fn render_out_of_range_page_keeps_status_and_links() {
    let output = render(&settled("page=9"));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[1], EMPTY_MESSAGE);
    assert_eq!(lines[2], "Page 9 of 3 · 23 matching records");
    assert_eq!(lines[3], "Pages: 1 … 3");
}

// ===== render_controls =====

#[test]
fn render_controls_defaults() {
    let view = ViewState::default();
    assert_eq!(
        render_controls(&view),
        "user: all · action: all · sort: none · 10 per page"
    );
}

#[test]
fn render_controls_ignores_data_state() {
    let view = ViewState {
        data_state: DataState::Error,
        items_per_page: ItemsPerPage::new(5).unwrap(),
        ..ViewState::default()
    };
    assert_eq!(
        render_controls(&view),
        "user: all · action: all · sort: none · 5 per page"
    );
}

// ===== render_status =====

#[test]
fn render_status_pluralizes_matches() {
    assert_eq!(render_status(page(2), 3, 23), "Page 2 of 3 · 23 matching records");
    assert_eq!(render_status(page(1), 1, 1), "Page 1 of 1 · 1 matching record");
}

// ===== render_page_links =====

#[test]
fn render_page_links_brackets_current_page() {
    let links = crate::pagination::build_page_index(5, 10);
    assert_eq!(render_page_links(&links, page(5)), "Pages: 1 … 3 4 [5] 6 7 … 10");
}

#[test]
fn render_page_links_out_of_range_brackets_nothing() {
    let links = crate::pagination::build_page_index(9, 3);
    assert_eq!(render_page_links(&links, page(9)), "Pages: 1 … 3");
}

// ===== render_table =====

#[test]
fn render_table_without_sort_has_plain_headers() {
    let lines = render_table(&[], None);
    assert_eq!(lines, vec!["TIMESTAMP  USER  ACTION  RESOURCE"]);
}

#[test]
fn render_table_marks_descending_column() {
    let sort = SortSpec::new(SortField::Resource, SortDirection::Desc);
    let lines = render_table(&[], Some(&sort));
    assert_eq!(lines, vec!["TIMESTAMP  USER  ACTION  RESOURCE ↓"]);
}

#[test]
fn render_table_pads_by_display_width() {
    use crate::model::{Action, UserId};
    use chrono::{TimeZone, Utc};

    let record = LogRecord::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        UserId::new("田中").unwrap(),
        Action::parse("view"),
        "/x",
    );

    assert_eq!(
        render_table(&[record], None),
        vec![
            "TIMESTAMP            USER  ACTION  RESOURCE",
            "2024-03-01 10:00:00  田中  view    /x",
        ]
    );
}
