//! Plain-text rendering of a [`ViewSnapshot`].
//!
//! The output is what the CLI prints: a controls summary, then either a
//! loading skeleton, a failure message, an empty-state message, or the
//! record table followed by the page status and pagination line.

use crate::model::LogRecord;
use crate::pagination::PageLink;
use crate::query::Outcome;
use crate::state::ViewSnapshot;
use crate::view_state::{PageNumber, SortDirection, SortField, SortSpec, ViewState};
use unicode_width::UnicodeWidthStr;

/// Shown while a load is outstanding.
pub const LOADING_MESSAGE: &str = "Loading logs…";

/// Shown for the simulated `error` mode.
pub const ERROR_MESSAGE: &str = "Failed to load logs. Something went wrong while fetching the data.";

/// Shown when nothing matches, or for the simulated `empty` mode.
pub const EMPTY_MESSAGE: &str = "No logs found. Try adjusting or clearing the filters.";

const SKELETON_ROW: &str = "░░░░░░░░░░░░░░░░░░░  ░░░░░  ░░░░░░  ░░░░░░░░░░░░░░";
const SKELETON_ROWS: usize = 3;
const COLUMN_GAP: &str = "  ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a snapshot as plain text, one line per row, no trailing newline.
pub fn render(snapshot: &ViewSnapshot) -> String {
    let mut lines = vec![render_controls(&snapshot.view)];

    if snapshot.in_flight {
        lines.push(LOADING_MESSAGE.to_string());
        lines.extend((0..SKELETON_ROWS).map(|_| SKELETON_ROW.to_string()));
        return lines.join("\n");
    }

    match &snapshot.outcome {
        Outcome::Failed => lines.push(ERROR_MESSAGE.to_string()),
        Outcome::Empty | Outcome::Loading => lines.push(EMPTY_MESSAGE.to_string()),
        Outcome::Page(page) => {
            if page.records.is_empty() {
                lines.push(EMPTY_MESSAGE.to_string());
            } else {
                lines.extend(render_table(&page.records, snapshot.view.sort.as_ref()));
            }
            if page.total_pages > 0 {
                lines.push(render_status(
                    snapshot.view.page,
                    page.total_pages,
                    page.total_matches,
                ));
                lines.push(render_page_links(&snapshot.page_links, snapshot.view.page));
            }
        }
    }

    lines.join("\n")
}

/// One-line summary of the active filters, sort and page size.
pub fn render_controls(view: &ViewState) -> String {
    let sort = match &view.sort {
        Some(spec) => format!("{} {}", spec.field.as_str(), spec.direction.as_str()),
        None => "none".to_string(),
    };
    format!(
        "user: {} · action: {} · sort: {} · {} per page",
        view.user_filter.as_deref().unwrap_or("all"),
        view.action_filter.as_deref().unwrap_or("all"),
        sort,
        view.items_per_page,
    )
}

/// `Page p of n · m matching records`.
pub fn render_status(page: PageNumber, total_pages: usize, total_matches: usize) -> String {
    let noun = if total_matches == 1 { "record" } else { "records" };
    format!(
        "Page {} of {} · {} matching {}",
        page, total_pages, total_matches, noun
    )
}

/// `Pages: 1 … 4 [5] 6 … 10`, current page bracketed.
pub fn render_page_links(links: &[PageLink], current: PageNumber) -> String {
    let items: Vec<String> = links
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current.get() => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect();
    format!("Pages: {}", items.join(" "))
}

fn header_label(field: SortField, title: &str, sort: Option<&SortSpec>) -> String {
    match sort {
        Some(spec) if spec.field == field => match spec.direction {
            SortDirection::Asc => format!("{} ↑", title),
            SortDirection::Desc => format!("{} ↓", title),
        },
        _ => title.to_string(),
    }
}

/// Fixed-width table with a header row. Columns are padded to display
/// width; the last column is not padded.
pub fn render_table(records: &[LogRecord], sort: Option<&SortSpec>) -> Vec<String> {
    let headers = [
        header_label(SortField::Timestamp, "TIMESTAMP", sort),
        header_label(SortField::User, "USER", sort),
        header_label(SortField::Action, "ACTION", sort),
        header_label(SortField::Resource, "RESOURCE", sort),
    ];
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.timestamp().format(TIMESTAMP_FORMAT).to_string(),
                r.user().to_string(),
                r.action().to_string(),
                r.resource().to_string(),
            ]
        })
        .collect();

    let mut widths = headers.clone().map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    std::iter::once(&headers)
        .chain(rows.iter())
        .map(|cells| format_row(cells, &widths))
        .collect()
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        if i + 1 < cells.len() {
            // Pad by display width; `{:<n}` counts chars.
            line.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.width())));
        }
    }
    line.trim_end().to_string()
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
