//! Record list renderer.
//!
//! Renders the derived view either as multi-line cards or as a table with one
//! row per record. Every record is anchored at its first line so the scroll
//! anchor can find it.

use crate::app::modes::ViewMode;
use crate::ui::helpers::{render_highlighted_text, title_case, truncate};
use crate::ui::renderer::RenderedPage;
use crate::ui::viewmodel::DisplayItem;

const COMPANY_COLUMN_WIDTH: usize = 30;
const DATE_COLUMN_WIDTH: usize = 14;
const STATUS_COLUMN_WIDTH: usize = 13;

/// Renders all records in the given presentation.
pub fn render_records(page: &mut RenderedPage, view_mode: ViewMode, items: &[DisplayItem], cols: usize) {
    match view_mode {
        ViewMode::Card => {
            for item in items {
                render_card(page, item, cols);
            }
        }
        ViewMode::List => {
            render_table_headers(page);
            for item in items {
                render_table_row(page, item, cols);
            }
        }
    }
}

/// Renders one record as a card.
///
/// # Layout
///
/// ```text
/// ACME [Corp]                                     Pending
///   Applied Jan 5, 2024 · Email · hr@acme.com
///   Referred by a friend
/// [blank line]
/// ```
///
/// The status is right-aligned on the title line; the contact and notes lines
/// are omitted when empty.
fn render_card(page: &mut RenderedPage, item: &DisplayItem, cols: usize) {
    page.mark(&item.id);

    let status_width = item.status.chars().count();
    let title_width = cols.saturating_sub(status_width + 1);
    let title = truncate(&item.company_name, title_width);
    let title_len = title.chars().count();
    let highlighted = render_highlighted_text(&title, &visible_ranges(item, &title));
    let gap = cols.saturating_sub(title_len + status_width).max(1);
    page.push(format!("{highlighted}{}{}", " ".repeat(gap), item.status));

    let mut details = vec![format!("Applied {}", item.applied_on)];
    if let Some(application_type) = &item.application_type {
        details.push(title_case(application_type));
    }
    if let Some(contact) = item.contact.as_deref().filter(|c| !c.is_empty()) {
        details.push(contact.to_string());
    }
    page.push(truncate(&format!("  {}", details.join(" \u{b7} ")), cols));

    if let Some(notes) = item.notes.as_deref().filter(|n| !n.is_empty()) {
        page.push(truncate(&format!("  {notes}"), cols));
    }

    page.blank();
}

/// Renders the table column headers.
fn render_table_headers(page: &mut RenderedPage) {
    page.push(format!(
        "{:<COMPANY_COLUMN_WIDTH$} {:<DATE_COLUMN_WIDTH$} {:<STATUS_COLUMN_WIDTH$} TYPE",
        "COMPANY", "APPLIED", "STATUS"
    ));
}

/// Renders one record as a table row.
///
/// The company column is padded to its fixed width measured without the
/// highlight markers, so columns stay aligned while searching.
fn render_table_row(page: &mut RenderedPage, item: &DisplayItem, cols: usize) {
    page.mark(&item.id);

    let company = truncate(&item.company_name, COMPANY_COLUMN_WIDTH);
    let padding = COMPANY_COLUMN_WIDTH.saturating_sub(company.chars().count());
    let highlighted = render_highlighted_text(&company, &visible_ranges(item, &company));

    let application_type = item.application_type.as_deref().map(title_case).unwrap_or_default();
    let line = format!(
        "{highlighted}{} {:<DATE_COLUMN_WIDTH$} {:<STATUS_COLUMN_WIDTH$} {application_type}",
        " ".repeat(padding),
        item.applied_on,
        item.status,
    );
    page.push(truncate(&line, cols + 2 * item.highlight_ranges.len()));
}

/// Highlight ranges that still fall inside the (possibly truncated) `shown` text.
fn visible_ranges(item: &DisplayItem, shown: &str) -> Vec<(usize, usize)> {
    let limit = if shown.chars().count() < item.company_name.chars().count() {
        shown.chars().count().saturating_sub(3)
    } else {
        shown.chars().count()
    };

    item.highlight_ranges
        .iter()
        .filter(|(start, _)| *start < limit)
        .map(|&(start, end)| (start, end.min(limit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;

    fn item(name: &str, ranges: Vec<(usize, usize)>) -> DisplayItem {
        DisplayItem {
            id: RecordId::from("1"),
            company_name: name.to_string(),
            highlight_ranges: ranges,
            applied_on: "Jan 5, 2024".to_string(),
            status: "Pending".to_string(),
            application_type: Some("job portal".to_string()),
            contact: None,
            notes: Some("Referred".to_string()),
        }
    }

    #[test]
    fn card_shows_status_type_and_notes() {
        let mut page = RenderedPage::default();
        render_records(&mut page, ViewMode::Card, &[item("ACME Corp", vec![(5, 9)])], 60);

        let lines = page.lines();
        assert!(lines[0].starts_with("ACME [Corp]"));
        assert!(lines[0].ends_with("Pending"));
        assert_eq!(lines[1], "  Applied Jan 5, 2024 \u{b7} Job Portal");
        assert_eq!(lines[2], "  Referred");
        assert_eq!(page.anchor(&RecordId::from("1")), Some(0));
    }

    #[test]
    fn table_columns_stay_aligned_with_highlights() {
        let mut page = RenderedPage::default();
        render_records(
            &mut page,
            ViewMode::List,
            &[item("ACME Corp", vec![(0, 4)])],
            120,
        );

        let row = &page.lines()[1];
        assert!(row.starts_with("[ACME] Corp"));
        assert_eq!(row.find("Jan 5, 2024"), Some(COMPANY_COLUMN_WIDTH + 1 + 2));
        assert_eq!(page.anchor(&RecordId::from("1")), Some(1));
    }

    #[test]
    fn highlights_past_truncation_are_dropped() {
        let long = "Initech International Holdings Group";
        let shown = truncate(long, 20);
        let ranges = visible_ranges(&item(long, vec![(0, 7), (22, 35)]), &shown);
        assert_eq!(ranges, vec![(0, 7)]);
    }
}
