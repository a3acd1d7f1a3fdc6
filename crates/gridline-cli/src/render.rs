//! Writing a `GridView` to the terminal

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use gridline_engine::{GridView, HeaderView, MatchSpan, SortDirection};

#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    /// Bracket filter matches inside cells
    pub highlight_matches: bool,
}

/// Render the current page as a table followed by the page footer
pub fn render_table(view: &GridView, options: TableOptions) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let multi_key = view.sort.len() > 1;
    let mut header = vec![Cell::new("#")];
    header.extend(view.headers.iter().map(|h| Cell::new(header_label(h, multi_key))));
    table.set_header(header);

    for row in &view.rows {
        let mut cells = vec![Cell::new(row.id)];
        cells.extend(row.cells.iter().map(|cell| {
            if options.highlight_matches {
                Cell::new(bracket_matches(&cell.display, &cell.highlights))
            } else {
                Cell::new(&cell.display)
            }
        }));
        table.add_row(cells);
    }

    format!("{table}\n{}", footer(view))
}

/// Render the whole view as pretty JSON
pub fn render_json(view: &GridView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

/// "page 2 of 5 (43 rows)"
pub fn footer(view: &GridView) -> String {
    let page = &view.page;
    let rows = if page.total_rows == 1 { "row" } else { "rows" };
    format!(
        "page {} of {} ({} {rows})",
        page.page, page.total_pages, page.total_rows
    )
}

fn header_label(header: &HeaderView, with_priority: bool) -> String {
    let arrow = match header.sort {
        Some(SortDirection::Ascending) => "▲",
        Some(SortDirection::Descending) => "▼",
        None => return header.title.clone(),
    };
    match header.sort_priority {
        Some(priority) if with_priority => format!("{} {arrow}{}", header.title, priority + 1),
        _ => format!("{} {arrow}", header.title),
    }
}

/// Wrap every span in `[` `]`; spans are sorted and disjoint
fn bracket_matches(text: &str, spans: &[MatchSpan]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 2);
    let mut pos = 0;
    for span in spans {
        let (Some(before), Some(matched)) = (text.get(pos..span.start), text.get(span.start..span.end))
        else {
            continue;
        };
        out.push_str(before);
        out.push('[');
        out.push_str(matched);
        out.push(']');
        pos = span.end;
    }
    out.push_str(text.get(pos..).unwrap_or_default());
    out
}
