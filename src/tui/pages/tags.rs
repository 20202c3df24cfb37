//! Rows for the tag list. Tags without routes are left out.

use ratatui::text::{Line, Span};

use crate::core::document::Document;
use crate::tui::components::ListRow;
use crate::tui::theme::Theme;

pub fn rows(doc: &Document, theme: &Theme) -> Vec<ListRow> {
    doc.non_empty_tags()
        .map(|tag| {
            let count = doc.routes_for_tag(&tag.name).len();
            let title = Line::from(vec![
                Span::styled(tag.name.clone(), theme.accent_style()),
                Span::raw(format!(" ({count})")),
            ]);
            ListRow::new(tag.name.clone(), title, first_line(&tag.description))
        })
        .collect()
}

/// Tag descriptions are markdown; the list only has room for the first line.
fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().trim().to_string()
}
