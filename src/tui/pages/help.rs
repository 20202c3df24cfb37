//! Key bindings page.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::heading;
use crate::tui::theme::Theme;

const KEY_WIDTH: usize = 16;

const NAVIGATION: [(&str, &str); 6] = [
    ("Enter", "Open the selected entry"),
    ("Backspace", "Go back to the previous page"),
    ("Up / k", "Move up or scroll up"),
    ("Down / j", "Move down or scroll down"),
    ("PgUp / PgDn", "Move by a page"),
    ("Home / End", "Jump to the first or last entry"),
];

const FILTERING: [(&str, &str); 4] = [
    ("/", "Start filtering the list"),
    ("Enter", "Keep the filter and return to the list"),
    ("Esc", "Clear the filter"),
    ("Backspace", "Delete a filter character while typing"),
];

const GENERAL: [(&str, &str); 1] = [("Ctrl+C", "Quit")];

pub fn help_text(theme: &Theme) -> Text<'static> {
    let mut lines = Vec::new();
    for (i, (title, keys)) in [
        ("Navigation", &NAVIGATION[..]),
        ("Filtering lists", &FILTERING[..]),
        ("General", &GENERAL[..]),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(heading(title, theme));
        lines.extend(keys.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<width$}", width = KEY_WIDTH),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        }));
    }
    Text::from(lines)
}
