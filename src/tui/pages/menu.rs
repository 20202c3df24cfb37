//! Main menu and help menu entries.

use ratatui::text::Line;

use crate::core::action::NavEvent;
use crate::tui::components::ListRow;

const MAIN_MENU: [(&str, &str, &str); 4] = [
    ("info", "Info", "Title, version, contact and license"),
    ("tags", "Tags", "Operations grouped by tag"),
    ("paths", "Paths", "Every operation, ordered by path"),
    ("help", "Help", "Key bindings and about"),
];

const HELP_MENU: [(&str, &str, &str); 2] = [
    ("keys", "Help", "Key bindings"),
    ("about", "About", "Version and repository"),
];

fn rows(entries: &[(&'static str, &'static str, &'static str)]) -> Vec<ListRow> {
    entries
        .iter()
        .map(|(id, title, description)| ListRow::new(*id, Line::from(*title), *description))
        .collect()
}

pub fn main_menu_rows() -> Vec<ListRow> {
    rows(&MAIN_MENU)
}

pub fn help_menu_rows() -> Vec<ListRow> {
    rows(&HELP_MENU)
}

pub fn main_menu_event(id: &str) -> Option<NavEvent> {
    match id {
        "info" => Some(NavEvent::SelectInfoMenu),
        "tags" => Some(NavEvent::SelectTagMenu),
        "paths" => Some(NavEvent::SelectPathsMenu),
        "help" => Some(NavEvent::SelectHelpMenu),
        _ => None,
    }
}

pub fn help_menu_event(id: &str) -> Option<NavEvent> {
    match id {
        "keys" => Some(NavEvent::SelectHelp),
        "about" => Some(NavEvent::SelectAbout),
        _ => None,
    }
}
