//! Rows for route lists (one tag's routes, or every path).
//!
//! ```text
//! GET     /pets/{petId}
//!   Info for a pet
//! ```

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::document::Route;
use crate::tui::components::ListRow;
use crate::tui::theme::Theme;

/// Width of the method column; fits `OPTIONS`.
const METHOD_WIDTH: usize = 8;

pub fn row(route: &Route, theme: &Theme) -> ListRow {
    let path_style = if route.deprecated {
        theme.deprecated_style()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let title = Line::from(vec![
        Span::styled(
            format!("{:<width$}", route.method, width = METHOD_WIDTH),
            theme.method_style(&route.method),
        ),
        Span::styled(route.path.clone(), path_style),
    ]);

    let mut description = route.summary.clone();
    if route.deprecated {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str("(deprecated)");
    }

    ListRow::new(route.operation_id.clone(), title, description)
}

pub fn rows<'a>(routes: impl IntoIterator<Item = &'a Route>, theme: &Theme) -> Vec<ListRow> {
    routes.into_iter().map(|r| row(r, theme)).collect()
}
