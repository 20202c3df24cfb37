use crate::core::document::Document;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{StatusBar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Frame layout:
///
/// ```text
/// ┌──────────────────────────────────────┐
/// │ apinav > tags > pets                 │  breadcrumbs
/// ├──────────────────────────────────────┤
/// │                                      │
/// │ current page                         │
/// │                                      │
/// ├──────────────────────────────────────┤
/// │ petstore.yaml                        │  file bar
/// │ 2/3 items                            │  page status
/// └──────────────────────────────────────┘
/// ```
pub fn draw_ui(frame: &mut Frame, doc: &Document, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(2)]);
    let [title_area, main_area, status_area] = layout.areas(frame.area());

    TitleBar::new(tui.stack.breadcrumbs(), tui.theme.accent).render(frame, title_area);

    let page = tui.stack.current().clone();
    tui.pages
        .render(frame, main_area, &page, doc, &tui.theme);

    // Status is read after rendering; text pages measure their height while drawing
    let status = tui.pages.status(&page);
    StatusBar {
        file_name: &doc.meta.file_name,
        status: &status,
        accent: tui.theme.accent,
    }
    .render(frame, status_area);
}
