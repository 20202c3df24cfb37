//! # StatusBar Component
//!
//! Two-line footer: the source file name on an accent bar, then the
//! current page's status (`3/12 items`, `Filter: pet_`, key hints).

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct StatusBar<'a> {
    pub file_name: &'a str,
    pub status: &'a str,
    pub accent: Color,
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [file_area, status_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let bar = Style::default()
            .fg(Color::Black)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Line::from(Span::styled(format!(" {} ", self.file_name), bar)),
            file_area,
        );
        frame.render_widget(
            Line::from(Span::styled(
                format!(" {}", self.status),
                Style::default().fg(Color::DarkGray),
            )),
            status_area,
        );
    }
}
