//! # TitleBar Component
//!
//! Top line showing the breadcrumb trail of the page stack:
//!
//! ```text
//! apinav > tags > pets > listPets
//! ```
//!
//! Purely presentational: the crumbs come from `PageStack::breadcrumbs()`
//! and the last one, the current page, is drawn in the accent colour.
//! When the trail is wider than the terminal the oldest crumbs are
//! replaced by `…` so the current page stays visible.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub const CRUMB_SEPARATOR: &str = " > ";

pub struct TitleBar {
    pub crumbs: Vec<String>,
    pub accent: Color,
}

impl TitleBar {
    pub fn new(crumbs: Vec<String>, accent: Color) -> Self {
        Self { crumbs, accent }
    }

    /// Crumbs that fit in `width` columns, oldest dropped first.
    fn visible_crumbs(&self, width: usize) -> (bool, &[String]) {
        let total = |crumbs: &[String]| -> usize {
            crumbs.iter().map(|c| c.width()).sum::<usize>()
                + CRUMB_SEPARATOR.len() * crumbs.len().saturating_sub(1)
        };
        let mut start = 0;
        while start + 1 < self.crumbs.len() {
            let elided = if start > 0 { 1 + CRUMB_SEPARATOR.len() } else { 0 };
            if total(&self.crumbs[start..]) + elided <= width {
                break;
            }
            start += 1;
        }
        (start > 0, &self.crumbs[start..])
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (elided, crumbs) = self.visible_crumbs(area.width as usize);
        let dim = Style::default().fg(Color::DarkGray);
        let current = Style::default().fg(self.accent).add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        if elided {
            spans.push(Span::styled("…", dim));
            spans.push(Span::styled(CRUMB_SEPARATOR, dim));
        }
        let last = crumbs.len().saturating_sub(1);
        for (i, crumb) in crumbs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(CRUMB_SEPARATOR, dim));
            }
            let style = if i == last { current } else { Style::default() };
            spans.push(Span::styled(crumb.clone(), style));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
