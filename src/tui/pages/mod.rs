//! # Pages
//!
//! One persistent state per screen, kept in a single table so a page
//! looks the same when the user comes back to it.
//!
//! ```text
//!   Page (from PageStack)          Pages
//!   ─────────────────────          ─────────────────────────────
//!   Menu / HelpMenu / Tags   ──►   FilterListState
//!   TagRoutes / Paths        ──►   FilterListState
//!   Info / Operation         ──►   TextViewState
//!   Help / About             ──►   TextViewState
//! ```
//!
//! Static content is built once in `Pages::new`. Pages that depend on a
//! parameter (`TagRoutes { tag }`, `Operation { operation_id }`) are
//! rebuilt by `on_enter` when they are pushed; a pop leaves the page below
//! untouched.

mod about;
mod help;
mod info;
mod menu;
mod operation;
mod routes;
mod tags;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::action::NavEvent;
use crate::core::document::Document;
use crate::core::navigation::Page;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{FilterList, FilterListState, ListEvent, TextView, TextViewState};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Bold accent section heading.
pub(crate) fn heading(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        theme.accent_style().add_modifier(Modifier::BOLD),
    ))
}

/// `Label: value`, or nothing when the value is empty.
pub(crate) fn field(label: &str, value: &str) -> Option<Line<'static>> {
    if value.is_empty() {
        return None;
    }
    Some(Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ]))
}

pub struct Pages {
    pub menu: FilterListState,
    pub help_menu: FilterListState,
    pub tags: FilterListState,
    pub tag_routes: FilterListState,
    pub paths: FilterListState,
    pub info: TextViewState,
    pub operation: TextViewState,
    pub help: TextViewState,
    pub about: TextViewState,
}

impl Pages {
    pub fn new(doc: &Document, theme: &Theme) -> Self {
        Self {
            menu: FilterListState::new(menu::main_menu_rows()),
            help_menu: FilterListState::new(menu::help_menu_rows()),
            tags: FilterListState::new(tags::rows(doc, theme)),
            tag_routes: FilterListState::new(vec![]),
            paths: FilterListState::new(routes::rows(doc.all_routes(), theme)),
            info: TextViewState::new(info::info_text(doc, theme)),
            operation: TextViewState::default(),
            help: TextViewState::new(help::help_text(theme)),
            about: TextViewState::new(about::about_text(theme)),
        }
    }

    /// Load the content of a freshly pushed page.
    pub fn on_enter(&mut self, page: &Page, doc: &Document, theme: &Theme) {
        match page {
            Page::TagRoutes { tag } => {
                self.tag_routes
                    .set_rows(routes::rows(doc.routes_for_tag(tag), theme));
            }
            Page::Operation { operation_id } => {
                let route = doc.find_route_by_operation_id(operation_id);
                self.operation
                    .set_text(operation::operation_text(operation_id, route, theme));
            }
            _ => {}
        }
    }

    pub fn handle_event(&mut self, page: &Page, event: &TuiEvent) -> Option<NavEvent> {
        match page {
            Page::Menu => list_nav(self.menu.handle_event(event), menu::main_menu_event),
            Page::HelpMenu => list_nav(self.help_menu.handle_event(event), menu::help_menu_event),
            Page::Tags => list_nav(self.tags.handle_event(event), |tag| {
                Some(NavEvent::SelectTag(tag.to_string()))
            }),
            Page::TagRoutes { .. } => list_nav(self.tag_routes.handle_event(event), select_operation),
            Page::Paths => list_nav(self.paths.handle_event(event), select_operation),
            Page::Info => self.info.handle_event(event).map(|_| NavEvent::GoBack),
            Page::Operation { .. } => self.operation.handle_event(event).map(|_| NavEvent::GoBack),
            Page::Help => self.help.handle_event(event).map(|_| NavEvent::GoBack),
            Page::About => self.about.handle_event(event).map(|_| NavEvent::GoBack),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        page: &Page,
        doc: &Document,
        theme: &Theme,
    ) {
        let accent = theme.accent;
        match page {
            Page::Menu => FilterList::new(&mut self.menu, accent).render(frame, area),
            Page::HelpMenu => FilterList::new(&mut self.help_menu, accent).render(frame, area),
            Page::Tags => FilterList::new(&mut self.tags, accent).render(frame, area),
            Page::TagRoutes { tag } => {
                let description = doc
                    .tags
                    .iter()
                    .find(|t| t.name == *tag)
                    .map(|t| t.description.lines().next().unwrap_or_default())
                    .unwrap_or_default();
                let list_area = if description.is_empty() {
                    area
                } else {
                    let [header, list] =
                        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
                    frame.render_widget(
                        Line::from(Span::styled(
                            description.to_string(),
                            Style::default().add_modifier(Modifier::ITALIC),
                        )),
                        header,
                    );
                    list
                };
                FilterList::new(&mut self.tag_routes, accent).render(frame, list_area);
            }
            Page::Paths => FilterList::new(&mut self.paths, accent).render(frame, area),
            Page::Info => TextView::new(&mut self.info).render(frame, area),
            Page::Operation { .. } => TextView::new(&mut self.operation).render(frame, area),
            Page::Help => TextView::new(&mut self.help).render(frame, area),
            Page::About => TextView::new(&mut self.about).render(frame, area),
        }
    }

    /// Footer text for the current page.
    pub fn status(&self, page: &Page) -> String {
        match page {
            Page::Menu => self.menu.status(),
            Page::HelpMenu => self.help_menu.status(),
            Page::Tags => self.tags.status(),
            Page::TagRoutes { .. } => self.tag_routes.status(),
            Page::Paths => self.paths.status(),
            Page::Info => self.info.status(),
            Page::Operation { .. } => self.operation.status(),
            Page::Help => self.help.status(),
            Page::About => self.about.status(),
        }
    }
}

fn list_nav(
    event: Option<ListEvent>,
    on_select: impl FnOnce(&str) -> Option<NavEvent>,
) -> Option<NavEvent> {
    match event? {
        ListEvent::Selected(id) => on_select(&id),
        ListEvent::Back => Some(NavEvent::GoBack),
    }
}

fn select_operation(id: &str) -> Option<NavEvent> {
    Some(NavEvent::SelectOperation(id.to_string()))
}
