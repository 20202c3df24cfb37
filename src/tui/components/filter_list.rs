//! # Filter List Component
//!
//! Selectable list with an inline text filter, shared by every list page.
//!
//! ```text
//!  Off ──'/'──► Editing ──Enter──► Applied
//!   ▲             │                  │
//!   └────Esc──────┴───────Esc────────┘
//! ```
//!
//! While `Editing`, typed characters and Backspace belong to the filter, so
//! Backspace never navigates back from that state.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilterListState` lives in the page table
//! - `FilterList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    /// Emitted on selection.
    pub id: String,
    pub title: Line<'static>,
    pub description: String,
    /// Text the filter matches against, compared case-insensitively.
    pub filter_text: String,
}

impl ListRow {
    pub fn new(id: impl Into<String>, title: Line<'static>, description: impl Into<String>) -> Self {
        let title_text: String = title.spans.iter().map(|s| s.content.as_ref()).collect();
        let description = description.into();
        Self {
            id: id.into(),
            filter_text: format!("{title_text} {description}"),
            title,
            description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Off,
    Editing,
    Applied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Selected(String),
    Back,
}

pub struct FilterListState {
    rows: Vec<ListRow>,
    filter: String,
    mode: FilterMode,
    /// Indexes into `rows` that pass the filter.
    visible: Vec<usize>,
    pub list_state: ListState,
}

impl FilterListState {
    pub fn new(rows: Vec<ListRow>) -> Self {
        let mut state = Self {
            rows,
            filter: String::new(),
            mode: FilterMode::Off,
            visible: Vec::new(),
            list_state: ListState::default(),
        };
        state.refilter();
        state
    }

    /// Swap in new rows, clearing the filter and selecting the first row.
    pub fn set_rows(&mut self, rows: Vec<ListRow>) {
        self.rows = rows;
        self.filter.clear();
        self.mode = FilterMode::Off;
        self.list_state = ListState::default();
        self.refilter();
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &ListRow> {
        self.visible.iter().map(|&i| &self.rows[i])
    }

    pub fn selected_row(&self) -> Option<&ListRow> {
        self.list_state
            .selected()
            .and_then(|i| self.visible.get(i))
            .map(|&i| &self.rows[i])
    }

    /// One-line summary for the status bar.
    pub fn status(&self) -> String {
        match self.mode {
            FilterMode::Editing => format!("Filter: {}_", self.filter),
            FilterMode::Applied => format!(
                "{} of {} items match \"{}\"",
                self.visible.len(),
                self.rows.len(),
                self.filter
            ),
            FilterMode::Off => match self.list_state.selected() {
                Some(i) => format!("{}/{} items", i + 1, self.visible.len()),
                None => "No items".to_string(),
            },
        }
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || row.filter_text.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        let selected = match (self.list_state.selected(), self.visible.len()) {
            (_, 0) => None,
            (Some(i), n) => Some(i.min(n - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
        self.mode = FilterMode::Off;
        self.refilter();
    }

    fn move_to(&mut self, index: usize) {
        if !self.visible.is_empty() {
            self.list_state.select(Some(index.min(self.visible.len() - 1)));
        }
    }

    fn move_by(&mut self, delta: isize) {
        let current = self.list_state.selected().unwrap_or(0);
        self.move_to(current.saturating_add_signed(delta));
    }

    fn handle_movement(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::PageUp => self.move_by(-(PAGE_STEP as isize)),
            TuiEvent::PageDown => self.move_by(PAGE_STEP as isize),
            TuiEvent::Home => self.move_to(0),
            TuiEvent::End => self.move_to(usize::MAX),
            _ => return false,
        }
        true
    }
}

impl EventHandler for FilterListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        if self.handle_movement(event) {
            return None;
        }

        if self.mode == FilterMode::Editing {
            match event {
                TuiEvent::InputChar(c) => {
                    self.filter.push(*c);
                    self.refilter();
                }
                TuiEvent::Backspace => {
                    self.filter.pop();
                    self.refilter();
                }
                TuiEvent::Submit => {
                    self.mode = if self.filter.is_empty() {
                        FilterMode::Off
                    } else {
                        FilterMode::Applied
                    };
                }
                TuiEvent::Escape => self.clear_filter(),
                _ => {}
            }
            return None;
        }

        match event {
            TuiEvent::InputChar('/') => {
                self.filter.clear();
                self.mode = FilterMode::Editing;
                self.refilter();
                None
            }
            TuiEvent::InputChar('k') => {
                self.move_by(-1);
                None
            }
            TuiEvent::InputChar('j') => {
                self.move_by(1);
                None
            }
            TuiEvent::Escape if self.mode == FilterMode::Applied => {
                self.clear_filter();
                None
            }
            TuiEvent::Submit => self
                .selected_row()
                .map(|row| ListEvent::Selected(row.id.clone())),
            TuiEvent::Backspace => Some(ListEvent::Back),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct FilterList<'a> {
    state: &'a mut FilterListState,
    accent: Color,
}

impl<'a> FilterList<'a> {
    pub fn new(state: &'a mut FilterListState, accent: Color) -> Self {
        Self { state, accent }
    }
}

impl Component for FilterList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let dim = Style::default().fg(Color::DarkGray);
        let items: Vec<ListItem> = self
            .state
            .visible_rows()
            .map(|row| {
                let mut lines = vec![row.title.clone()];
                if !row.description.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", row.description),
                        dim,
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().fg(self.accent).add_modifier(Modifier::BOLD));
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
