//! # TextView Component
//!
//! Scrollable, word-wrapped block of styled text for the detail pages
//! (info, operation, key help, about).
//!
//! The content height depends on the wrap width, so it is measured during
//! render and cached in the state; scroll events clamp against that cache.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Scroll position and the content it scrolls over.
/// Must be persisted in the page table.
#[derive(Default)]
pub struct TextViewState {
    pub text: Text<'static>,
    pub scroll_state: ScrollViewState,
    /// Wrapped content height from the last render.
    pub content_height: u16,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

/// Emitted when the user asks to leave the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackRequested;

impl TextViewState {
    pub fn new(text: Text<'static>) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    /// Replace the content and jump back to the top.
    pub fn set_text(&mut self, text: Text<'static>) {
        self.text = text;
        self.scroll_state = ScrollViewState::default();
        self.content_height = 0;
    }

    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// `12%`-style position for the status bar.
    pub fn status(&self) -> String {
        let max = self.max_offset();
        if max == 0 {
            return "All".to_string();
        }
        let y = self.scroll_state.offset().y.min(max);
        format!("{}%", u32::from(y) * 100 / u32::from(max))
    }
}

impl EventHandler for TextViewState {
    type Event = BackRequested;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<BackRequested> {
        match event {
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::Home => self.scroll_state.scroll_to_top(),
            TuiEvent::End => self.scroll_state.set_offset(Position {
                x: 0,
                y: self.max_offset(),
            }),
            TuiEvent::Backspace => return Some(BackRequested),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

/// Transient render wrapper.
pub struct TextView<'a> {
    state: &'a mut TextViewState,
}

impl<'a> TextView<'a> {
    pub fn new(state: &'a mut TextViewState) -> Self {
        Self { state }
    }
}

impl Component for TextView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let paragraph = Paragraph::new(self.state.text.clone()).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width).min(u16::MAX as usize) as u16;

        self.state.content_height = height;
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
