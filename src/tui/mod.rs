//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the pages,
//! and translates keyboard events into `core::action::NavEvent` values.
//!
//! This is the only module that knows about ratatui and crossterm; the
//! document model and the page stack underneath never see a terminal.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm ──► TuiEvent ──► Pages::handle_event(current page)
//!                                  │
//!                                  ▼ Option<NavEvent>
//!                            action::apply(stack)
//!                                  │ pushed?
//!                                  ▼
//!                            Pages::on_enter(new page)
//! ```
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after an event (key, mouse
//! scroll or resize). Between events it sleeps in `poll` for up to 250ms.
//! All pending events are drained before the next draw so that key repeat
//! doesn't queue up frames.

mod component;
mod components;
mod event;
pub mod markdown;
mod pages;
pub mod theme;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{NavEvent, apply};
use crate::core::config::ResolvedConfig;
use crate::core::document::Document;
use crate::core::navigation::PageStack;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::pages::Pages;
use crate::tui::theme::Theme;

const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of the document model)
pub struct TuiState {
    pub stack: PageStack,
    pub pages: Pages,
    pub theme: Theme,
}

impl TuiState {
    pub fn new(doc: &Document, theme: Theme) -> Self {
        Self {
            stack: PageStack::new(),
            pages: Pages::new(doc, &theme),
            theme,
        }
    }

    /// Apply a navigation event; a newly pushed page loads its content.
    pub fn navigate(&mut self, doc: &Document, event: NavEvent) {
        let pushes = event != NavEvent::GoBack;
        let popped = apply(&mut self.stack, event);
        if pushes {
            let page = self.stack.current().clone();
            debug!("entered page {} (depth {})", page, self.stack.depth());
            self.pages.on_enter(&page, doc, &self.theme);
        } else if let Some(page) = popped {
            debug!("left page {}", page);
        }
    }

    /// Route one event to the current page. Returns `true` when the user quits.
    pub fn handle_event(&mut self, doc: &Document, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::Quit => return true,
            // Text pages re-measure on the next draw
            TuiEvent::Resize => return false,
            _ => {}
        }
        let page = self.stack.current().clone();
        if let Some(nav) = self.pages.handle_event(&page, event) {
            self.navigate(doc, nav);
        }
        false
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture turns the scroll wheel into events
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(document: Document, config: &ResolvedConfig) -> std::io::Result<()> {
    let theme = Theme::from_config(&config.theme);
    let mut tui = TuiState::new(&document, theme);

    let mut terminal = ratatui::init();
    let result = {
        let _terminal_mode_guard = TerminalModeGuard::new()?;
        event_loop(&mut terminal, &document, &mut tui)
    };
    ratatui::restore();
    info!("apinav shutting down");
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    doc: &Document,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, doc, tui))?;
            needs_redraw = false;
        }

        let Some(first) = poll_event_timeout(IDLE_POLL)? else {
            continue;
        };
        needs_redraw = true;

        // Process first event + drain ALL pending events before next draw
        let mut next = Some(first);
        while let Some(event) = next {
            if tui.handle_event(doc, &event) {
                return Ok(());
            }
            next = poll_event_immediate()?;
        }
    }
}
