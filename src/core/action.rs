//! # Actions
//!
//! Everything a screen can ask the navigator to do becomes a `NavEvent`.
//! User picks "Tags" in the menu? That's `NavEvent::SelectTagMenu`.
//! User presses Backspace? That's `NavEvent::GoBack`.
//!
//! `apply()` turns one event into exactly one stack transition. Screens
//! never touch the stack, and the stack never sees these events.
//!
//! ```text
//! PageStack + NavEvent  →  apply()  →  PageStack'
//! ```

use log::debug;

use crate::core::navigation::{Page, PageStack};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    SelectInfoMenu,
    SelectTagMenu,
    SelectPathsMenu,
    SelectHelpMenu,
    SelectHelp,
    SelectAbout,
    SelectTag(String),
    SelectOperation(String),
    GoBack,
}

/// Apply one event. Returns the page popped by `GoBack`, if any.
pub fn apply(stack: &mut PageStack, event: NavEvent) -> Option<Page> {
    debug!("nav event {:?} at depth {}", event, stack.depth());
    let page = match event {
        NavEvent::GoBack => return stack.pop(),
        NavEvent::SelectInfoMenu => Page::Info,
        NavEvent::SelectTagMenu => Page::Tags,
        NavEvent::SelectPathsMenu => Page::Paths,
        NavEvent::SelectHelpMenu => Page::HelpMenu,
        NavEvent::SelectHelp => Page::Help,
        NavEvent::SelectAbout => Page::About,
        NavEvent::SelectTag(tag) => Page::TagRoutes { tag },
        NavEvent::SelectOperation(operation_id) => Page::Operation { operation_id },
    };
    stack.push(page);
    None
}
