//! # Navigation
//!
//! A stack of pages tracking where the user is.
//!
//! ```text
//!   push(Tags)         push(TagRoutes{pets})    pop()
//! [Menu] ──────► [Menu, Tags] ──────► [Menu, Tags, TagRoutes] ──────► [Menu, Tags]
//!
//! breadcrumbs: apinav > tags > pets
//! ```
//!
//! The root page is never removed, so `current()` always has an answer.
//! The stack knows nothing about the document; it only records the path.

use std::fmt;

pub const APP_NAME: &str = "apinav";

/// Every screen the browser can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Menu,
    Info,
    Tags,
    TagRoutes { tag: String },
    Paths,
    Operation { operation_id: String },
    HelpMenu,
    Help,
    About,
}

impl Page {
    /// Label shown for this page in the breadcrumb trail.
    pub fn crumb(&self) -> &str {
        match self {
            Page::Menu => APP_NAME,
            Page::Info => "info",
            Page::Tags => "tags",
            Page::TagRoutes { tag } => tag,
            Page::Paths => "paths",
            Page::Operation { operation_id } if operation_id.is_empty() => "operation",
            Page::Operation { operation_id } => operation_id,
            Page::HelpMenu => "help",
            Page::Help => "keys",
            Page::About => "about",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.crumb())
    }
}

#[derive(Debug, Clone)]
pub struct PageStack {
    pages: Vec<Page>,
}

impl Default for PageStack {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStack {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::Menu],
        }
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Remove the top page. Returns `None` and leaves the stack alone when
    /// only the root is left.
    pub fn pop(&mut self) -> Option<Page> {
        if self.pages.len() > 1 {
            self.pages.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> &Page {
        // Never empty: the root is pushed in new() and pop() refuses to remove it.
        &self.pages[self.pages.len() - 1]
    }

    pub fn breadcrumbs(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.crumb().to_string()).collect()
    }

    /// Number of pages, root included.
    pub fn depth(&self) -> usize {
        self.pages.len()
    }

    pub fn is_root(&self) -> bool {
        self.pages.len() == 1
    }
}
