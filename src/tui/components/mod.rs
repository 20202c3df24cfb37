//! # TUI Components
//!
//! Reusable widgets shared by every page.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: breadcrumb trail of the page stack
//! - `StatusBar`: source file name and page status
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components whose state lives in the page table and that emit events:
//! - `FilterList`: selectable, filterable list (menus, tags, routes)
//! - `TextView`: scrollable wrapped text (info, operation, help)
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── filter_list.rs   (list + inline filter)
//! ├── status_bar.rs    (two-line footer)
//! ├── text_view.rs     (scrollable text)
//! └── title_bar.rs     (breadcrumbs)
//! ```

pub mod filter_list;
pub mod status_bar;
pub mod text_view;
pub mod title_bar;

pub use filter_list::{FilterList, FilterListState, ListEvent, ListRow};
pub use status_bar::StatusBar;
pub use text_view::{TextView, TextViewState};
pub use title_bar::TitleBar;
