//! # Core Application Logic
//!
//! The document model and the navigation engine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!   loader ──RawPathItem──► builder ──► Document (immutable)
//!                                          │ read-only
//!                                          ▼
//!   key press ──► TUI page ──NavEvent──► action::apply ──► PageStack
//! ```
//!
//! ## Modules
//!
//! - [`document`]: The `Document` and everything it holds
//! - [`builder`]: Raw path items → tag buckets → `Document`
//! - [`ordering`]: Total order over routes
//! - [`schema`]: Schema tree, `allOf` merging, display helpers
//! - [`navigation`]: The `PageStack`
//! - [`action`]: The `NavEvent` enum and `apply()`
//! - [`config`]: Layered configuration

pub mod action;
pub mod builder;
pub mod config;
pub mod document;
pub mod navigation;
pub mod ordering;
pub mod schema;
