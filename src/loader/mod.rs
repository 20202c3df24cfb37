//! # Loader
//!
//! Reads an OpenAPI 3 description from a file or an `http(s)` URL and
//! builds the [`Document`].
//!
//! ```text
//! SpecSource ──fetch──► text ──decode──► serde_json::Value
//!                                             │
//!                 DocumentSet::fetch_all ◄────┘   (external $refs, cached)
//!                          │
//!                 convert ─┴─► RawPathItems ──► build_document ──► Document
//! ```
//!
//! All network and file I/O happens here, before the UI starts.

pub mod convert;
pub mod refs;
pub mod source;

use std::fmt;

use log::info;

use crate::core::builder::build_document;
use crate::core::document::{Document, Meta};

pub use refs::DocumentSet;
pub use source::SpecSource;

#[derive(Debug)]
pub enum LoadError {
    /// File could not be read.
    Io(String),
    /// Network failure or non-2xx response.
    Http(String),
    /// Neither valid JSON nor valid YAML.
    Decode(String),
    /// A `$ref` that points nowhere.
    Reference(String),
    /// Decoded fine but is not an OpenAPI 3 description.
    Invalid(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "read error: {msg}"),
            LoadError::Http(msg) => write!(f, "HTTP error: {msg}"),
            LoadError::Decode(msg) => write!(f, "decode error: {msg}"),
            LoadError::Reference(msg) => write!(f, "unresolvable reference: {msg}"),
            LoadError::Invalid(msg) => write!(f, "invalid description: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Load, resolve and build.
pub async fn load(source: &SpecSource) -> Result<Document, LoadError> {
    let client = reqwest::Client::new();
    load_with_client(source, &client).await
}

pub async fn load_with_client(
    source: &SpecSource,
    client: &reqwest::Client,
) -> Result<Document, LoadError> {
    info!("Loading description from {source}");
    let text = source.fetch(client).await?;
    let value = source.decode(&text)?;
    let docs = DocumentSet::fetch_all(source.clone(), value, client).await?;
    if docs.len() > 1 {
        info!("Resolved {} referenced documents", docs.len() - 1);
    }

    let converted = convert::convert(&docs)?;
    let meta = Meta {
        file_name: source.file_name(),
        full_path: source.key(),
    };
    let document = build_document(
        meta,
        converted.info,
        converted.path_items,
        converted.tags,
        converted.security_schemes,
    );
    info!(
        "Loaded {:?}: {} routes in {} tags",
        document.info.title,
        document.route_count(),
        document.tags.len()
    );
    Ok(document)
}
