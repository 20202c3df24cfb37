//! # Document Model
//!
//! The immutable, queryable view of one API description.
//!
//! ```text
//! Document
//! ├── meta: Meta                        // where it was loaded from
//! ├── info: Info                        // title, version, contact, ...
//! ├── routes_by_tag: tag → [Route]      // each bucket sorted by ordering::compare_routes
//! ├── tags: [Tag]                       // declared + synthesized, by name, untagged last
//! └── security_schemes: [SecurityScheme]
//! ```
//!
//! Built once by [`Document::new`] (see `builder` for the raw-to-route
//! steps) and only read afterwards. Lookups never allocate routes.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::warn;

use crate::core::ordering::sort_routes;
use crate::core::schema::Schema;

/// Bucket name for routes that declare no tag. Always listed last.
pub const UNTAGGED_TAG: &str = "<<untagged>>";

pub type RoutesByTag = BTreeMap<String, Vec<Route>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    /// Last path segment of the source, shown in the status bar.
    pub file_name: String,
    /// Absolute path or full URI.
    pub full_path: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub openapi_version: String,
    pub title: String,
    pub description: String,
    pub terms_of_service: String,
    pub contact_name: String,
    pub contact_url: String,
    pub contact_email: String,
    pub license_name: String,
    pub license_url: String,
    pub version: String,
    pub external_docs_description: String,
    pub external_docs_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn is_untagged(&self) -> bool {
        self.name == UNTAGGED_TAG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub description: String,
    pub required: bool,
    pub deprecated: bool,
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaTypeContent {
    pub media_type: String,
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    pub description: String,
    pub required: bool,
    pub contents: Vec<MediaTypeContent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub deprecated: bool,
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status_code: String,
    pub description: String,
    pub contents: Vec<MediaTypeContent>,
    pub headers: Vec<Header>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityRequirementScheme {
    pub key: String,
    pub scopes: Vec<String>,
}

/// One alternative of a `security` list: every scheme in it applies together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityRequirement {
    pub schemes: Vec<SecurityRequirementScheme>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub name: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthFlow {
    pub authorization_url: String,
    pub token_url: String,
    pub refresh_url: String,
    pub scopes: Vec<Scope>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthFlows {
    pub implicit: Option<OAuthFlow>,
    pub password: Option<OAuthFlow>,
    pub client_credentials: Option<OAuthFlow>,
    pub authorization_code: Option<OAuthFlow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityScheme {
    pub key: String,
    pub scheme_type: String,
    pub description: String,
    pub name: String,
    pub location: String,
    pub scheme: String,
    pub bearer_format: String,
    pub open_id_connect_url: String,
    pub flows: Option<OAuthFlows>,
}

/// One HTTP method bound to one path template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub path: String,
    /// Upper-case HTTP method.
    pub method: String,
    /// May be empty: OpenAPI does not require operation ids.
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    pub deprecated: bool,
    pub tags: Vec<String>,
    pub path_parameters: Vec<Parameter>,
    pub query_parameters: Vec<Parameter>,
    pub header_parameters: Vec<Parameter>,
    pub cookie_parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: Vec<Response>,
    pub security: Option<Vec<SecurityRequirement>>,
}

impl Route {
    /// The bucket this route belongs to: first declared tag, or [`UNTAGGED_TAG`].
    pub fn bucket_tag(&self) -> &str {
        self.tags.first().map_or(UNTAGGED_TAG, String::as_str)
    }

    pub fn has_parameters(&self) -> bool {
        !(self.path_parameters.is_empty()
            && self.query_parameters.is_empty()
            && self.header_parameters.is_empty()
            && self.cookie_parameters.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub meta: Meta,
    pub info: Info,
    pub routes_by_tag: RoutesByTag,
    pub tags: Vec<Tag>,
    pub security_schemes: Vec<SecurityScheme>,
}

impl Document {
    /// Finish building: sort every bucket, complete and sort the tag list.
    pub fn new(
        meta: Meta,
        info: Info,
        mut routes_by_tag: RoutesByTag,
        declared_tags: Vec<Tag>,
        security_schemes: Vec<SecurityScheme>,
    ) -> Self {
        for routes in routes_by_tag.values_mut() {
            sort_routes(routes);
        }
        let mut tags = merge_tags(&routes_by_tag, declared_tags);
        sort_tags(&mut tags);

        let document = Self {
            meta,
            info,
            routes_by_tag,
            tags,
            security_schemes,
        };
        for id in document.duplicate_operation_ids() {
            warn!("operationId {id:?} is used by more than one route; lookups return the first");
        }
        document
    }

    /// First route whose operation id equals `id`, scanning buckets in tag
    /// order. Empty ids never match.
    pub fn find_route_by_operation_id(&self, id: &str) -> Option<&Route> {
        if id.is_empty() {
            return None;
        }
        self.all_routes().find(|r| r.operation_id == id)
    }

    /// Routes of one tag; empty for unknown tags.
    pub fn routes_for_tag(&self, tag: &str) -> &[Route] {
        self.routes_by_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Every route, bucket by bucket in `tags` order.
    pub fn all_routes(&self) -> impl Iterator<Item = &Route> {
        self.tags
            .iter()
            .filter_map(|t| self.routes_by_tag.get(&t.name))
            .flatten()
    }

    /// Tags that have at least one route.
    pub fn non_empty_tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags
            .iter()
            .filter(|t| !self.routes_for_tag(&t.name).is_empty())
    }

    pub fn route_count(&self) -> usize {
        self.routes_by_tag.values().map(Vec::len).sum()
    }

    /// Non-empty operation ids used by more than one route, in lookup order.
    pub fn duplicate_operation_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for route in self.all_routes() {
            let id = route.operation_id.as_str();
            if id.is_empty() {
                continue;
            }
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id);
            }
        }
        duplicates
    }
}

/// Declared tags (first occurrence of each name wins), followed by a
/// synthesized tag for every bucket name that was never declared.
pub fn merge_tags(routes_by_tag: &RoutesByTag, declared: Vec<Tag>) -> Vec<Tag> {
    let mut names = HashSet::new();
    let mut tags: Vec<Tag> = declared
        .into_iter()
        .filter(|t| names.insert(t.name.clone()))
        .collect();
    for name in routes_by_tag.keys() {
        if names.insert(name.clone()) {
            tags.push(Tag::new(name.clone(), ""));
        }
    }
    tags
}

pub fn compare_tag_names(a: &str, b: &str) -> Ordering {
    match (a == UNTAGGED_TAG, b == UNTAGGED_TAG) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

pub fn sort_tags(tags: &mut [Tag]) {
    tags.sort_by(|a, b| compare_tag_names(&a.name, &b.name));
}
