//! # Document Builder
//!
//! Turns decoded path items into the tag buckets a [`Document`] is made of.
//!
//! ```text
//! RawPathItem ──route_from_operation──► Route
//!      │                                  │
//!      └──────────bucket_path_item────────┘──► RoutesByTag ─┐
//!                                                           ├─merge_buckets─► Document::new
//! RawPathItem ──────────bucket_path_item───► RoutesByTag ───┘
//! ```
//!
//! Everything here is pure; the loader owns I/O and `$ref` resolution.

use crate::core::document::{
    Document, Info, Meta, Parameter, ParameterLocation, RequestBody, Response, Route,
    RoutesByTag, SecurityRequirement, SecurityScheme, Tag,
};

/// One operation as it appears under a path item, before bucketing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOperation {
    pub method: String,
    pub tags: Vec<String>,
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    pub deprecated: bool,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: Vec<Response>,
    pub security: Option<Vec<SecurityRequirement>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPathItem {
    pub path: String,
    /// Parameters shared by every operation of the path item.
    pub parameters: Vec<Parameter>,
    pub operations: Vec<RawOperation>,
}

/// Build a route from one operation.
///
/// A non-empty operation parameter list replaces the path-item list
/// entirely; the two are never merged.
pub fn route_from_operation(path: &str, path_item_parameters: &[Parameter], op: RawOperation) -> Route {
    let parameters = if op.parameters.is_empty() {
        path_item_parameters.to_vec()
    } else {
        op.parameters
    };

    let mut route = Route {
        path: path.to_string(),
        method: op.method.to_ascii_uppercase(),
        operation_id: op.operation_id,
        summary: op.summary,
        description: op.description,
        deprecated: op.deprecated,
        tags: op.tags,
        request_body: op.request_body,
        responses: op.responses,
        security: op.security,
        ..Route::default()
    };

    for param in parameters {
        match param.location {
            ParameterLocation::Path => route.path_parameters.push(param),
            ParameterLocation::Query => route.query_parameters.push(param),
            ParameterLocation::Header => route.header_parameters.push(param),
            ParameterLocation::Cookie => route.cookie_parameters.push(param),
        }
    }
    route.responses.sort_by(|a, b| a.status_code.cmp(&b.status_code));
    route
}

/// Routes of one path item, keyed by each route's first tag.
pub fn bucket_path_item(item: RawPathItem) -> RoutesByTag {
    let mut buckets = RoutesByTag::new();
    for op in item.operations {
        let route = route_from_operation(&item.path, &item.parameters, op);
        buckets
            .entry(route.bucket_tag().to_string())
            .or_default()
            .push(route);
    }
    buckets
}

/// Union of two bucket maps. Shared keys concatenate, `a` first.
pub fn merge_buckets(a: RoutesByTag, b: RoutesByTag) -> RoutesByTag {
    let mut merged = a;
    for (tag, mut routes) in b {
        merged.entry(tag).or_default().append(&mut routes);
    }
    merged
}

/// Fold every path item into buckets and finish the document.
pub fn build_document(
    meta: Meta,
    info: Info,
    path_items: Vec<RawPathItem>,
    declared_tags: Vec<Tag>,
    security_schemes: Vec<SecurityScheme>,
) -> Document {
    let routes_by_tag = path_items
        .into_iter()
        .map(bucket_path_item)
        .fold(RoutesByTag::new(), merge_buckets);
    Document::new(meta, info, routes_by_tag, declared_tags, security_schemes)
}
