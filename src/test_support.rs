//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::builder::{RawOperation, RawPathItem, build_document};
use crate::core::document::{
    Document, Info, Meta, Parameter, ParameterLocation, Response, Route, Tag,
};

/// A bare route with just a path and a method.
pub fn route(path: &str, method: &str) -> Route {
    Route {
        path: path.to_string(),
        method: method.to_string(),
        ..Route::default()
    }
}

pub fn route_with_id(path: &str, method: &str, operation_id: &str) -> Route {
    Route {
        operation_id: operation_id.to_string(),
        ..route(path, method)
    }
}

pub fn param(name: &str, location: ParameterLocation) -> Parameter {
    Parameter {
        name: name.to_string(),
        location,
        description: String::new(),
        required: location == ParameterLocation::Path,
        deprecated: false,
        schema: None,
    }
}

fn operation(method: &str, tag: Option<&str>, id: &str, summary: &str) -> RawOperation {
    RawOperation {
        method: method.to_string(),
        tags: tag.map(|t| vec![t.to_string()]).unwrap_or_default(),
        operation_id: id.to_string(),
        summary: summary.to_string(),
        responses: vec![Response {
            status_code: "200".to_string(),
            description: "OK".to_string(),
            ..Response::default()
        }],
        ..RawOperation::default()
    }
}

/// A small pet store: two tags with routes, one declared-only tag, one
/// untagged route.
pub fn petstore() -> Document {
    let items = vec![
        RawPathItem {
            path: "/pets".to_string(),
            parameters: vec![],
            operations: vec![
                operation("get", Some("pets"), "listPets", "List all pets"),
                operation("post", Some("pets"), "createPet", "Create a pet"),
            ],
        },
        RawPathItem {
            path: "/pets/{petId}".to_string(),
            parameters: vec![param("petId", ParameterLocation::Path)],
            operations: vec![operation("get", Some("pets"), "showPetById", "Info for a pet")],
        },
        RawPathItem {
            path: "/store/orders".to_string(),
            parameters: vec![],
            operations: vec![operation("get", Some("store"), "listOrders", "List orders")],
        },
        RawPathItem {
            path: "/health".to_string(),
            parameters: vec![],
            operations: vec![operation("get", None, "", "Health check")],
        },
    ];

    build_document(
        Meta {
            file_name: "petstore.yaml".to_string(),
            full_path: "/tmp/petstore.yaml".to_string(),
        },
        Info {
            openapi_version: "3.0.3".to_string(),
            title: "Swagger Petstore".to_string(),
            description: "A sample API that uses a **petstore**.".to_string(),
            version: "1.0.0".to_string(),
            license_name: "MIT".to_string(),
            ..Info::default()
        },
        items,
        vec![
            Tag::new("pets", "Everything about your pets"),
            Tag::new("admin", "Not used by any route"),
        ],
        vec![],
    )
}
