//! Decoded JSON → raw path items, tags, info and security schemes.
//!
//! Every object that may be a `$ref` goes through [`DocumentSet::follow`]
//! first, so the rest of this module only ever sees concrete objects.

use std::collections::HashMap;

use log::{debug, warn};
use serde_json::{Map, Value};

use super::LoadError;
use super::refs::{DocumentSet, ref_of};
use crate::core::builder::{RawOperation, RawPathItem};
use crate::core::document::{
    Header, Info, MediaTypeContent, OAuthFlow, OAuthFlows, Parameter, ParameterLocation,
    RequestBody, Response, Scope, SecurityRequirement, SecurityRequirementScheme,
    SecurityScheme, Tag,
};
use crate::core::schema::Schema;

/// Operation keys of a path item, in the order they are read.
pub const PATH_ITEM_METHODS: [&str; 8] =
    ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Most nodes one parameter, header or body schema may expand to. Refs met
/// after that become `truncated` stubs, so schemas that share components
/// many times over stay small.
pub const MAX_SCHEMA_NODES: usize = 5_000;

/// Everything the builder needs from one description.
#[derive(Debug, Default)]
pub struct Converted {
    pub info: Info,
    pub path_items: Vec<RawPathItem>,
    pub tags: Vec<Tag>,
    pub security_schemes: Vec<SecurityScheme>,
}

pub fn convert(docs: &DocumentSet) -> Result<Converted, LoadError> {
    let root = docs
        .root()
        .map(|d| &d.value)
        .ok_or_else(|| LoadError::Invalid("no root document".to_string()))?;
    let Some(obj) = root.as_object() else {
        return Err(LoadError::Invalid("top level is not an object".to_string()));
    };
    if obj.contains_key("swagger") {
        return Err(LoadError::Invalid(
            "Swagger 2.0 descriptions are not supported, convert to OpenAPI 3 first".to_string(),
        ));
    }
    if !obj.get("openapi").is_some_and(Value::is_string) {
        return Err(LoadError::Invalid("missing \"openapi\" version field".to_string()));
    }

    let mut converter = Converter {
        docs,
        expanding: Vec::new(),
        expanded: HashMap::new(),
        budget: MAX_SCHEMA_NODES,
        stubs: 0,
    };
    let base = docs.root_key();
    let default_security = obj
        .get("security")
        .map(security_requirements);

    let mut path_items = Vec::new();
    if let Some(paths) = obj.get("paths") {
        let Some(paths) = paths.as_object() else {
            return Err(LoadError::Invalid("\"paths\" is not an object".to_string()));
        };
        for (path, item) in paths {
            path_items.push(converter.path_item(base, path, item, default_security.as_ref())?);
        }
    }

    let mut security_schemes = Vec::new();
    if let Some(schemes) = obj
        .get("components")
        .and_then(|c| c.get("securitySchemes"))
        .and_then(Value::as_object)
    {
        for (key, scheme) in schemes {
            let resolved = docs.follow(base, scheme)?;
            security_schemes.push(security_scheme(key, resolved.value));
        }
    }

    Ok(Converted {
        info: info(root),
        path_items,
        tags: tags(root),
        security_schemes,
    })
}

// ============================================================================
// Field helpers
// ============================================================================

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn f64_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

fn u64_field(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn object_entries(value: Option<&Value>) -> impl Iterator<Item = (&String, &Value)> {
    value
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(Map::iter)
}

// ============================================================================
// Document-level sections
// ============================================================================

fn info(root: &Value) -> Info {
    let info = root.get("info").unwrap_or(&Value::Null);
    let contact = info.get("contact").unwrap_or(&Value::Null);
    let license = info.get("license").unwrap_or(&Value::Null);
    let docs = root.get("externalDocs").unwrap_or(&Value::Null);
    Info {
        openapi_version: str_field(root, "openapi"),
        title: str_field(info, "title"),
        description: str_field(info, "description"),
        terms_of_service: str_field(info, "termsOfService"),
        contact_name: str_field(contact, "name"),
        contact_url: str_field(contact, "url"),
        contact_email: str_field(contact, "email"),
        license_name: str_field(license, "name"),
        license_url: str_field(license, "url"),
        version: str_field(info, "version"),
        external_docs_description: str_field(docs, "description"),
        external_docs_url: str_field(docs, "url"),
    }
}

fn tags(root: &Value) -> Vec<Tag> {
    root.get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|t| t.get("name").is_some_and(Value::is_string))
                .map(|t| Tag::new(str_field(t, "name"), str_field(t, "description")))
                .collect()
        })
        .unwrap_or_default()
}

fn security_requirements(value: &Value) -> Vec<SecurityRequirement> {
    value
        .as_array()
        .map(|alternatives| {
            alternatives
                .iter()
                .map(|alt| SecurityRequirement {
                    schemes: object_entries(Some(alt))
                        .map(|(key, scopes)| SecurityRequirementScheme {
                            key: key.clone(),
                            scopes: string_list(Some(scopes)),
                        })
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn oauth_flow(value: Option<&Value>) -> Option<OAuthFlow> {
    let value = value?;
    Some(OAuthFlow {
        authorization_url: str_field(value, "authorizationUrl"),
        token_url: str_field(value, "tokenUrl"),
        refresh_url: str_field(value, "refreshUrl"),
        scopes: object_entries(value.get("scopes"))
            .map(|(name, detail)| Scope {
                name: name.clone(),
                detail: detail.as_str().unwrap_or_default().to_string(),
            })
            .collect(),
    })
}

fn security_scheme(key: &str, value: &Value) -> SecurityScheme {
    let flows = value.get("flows").map(|flows| OAuthFlows {
        implicit: oauth_flow(flows.get("implicit")),
        password: oauth_flow(flows.get("password")),
        client_credentials: oauth_flow(flows.get("clientCredentials")),
        authorization_code: oauth_flow(flows.get("authorizationCode")),
    });
    SecurityScheme {
        key: key.to_string(),
        scheme_type: str_field(value, "type"),
        description: str_field(value, "description"),
        name: str_field(value, "name"),
        location: str_field(value, "in"),
        scheme: str_field(value, "scheme"),
        bearer_format: str_field(value, "bearerFormat"),
        open_id_connect_url: str_field(value, "openIdConnectUrl"),
        flows,
    }
}

// ============================================================================
// Converter (anything that can reach a schema)
// ============================================================================

struct Converter<'a> {
    docs: &'a DocumentSet,
    /// Keys of the schema refs currently being expanded, outermost first.
    expanding: Vec<String>,
    /// Finished ref expansions without stubs inside, with their node count.
    expanded: HashMap<String, (Schema, usize)>,
    /// Nodes left for the schema tree being built.
    budget: usize,
    /// Stubs emitted so far. An expansion that adds one depends on where it
    /// was met and is not cached.
    stubs: usize,
}

impl<'a> Converter<'a> {
    fn path_item(
        &mut self,
        doc: &str,
        path: &str,
        value: &'a Value,
        default_security: Option<&Vec<SecurityRequirement>>,
    ) -> Result<RawPathItem, LoadError> {
        let docs = self.docs;
        let item = docs.follow(doc, value)?;
        let doc = item.doc.as_str();

        let parameters = self.parameters(doc, item.value.get("parameters"))?;
        let mut operations = Vec::new();
        for method in PATH_ITEM_METHODS {
            if let Some(op) = item.value.get(method) {
                operations.push(self.operation(doc, method, op, default_security)?);
            }
        }

        Ok(RawPathItem {
            path: path.to_string(),
            parameters,
            operations,
        })
    }

    fn operation(
        &mut self,
        doc: &str,
        method: &str,
        op: &'a Value,
        default_security: Option<&Vec<SecurityRequirement>>,
    ) -> Result<RawOperation, LoadError> {
        let request_body = match op.get("requestBody") {
            Some(body) => Some(self.request_body(doc, body)?),
            None => None,
        };

        let mut responses = Vec::new();
        for (code, response) in object_entries(op.get("responses")) {
            responses.push(self.response(doc, code, response)?);
        }

        let security = op
            .get("security")
            .map(security_requirements)
            .or_else(|| default_security.cloned());

        Ok(RawOperation {
            method: method.to_string(),
            tags: string_list(op.get("tags")),
            operation_id: str_field(op, "operationId"),
            summary: str_field(op, "summary"),
            description: str_field(op, "description"),
            deprecated: bool_field(op, "deprecated"),
            parameters: self.parameters(doc, op.get("parameters"))?,
            request_body,
            responses,
            security,
        })
    }

    fn parameters(&mut self, doc: &str, list: Option<&'a Value>) -> Result<Vec<Parameter>, LoadError> {
        let docs = self.docs;
        let mut out = Vec::new();
        for value in list.and_then(Value::as_array).into_iter().flatten() {
            let param = docs.follow(doc, value)?;
            let name = str_field(param.value, "name");
            let raw_location = str_field(param.value, "in");
            let Some(location) = ParameterLocation::parse(&raw_location) else {
                warn!("skipping parameter {name:?} with unknown location {raw_location:?}");
                continue;
            };
            out.push(Parameter {
                name,
                location,
                description: str_field(param.value, "description"),
                required: bool_field(param.value, "required"),
                deprecated: bool_field(param.value, "deprecated"),
                schema: self.parameter_schema(&param.doc, param.value)?,
            });
        }
        Ok(out)
    }

    /// `schema`, or the schema of the first `content` entry.
    fn parameter_schema(&mut self, doc: &str, value: &'a Value) -> Result<Option<Schema>, LoadError> {
        if let Some(schema) = value.get("schema") {
            return self.schema(doc, schema).map(Some);
        }
        match object_entries(value.get("content")).next() {
            Some((_, media)) => match media.get("schema") {
                Some(schema) => self.schema(doc, schema).map(Some),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    fn contents(&mut self, doc: &str, value: Option<&'a Value>) -> Result<Vec<MediaTypeContent>, LoadError> {
        let mut out = Vec::new();
        for (media_type, media) in object_entries(value) {
            let schema = match media.get("schema") {
                Some(schema) => Some(self.schema(doc, schema)?),
                None => None,
            };
            out.push(MediaTypeContent {
                media_type: media_type.clone(),
                schema,
            });
        }
        Ok(out)
    }

    fn request_body(&mut self, doc: &str, value: &'a Value) -> Result<RequestBody, LoadError> {
        let docs = self.docs;
        let body = docs.follow(doc, value)?;
        Ok(RequestBody {
            description: str_field(body.value, "description"),
            required: bool_field(body.value, "required"),
            contents: self.contents(&body.doc, body.value.get("content"))?,
        })
    }

    fn response(&mut self, doc: &str, code: &str, value: &'a Value) -> Result<Response, LoadError> {
        let docs = self.docs;
        let response = docs.follow(doc, value)?;
        let doc = response.doc.as_str();

        let mut headers = Vec::new();
        for (name, header) in object_entries(response.value.get("headers")) {
            let header = docs.follow(doc, header)?;
            headers.push(Header {
                name: name.clone(),
                description: str_field(header.value, "description"),
                required: bool_field(header.value, "required"),
                deprecated: bool_field(header.value, "deprecated"),
                schema: self.parameter_schema(&header.doc, header.value)?,
            });
        }

        Ok(Response {
            status_code: code.to_string(),
            description: str_field(response.value, "description"),
            contents: self.contents(doc, response.value.get("content"))?,
            headers,
        })
    }

    /// Convert a top-level schema with a fresh node budget.
    fn schema(&mut self, doc: &str, value: &'a Value) -> Result<Schema, LoadError> {
        self.budget = MAX_SCHEMA_NODES;
        self.schema_node(doc, value)
    }

    /// Convert a schema, expanding `$ref`s. A ref that is already being
    /// expanded further up becomes a `circular` stub, one met after the
    /// budget ran out a `truncated` one.
    fn schema_node(&mut self, doc: &str, value: &'a Value) -> Result<Schema, LoadError> {
        if ref_of(value).is_none() {
            return self.schema_body(doc, value);
        }

        let docs = self.docs;
        let resolved = docs.follow(doc, value)?;
        if self.expanding.contains(&resolved.key) {
            self.stubs += 1;
            return Ok(Schema {
                ref_name: resolved.name,
                circular: true,
                ..Schema::default()
            });
        }

        if let Some((cached, size)) = self.expanded.get(&resolved.key) {
            if *size <= self.budget {
                self.budget -= size;
                return Ok(Schema {
                    ref_name: resolved.name,
                    ..cached.clone()
                });
            }
        }

        if self.budget == 0 {
            debug!("schema budget spent, not expanding {}", resolved.key);
            self.stubs += 1;
            return Ok(Schema {
                ref_name: resolved.name,
                truncated: true,
                ..Schema::default()
            });
        }

        let stubs_before = self.stubs;
        self.expanding.push(resolved.key.clone());
        let result = self.schema_body(&resolved.doc, resolved.value);
        self.expanding.pop();

        let mut schema = result?;
        if self.stubs == stubs_before {
            let size = schema.node_count();
            self.expanded.insert(resolved.key, (schema.clone(), size));
        }
        schema.ref_name = resolved.name;
        Ok(schema)
    }

    fn schema_list(&mut self, doc: &str, value: Option<&'a Value>) -> Result<Vec<Schema>, LoadError> {
        value
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|s| self.schema_node(doc, s))
            .collect()
    }

    fn schema_body(&mut self, doc: &str, value: &'a Value) -> Result<Schema, LoadError> {
        self.budget = self.budget.saturating_sub(1);
        // `true`/`false` schemas and other non-objects carry nothing to show
        if !value.is_object() {
            return Ok(Schema::default());
        }

        let mut schema = Schema {
            format: str_field(value, "format"),
            description: str_field(value, "description"),
            default: value.get("default").cloned(),
            enum_values: value
                .get("enum")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            deprecated: bool_field(value, "deprecated"),
            read_only: bool_field(value, "readOnly"),
            write_only: bool_field(value, "writeOnly"),
            nullable: bool_field(value, "nullable"),
            min: f64_field(value, "minimum"),
            max: f64_field(value, "maximum"),
            multiple_of: f64_field(value, "multipleOf"),
            min_length: u64_field(value, "minLength").unwrap_or(0),
            max_length: u64_field(value, "maxLength"),
            pattern: str_field(value, "pattern"),
            min_items: u64_field(value, "minItems").unwrap_or(0),
            max_items: u64_field(value, "maxItems"),
            unique_items: bool_field(value, "uniqueItems"),
            required: string_list(value.get("required")),
            ..Schema::default()
        };

        match value.get("type") {
            Some(Value::String(t)) => schema.schema_type = t.clone(),
            // 3.1 style: ["string", "null"]
            Some(Value::Array(types)) => {
                for t in types.iter().filter_map(Value::as_str) {
                    if t == "null" {
                        schema.nullable = true;
                    } else if schema.schema_type.is_empty() {
                        schema.schema_type = t.to_string();
                    }
                }
            }
            _ => {}
        }

        // 3.0 uses booleans next to minimum/maximum, 3.1 uses the bound itself
        match value.get("exclusiveMinimum") {
            Some(Value::Bool(b)) => schema.exclusive_min = *b,
            Some(Value::Number(n)) => {
                schema.min = n.as_f64();
                schema.exclusive_min = true;
            }
            _ => {}
        }
        match value.get("exclusiveMaximum") {
            Some(Value::Bool(b)) => schema.exclusive_max = *b,
            Some(Value::Number(n)) => {
                schema.max = n.as_f64();
                schema.exclusive_max = true;
            }
            _ => {}
        }

        if let Some(items) = value.get("items") {
            schema.items = Some(Box::new(self.schema_node(doc, items)?));
        }
        for (name, prop) in object_entries(value.get("properties")) {
            let prop = self.schema_node(doc, prop)?;
            schema.properties.push((name.clone(), prop));
        }
        schema.all_of = self.schema_list(doc, value.get("allOf"))?;
        schema.one_of = self.schema_list(doc, value.get("oneOf"))?;
        schema
            .one_of
            .extend(self.schema_list(doc, value.get("anyOf"))?);

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::source::SpecSource;
    use serde_json::json;
    use std::path::PathBuf;

    fn convert_json(value: Value) -> Result<Converted, LoadError> {
        let set = DocumentSet::single(SpecSource::File(PathBuf::from("/api.json")), value);
        convert(&set)
    }

    fn petstore_json() -> Value {
        json!({
            "openapi": "3.0.3",
            "info": {
                "title": "Petstore",
                "version": "1.0.0",
                "contact": {"name": "API team", "email": "api@example.com"},
                "license": {"name": "MIT"}
            },
            "externalDocs": {"url": "https://example.com/docs"},
            "tags": [{"name": "pets", "description": "Pets"}, {"description": "nameless"}],
            "security": [{"api_key": []}],
            "paths": {
                "/pets/{petId}": {
                    "parameters": [{"$ref": "#/components/parameters/PetId"}],
                    "delete": {"tags": ["pets"], "operationId": "deletePet", "security": []},
                    "get": {
                        "tags": ["pets"],
                        "operationId": "showPetById",
                        "responses": {
                            "default": {"$ref": "#/components/responses/Error"},
                            "200": {
                                "description": "A pet",
                                "headers": {"X-Rate": {"schema": {"type": "integer"}}},
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}
                            }
                        }
                    }
                }
            },
            "components": {
                "parameters": {
                    "PetId": {"name": "petId", "in": "path", "required": true, "schema": {"type": "string"}}
                },
                "responses": {
                    "Error": {"description": "Unexpected error"}
                },
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": {"type": "integer", "format": "int64"},
                            "parent": {"$ref": "#/components/schemas/Pet"},
                            "tags": {"type": "array", "items": {"type": "string"}}
                        }
                    }
                },
                "securitySchemes": {
                    "api_key": {"type": "apiKey", "name": "X-API-Key", "in": "header"},
                    "oauth": {
                        "type": "oauth2",
                        "flows": {"implicit": {
                            "authorizationUrl": "https://example.com/auth",
                            "scopes": {"read:pets": "read your pets"}
                        }}
                    }
                }
            }
        })
    }

    #[test]
    fn test_info_and_tags() {
        let converted = convert_json(petstore_json()).unwrap();
        assert_eq!(converted.info.openapi_version, "3.0.3");
        assert_eq!(converted.info.title, "Petstore");
        assert_eq!(converted.info.contact_email, "api@example.com");
        assert_eq!(converted.info.license_name, "MIT");
        assert_eq!(converted.info.external_docs_url, "https://example.com/docs");
        assert_eq!(converted.info.terms_of_service, "");
        // nameless tag dropped
        assert_eq!(converted.tags, vec![Tag::new("pets", "Pets")]);
    }

    #[test]
    fn test_methods_read_in_fixed_order() {
        let converted = convert_json(petstore_json()).unwrap();
        let item = &converted.path_items[0];
        let methods: Vec<&str> = item.operations.iter().map(|o| o.method.as_str()).collect();
        assert_eq!(methods, vec!["get", "delete"]);
    }

    #[test]
    fn test_path_item_parameter_ref_resolved() {
        let converted = convert_json(petstore_json()).unwrap();
        let item = &converted.path_items[0];
        assert_eq!(item.parameters.len(), 1);
        assert_eq!(item.parameters[0].name, "petId");
        assert_eq!(item.parameters[0].location, ParameterLocation::Path);
        assert!(item.parameters[0].required);
        assert_eq!(item.parameters[0].schema.as_ref().unwrap().schema_type, "string");
    }

    #[test]
    fn test_responses_headers_and_schema_refs() {
        let converted = convert_json(petstore_json()).unwrap();
        let get = &converted.path_items[0].operations[0];
        assert_eq!(get.responses.len(), 2);

        let ok = get.responses.iter().find(|r| r.status_code == "200").unwrap();
        assert_eq!(ok.headers[0].name, "X-Rate");
        assert_eq!(ok.headers[0].schema.as_ref().unwrap().schema_type, "integer");
        let pet = ok.contents[0].schema.as_ref().unwrap();
        assert_eq!(pet.ref_name.as_deref(), Some("Pet"));
        assert_eq!(pet.property("id").unwrap().format, "int64");

        let error = get.responses.iter().find(|r| r.status_code == "default").unwrap();
        assert_eq!(error.description, "Unexpected error");
    }

    #[test]
    fn test_self_reference_becomes_circular_stub() {
        let converted = convert_json(petstore_json()).unwrap();
        let get = &converted.path_items[0].operations[0];
        let ok = get.responses.iter().find(|r| r.status_code == "200").unwrap();
        let pet = ok.contents[0].schema.as_ref().unwrap();

        let parent = pet.property("parent").unwrap();
        assert!(parent.circular);
        assert_eq!(parent.ref_name.as_deref(), Some("Pet"));
        assert!(parent.properties.is_empty());
        assert!(!pet.circular);
    }

    #[test]
    fn test_sibling_refs_are_not_circular() {
        let converted = convert_json(json!({
            "openapi": "3.0.0",
            "paths": {"/pair": {"get": {"responses": {"200": {
                "description": "ok",
                "content": {"application/json": {"schema": {
                    "type": "object",
                    "properties": {
                        "a": {"$ref": "#/components/schemas/Leaf"},
                        "b": {"$ref": "#/components/schemas/Leaf"}
                    }
                }}}
            }}}}},
            "components": {"schemas": {"Leaf": {"type": "string"}}}
        }))
        .unwrap();
        let schema = converted.path_items[0].operations[0].responses[0].contents[0]
            .schema
            .clone()
            .unwrap();
        assert!(!schema.property("a").unwrap().circular);
        assert!(!schema.property("b").unwrap().circular);
        assert_eq!(schema.property("b").unwrap().schema_type, "string");
    }

    /// `S0` .. `S{levels-1}` where every level refers to the next one twice.
    fn diamond_json(levels: usize) -> Value {
        let mut schemas = Map::new();
        for i in 0..levels - 1 {
            let next = format!("#/components/schemas/S{}", i + 1);
            schemas.insert(
                format!("S{i}"),
                json!({
                    "type": "object",
                    "properties": {"a": {"$ref": next}, "b": {"$ref": next}}
                }),
            );
        }
        schemas.insert(format!("S{}", levels - 1), json!({"type": "string"}));
        json!({
            "openapi": "3.0.0",
            "paths": {"/d": {"get": {"responses": {"200": {
                "description": "ok",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/S0"}}}
            }}}}},
            "components": {"schemas": schemas}
        })
    }

    fn diamond_schema(levels: usize) -> Schema {
        let converted = convert_json(diamond_json(levels)).unwrap();
        converted.path_items[0].operations[0].responses[0].contents[0]
            .schema
            .clone()
            .unwrap()
    }

    fn has_truncated(schema: &Schema) -> bool {
        schema.truncated || schema.properties.iter().any(|(_, p)| has_truncated(p))
    }

    #[test]
    fn test_shared_refs_expand_fully_when_small() {
        let schema = diamond_schema(3);
        // S0 + 2 × (S1 + 2 × S2)
        assert_eq!(schema.node_count(), 7);
        assert!(!has_truncated(&schema));
        let a = schema.property("a").unwrap();
        let b = schema.property("b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.ref_name.as_deref(), Some("S1"));
        assert_eq!(a.property("b").unwrap().schema_type, "string");
    }

    #[test]
    fn test_deep_shared_refs_are_bounded() {
        // fully expanded this would be 2^20 - 1 nodes
        let schema = diamond_schema(20);
        assert!(schema.node_count() <= 3 * MAX_SCHEMA_NODES);
        assert!(has_truncated(&schema));
        assert!(!schema.circular);
        assert_eq!(schema.ref_name.as_deref(), Some("S0"));
    }

    #[test]
    fn test_budget_is_per_schema() {
        let mut doc = diamond_json(20);
        doc["paths"]["/leaf"] = json!({"get": {"responses": {"200": {
            "description": "ok",
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/S18"}}}
        }}}});
        let converted = convert_json(doc).unwrap();
        let leaf_item = converted
            .path_items
            .iter()
            .find(|item| item.path == "/leaf")
            .unwrap();
        let schema = leaf_item.operations[0].responses[0].contents[0]
            .schema
            .as_ref()
            .unwrap();
        assert!(!has_truncated(schema));
        assert_eq!(schema.node_count(), 3);
    }

    #[test]
    fn test_security_falls_back_to_document_level() {
        let converted = convert_json(petstore_json()).unwrap();
        let ops = &converted.path_items[0].operations;
        let get = ops.iter().find(|o| o.method == "get").unwrap();
        let delete = ops.iter().find(|o| o.method == "delete").unwrap();

        let inherited = get.security.as_ref().unwrap();
        assert_eq!(inherited[0].schemes[0].key, "api_key");
        // explicit empty list turns security off for this operation
        assert_eq!(delete.security, Some(vec![]));
    }

    #[test]
    fn test_security_schemes() {
        let converted = convert_json(petstore_json()).unwrap();
        assert_eq!(converted.security_schemes.len(), 2);
        let api_key = &converted.security_schemes[0];
        assert_eq!(api_key.key, "api_key");
        assert_eq!(api_key.location, "header");
        let oauth = &converted.security_schemes[1];
        let implicit = oauth.flows.as_ref().unwrap().implicit.as_ref().unwrap();
        assert_eq!(implicit.authorization_url, "https://example.com/auth");
        assert_eq!(implicit.scopes[0].name, "read:pets");
        assert_eq!(implicit.scopes[0].detail, "read your pets");
    }

    #[test]
    fn test_schema_details() {
        let converted = convert_json(json!({
            "openapi": "3.1.0",
            "paths": {"/q": {"get": {"parameters": [
                {"name": "n", "in": "query", "schema": {"type": ["integer", "null"], "exclusiveMinimum": 0, "maximum": 10}},
                {"name": "s", "in": "query", "schema": {"type": "string", "minLength": 2, "pattern": "^a", "enum": ["ab", "ac"]}},
                {"name": "o", "in": "query", "content": {"application/json": {"schema": {"oneOf": [{"type": "string"}], "anyOf": [{"type": "integer"}]}}}}
            ]}}}
        }))
        .unwrap();
        let params = &converted.path_items[0].operations[0].parameters;

        let n = params[0].schema.as_ref().unwrap();
        assert_eq!(n.schema_type, "integer");
        assert!(n.nullable);
        assert_eq!(n.min, Some(0.0));
        assert!(n.exclusive_min);
        assert_eq!(n.max, Some(10.0));
        assert!(!n.exclusive_max);

        let s = params[1].schema.as_ref().unwrap();
        assert_eq!(s.min_length, 2);
        assert_eq!(s.pattern, "^a");
        assert_eq!(s.enum_values, vec![json!("ab"), json!("ac")]);

        let o = params[2].schema.as_ref().unwrap();
        assert_eq!(o.one_of.len(), 2);
    }

    #[test]
    fn test_unknown_parameter_location_skipped() {
        let converted = convert_json(json!({
            "openapi": "3.0.0",
            "paths": {"/x": {"get": {"parameters": [
                {"name": "a", "in": "body"},
                {"name": "b", "in": "query"}
            ]}}}
        }))
        .unwrap();
        let params = &converted.path_items[0].operations[0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "b");
    }

    #[test]
    fn test_request_body_ref() {
        let converted = convert_json(json!({
            "openapi": "3.0.0",
            "paths": {"/pets": {"post": {"requestBody": {"$ref": "#/components/requestBodies/NewPet"}}}},
            "components": {"requestBodies": {"NewPet": {
                "required": true,
                "content": {"application/json": {"schema": {"type": "object"}}, "text/plain": {}}
            }}}
        }))
        .unwrap();
        let body = converted.path_items[0].operations[0].request_body.as_ref().unwrap();
        assert!(body.required);
        assert_eq!(body.contents.len(), 2);
        assert_eq!(body.contents[0].media_type, "application/json");
        assert!(body.contents[1].schema.is_none());
    }

    #[test]
    fn test_missing_paths_is_empty() {
        let converted = convert_json(json!({"openapi": "3.1.0", "info": {"title": "t"}})).unwrap();
        assert!(converted.path_items.is_empty());
    }

    #[test]
    fn test_invalid_roots() {
        assert!(matches!(convert_json(json!([1, 2])), Err(LoadError::Invalid(_))));
        assert!(matches!(convert_json(json!({"info": {}})), Err(LoadError::Invalid(_))));
        assert!(matches!(
            convert_json(json!({"swagger": "2.0", "paths": {}})),
            Err(LoadError::Invalid(_))
        ));
        assert!(matches!(
            convert_json(json!({"openapi": "3.0.0", "paths": []})),
            Err(LoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_dangling_ref_is_fatal() {
        let err = convert_json(json!({
            "openapi": "3.0.0",
            "paths": {"/x": {"get": {"parameters": [{"$ref": "#/components/parameters/Nope"}]}}}
        }))
        .unwrap_err();
        assert!(matches!(err, LoadError::Reference(_)));
    }
}
