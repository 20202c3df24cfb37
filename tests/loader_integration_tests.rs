use apinav::core::document::UNTAGGED_TAG;
use apinav::loader::{self, LoadError, SpecSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const ROOT_JSON: &str = r##"{
  "openapi": "3.0.3",
  "info": {"title": "Remote Petstore", "version": "2.1.0"},
  "tags": [{"name": "pets", "description": "Pets"}],
  "paths": {
    "/pets": {
      "get": {
        "tags": ["pets"],
        "operationId": "listPets",
        "parameters": [{"$ref": "./components.json#/parameters/Limit"}],
        "responses": {
          "200": {
            "description": "A list of pets",
            "content": {
              "application/json": {
                "schema": {"type": "array", "items": {"$ref": "./components.json#/schemas/Pet"}}
              }
            }
          }
        }
      }
    },
    "/health": {"get": {"operationId": "health", "responses": {"204": {"description": "Up"}}}}
  }
}"##;

const COMPONENTS_JSON: &str = r##"{
  "parameters": {
    "Limit": {"name": "limit", "in": "query", "schema": {"type": "integer", "maximum": 100}}
  },
  "schemas": {
    "Pet": {
      "type": "object",
      "required": ["id"],
      "properties": {
        "id": {"type": "integer", "format": "int64"},
        "parent": {"$ref": "#/schemas/Pet"}
      }
    }
  }
}"##;

const ROOT_YAML: &str = r#"
openapi: 3.1.0
info:
  title: YAML over HTTP
  version: "1"
paths:
  /items/{id}:
    get:
      operationId: getItem
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
      responses:
        200:
          description: The item
        404:
          description: Not found
"#;

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn source_at(server: &MockServer, route: &str) -> SpecSource {
    SpecSource::parse(&format!("{}{route}", server.uri())).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_load_json_with_external_refs() {
    let server = MockServer::start().await;
    serve(&server, "/api/openapi.json", ROOT_JSON).await;
    serve(&server, "/api/components.json", COMPONENTS_JSON).await;

    let source = source_at(&server, "/api/openapi.json");
    assert!(matches!(source, SpecSource::Uri(_)));

    let doc = loader::load(&source).await.unwrap();
    assert_eq!(doc.meta.file_name, "openapi.json");
    assert_eq!(doc.info.title, "Remote Petstore");
    assert_eq!(doc.route_count(), 2);

    let list = doc.find_route_by_operation_id("listPets").unwrap();
    assert_eq!(list.method, "GET");
    assert_eq!(list.query_parameters[0].name, "limit");
    assert_eq!(
        list.query_parameters[0].schema.as_ref().unwrap().max,
        Some(100.0)
    );

    let schema = list.responses[0].contents[0].schema.as_ref().unwrap();
    let pet = schema.items.as_deref().unwrap();
    assert_eq!(pet.ref_name.as_deref(), Some("Pet"));
    assert!(pet.is_required("id"));
    // the self-reference inside Pet is cut, not expanded forever
    let parent = pet.property("parent").unwrap();
    assert!(parent.circular);
    assert_eq!(parent.ref_name.as_deref(), Some("Pet"));

    let health = doc.find_route_by_operation_id("health").unwrap();
    assert_eq!(health.bucket_tag(), UNTAGGED_TAG);
}

#[tokio::test]
async fn test_load_yaml_without_extension() {
    let server = MockServer::start().await;
    serve(&server, "/spec", ROOT_YAML).await;

    let doc = loader::load(&source_at(&server, "/spec")).await.unwrap();
    assert_eq!(doc.meta.file_name, "spec");
    assert_eq!(doc.info.openapi_version, "3.1.0");

    let route = doc.find_route_by_operation_id("getItem").unwrap();
    assert_eq!(route.path_parameters[0].name, "id");
    let codes: Vec<&str> = route
        .responses
        .iter()
        .map(|r| r.status_code.as_str())
        .collect();
    assert_eq!(codes, vec!["200", "404"]);
}

#[tokio::test]
async fn test_not_found_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = loader::load(&source_at(&server, "/missing.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Http(_)), "{err}");
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_missing_referenced_document_fails() {
    let server = MockServer::start().await;
    serve(&server, "/api/openapi.json", ROOT_JSON).await;

    let err = loader::load(&source_at(&server, "/api/openapi.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Http(_)), "{err}");
}

#[tokio::test]
async fn test_swagger_two_is_rejected() {
    let server = MockServer::start().await;
    serve(&server, "/swagger.json", r#"{"swagger": "2.0", "paths": {}}"#).await;

    let err = loader::load(&source_at(&server, "/swagger.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Invalid(_)), "{err}");
}
