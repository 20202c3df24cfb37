//! `$ref` handling: every document the root refers to is fetched up front,
//! then references are resolved synchronously during conversion.
//!
//! ```text
//! "#/components/schemas/Pet"          → same document, pointer
//! "common.yaml#/components/schemas/X" → joined against the referring document
//! "pet.json"                          → whole document
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use super::LoadError;
use super::source::SpecSource;

/// Longest `$ref` → `$ref` chain followed before giving up.
const MAX_REF_HOPS: usize = 32;

#[derive(Debug)]
pub struct LoadedDocument {
    pub source: SpecSource,
    pub value: Value,
}

/// The root document plus everything it references, keyed by [`SpecSource::key`].
#[derive(Debug)]
pub struct DocumentSet {
    root: String,
    documents: HashMap<String, LoadedDocument>,
}

/// A followed reference.
#[derive(Debug)]
pub struct Resolved<'a> {
    /// Key of the document the target lives in; nested refs resolve against it.
    pub doc: String,
    /// `doc#pointer`, unique per target.
    pub key: String,
    /// Last pointer segment, e.g. `Pet` for `#/components/schemas/Pet`.
    pub name: Option<String>,
    pub value: &'a Value,
}

impl DocumentSet {
    /// A set holding only `root`, without fetching anything.
    pub fn single(source: SpecSource, value: Value) -> Self {
        let root = source.key();
        let mut documents = HashMap::new();
        documents.insert(root.clone(), LoadedDocument { source, value });
        Self { root, documents }
    }

    /// Fetch and decode every document reachable through external `$ref`s.
    pub async fn fetch_all(
        source: SpecSource,
        value: Value,
        client: &reqwest::Client,
    ) -> Result<Self, LoadError> {
        let mut set = Self::single(source, value);
        let mut pending = vec![set.root.clone()];

        while let Some(key) = pending.pop() {
            let Some(doc) = set.documents.get(&key) else {
                continue;
            };
            let base = doc.source.clone();
            let mut targets = Vec::new();
            collect_refs(&doc.value, &mut targets);

            for reference in targets {
                let (doc_part, _) = split_reference(&reference);
                if doc_part.is_empty() {
                    continue;
                }
                let target = base.join(doc_part)?;
                let target_key = target.key();
                if set.documents.contains_key(&target_key) {
                    continue;
                }
                debug!("loading referenced document {target_key}");
                let text = target.fetch(client).await?;
                let value = target.decode(&text)?;
                set.documents
                    .insert(target_key.clone(), LoadedDocument { source: target, value });
                pending.push(target_key);
            }
        }
        Ok(set)
    }

    pub fn root_key(&self) -> &str {
        &self.root
    }

    pub fn root(&self) -> Option<&LoadedDocument> {
        self.documents.get(&self.root)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Resolve one `$ref` string found in document `base`.
    pub fn resolve(&self, base: &str, reference: &str) -> Result<Resolved<'_>, LoadError> {
        let (doc_part, pointer) = split_reference(reference);
        let doc_key = if doc_part.is_empty() {
            base.to_string()
        } else {
            let base_doc = self
                .documents
                .get(base)
                .ok_or_else(|| LoadError::Reference(format!("{reference}: unknown base {base}")))?;
            base_doc.source.join(doc_part)?.key()
        };
        let doc = self.documents.get(&doc_key).ok_or_else(|| {
            LoadError::Reference(format!("{reference}: document {doc_key} was not loaded"))
        })?;

        let pointer = decode_pointer(reference, pointer)?;
        let value = doc.value.pointer(&pointer).ok_or_else(|| {
            LoadError::Reference(format!("{reference}: nothing at {pointer:?} in {doc_key}"))
        })?;

        let name = pointer
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(|s| s.replace("~1", "/").replace("~0", "~"));

        Ok(Resolved {
            key: format!("{doc_key}#{pointer}"),
            doc: doc_key,
            name,
            value,
        })
    }

    /// Follow `value` through any chain of `$ref`s. Values without a `$ref`
    /// come back unchanged with `base` as their document.
    pub fn follow<'a>(&'a self, base: &str, value: &'a Value) -> Result<Resolved<'a>, LoadError> {
        let mut current = Resolved {
            doc: base.to_string(),
            key: String::new(),
            name: None,
            value,
        };
        for _ in 0..MAX_REF_HOPS {
            let Some(reference) = ref_of(current.value) else {
                return Ok(current);
            };
            let next = self.resolve(&current.doc, reference)?;
            current = Resolved {
                name: next.name.or(current.name),
                ..next
            };
        }
        Err(LoadError::Reference(format!(
            "reference chain longer than {MAX_REF_HOPS} hops at {}",
            current.key
        )))
    }
}

/// The `$ref` string of an object, if it has one.
pub fn ref_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// Split `doc#pointer` into its two halves. Either may be empty.
pub fn split_reference(reference: &str) -> (&str, &str) {
    match reference.split_once('#') {
        Some((doc, pointer)) => (doc, pointer),
        None => (reference, ""),
    }
}

fn collect_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                out.push(reference.to_string());
            }
            for v in map.values() {
                collect_refs(v, out);
            }
        }
        Value::Array(items) => {
            for v in items {
                collect_refs(v, out);
            }
        }
        _ => {}
    }
}

/// Pointers in URI fragments may be percent-encoded
/// (`#/paths/~1pets~1%7Bid%7D`). Malformed escapes are kept as written;
/// escapes that decode to invalid UTF-8 make the reference unusable.
fn decode_pointer(reference: &str, pointer: &str) -> Result<String, LoadError> {
    urlencoding::decode(pointer)
        .map(Cow::into_owned)
        .map_err(|e| LoadError::Reference(format!("{reference}: bad pointer encoding: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn set_with(docs: Vec<(&str, Value)>) -> DocumentSet {
        let mut iter = docs.into_iter();
        let (root_path, root_value) = iter.next().unwrap();
        let mut set = DocumentSet::single(SpecSource::File(PathBuf::from(root_path)), root_value);
        for (path, value) in iter {
            let source = SpecSource::File(PathBuf::from(path));
            set.documents
                .insert(source.key(), LoadedDocument { source, value });
        }
        set
    }

    #[test]
    fn test_split_reference() {
        assert_eq!(split_reference("#/a/b"), ("", "/a/b"));
        assert_eq!(split_reference("pet.yaml"), ("pet.yaml", ""));
        assert_eq!(split_reference("pet.yaml#/Pet"), ("pet.yaml", "/Pet"));
    }

    #[test]
    fn test_resolve_local_pointer_with_escapes() {
        let set = set_with(vec![(
            "/api.json",
            json!({"paths": {"/pets/{id}": {"get": {"summary": "one pet"}}}}),
        )]);
        let resolved = set
            .resolve("/api.json", "#/paths/~1pets~1%7Bid%7D/get")
            .unwrap();
        assert_eq!(resolved.value["summary"], "one pet");
        assert_eq!(resolved.name.as_deref(), Some("get"));
        assert_eq!(resolved.doc, "/api.json");
    }

    #[test]
    fn test_resolve_external_document() {
        let set = set_with(vec![
            ("/specs/api.yaml", json!({})),
            ("/specs/common/pet.yaml", json!({"Pet": {"type": "object"}})),
        ]);
        let resolved = set
            .resolve("/specs/api.yaml", "common/pet.yaml#/Pet")
            .unwrap();
        assert_eq!(resolved.value["type"], "object");
        assert_eq!(resolved.doc, "/specs/common/pet.yaml");
        assert_eq!(resolved.name.as_deref(), Some("Pet"));
        assert_eq!(resolved.key, "/specs/common/pet.yaml#/Pet");
    }

    #[test]
    fn test_resolve_missing_target_is_reference_error() {
        let set = set_with(vec![("/api.json", json!({"components": {}}))]);
        let err = set
            .resolve("/api.json", "#/components/schemas/Nope")
            .unwrap_err();
        assert!(matches!(err, LoadError::Reference(_)));

        let err = set.resolve("/api.json", "other.json#/x").unwrap_err();
        assert!(matches!(err, LoadError::Reference(_)));
    }

    #[test]
    fn test_follow_chains_and_keeps_last_name() {
        let set = set_with(vec![(
            "/api.json",
            json!({
                "components": {"schemas": {
                    "Alias": {"$ref": "#/components/schemas/Pet"},
                    "Pet": {"type": "object"}
                }},
                "use": {"$ref": "#/components/schemas/Alias"}
            }),
        )]);
        let root = &set.root().unwrap().value;
        let resolved = set.follow("/api.json", &root["use"]).unwrap();
        assert_eq!(resolved.value["type"], "object");
        assert_eq!(resolved.name.as_deref(), Some("Pet"));
    }

    #[test]
    fn test_follow_detects_ref_loops() {
        let set = set_with(vec![(
            "/api.json",
            json!({"a": {"$ref": "#/b"}, "b": {"$ref": "#/a"}}),
        )]);
        let root = &set.root().unwrap().value;
        assert!(matches!(
            set.follow("/api.json", &root["a"]),
            Err(LoadError::Reference(_))
        ));
    }

    #[test]
    fn test_follow_plain_value_is_unchanged() {
        let set = set_with(vec![("/api.json", json!({"x": {"type": "string"}}))]);
        let root = &set.root().unwrap().value;
        let resolved = set.follow("/api.json", &root["x"]).unwrap();
        assert_eq!(resolved.value["type"], "string");
        assert!(resolved.name.is_none());
    }

    #[test]
    fn test_collect_refs_finds_nested() {
        let mut refs = Vec::new();
        collect_refs(
            &json!({"a": [{"$ref": "x.yaml"}], "b": {"c": {"$ref": "#/d"}}}),
            &mut refs,
        );
        refs.sort();
        assert_eq!(refs, vec!["#/d", "x.yaml"]);
    }

    #[test]
    fn test_decode_pointer() {
        assert_eq!(decode_pointer("#", "/%7Bid%7D").unwrap(), "/{id}");
        assert_eq!(decode_pointer("#", "/caf%C3%A9").unwrap(), "/café");
        assert_eq!(decode_pointer("#", "/100%").unwrap(), "/100%");
        assert_eq!(decode_pointer("#", "/plain").unwrap(), "/plain");
    }

    #[test]
    fn test_invalid_utf8_pointer_is_reference_error() {
        let set = set_with(vec![("/api.json", json!({"a": 1}))]);
        let err = set.resolve("/api.json", "#/%FF").unwrap_err();
        assert!(matches!(err, LoadError::Reference(_)), "{err}");
    }
}
