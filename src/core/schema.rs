//! # Schemas
//!
//! The recursive schema node used by parameters, bodies and responses, the
//! `allOf` merger, and the small formatting helpers the operation screen
//! uses to describe a schema on one line.
//!
//! ```text
//! allOf: [ A, B, C ]  ──fold──▶  type       = last non-empty
//!                                properties = union, collisions merged recursively
//!                                required   = A ++ B ++ C
//! ```

use serde_json::Value;

/// One schema node. Composition lists are kept raw; call [`merge_all_of`]
/// to flatten `all_of`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub schema_type: String,
    pub format: String,
    pub description: String,
    pub default: Option<Value>,
    pub enum_values: Vec<Value>,
    pub deprecated: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub nullable: bool,

    pub min: Option<f64>,
    pub max: Option<f64>,
    pub exclusive_min: bool,
    pub exclusive_max: bool,
    pub multiple_of: Option<f64>,

    pub min_length: u64,
    pub max_length: Option<u64>,
    pub pattern: String,

    pub min_items: u64,
    pub max_items: Option<u64>,
    pub unique_items: bool,

    pub items: Option<Box<Schema>>,
    /// Object properties in declaration order.
    pub properties: Vec<(String, Schema)>,
    pub required: Vec<String>,

    pub all_of: Vec<Schema>,
    pub one_of: Vec<Schema>,

    /// Component name when this node came from `#/components/schemas/<name>`.
    pub ref_name: Option<String>,
    /// Set on a `$ref` that points back into a schema already being expanded.
    /// Such a node carries only `ref_name`.
    pub circular: bool,
    /// Set on a `$ref` left unexpanded because the enclosing schema tree
    /// grew too large. Such a node carries only `ref_name`.
    pub truncated: bool,
}

impl Schema {
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// A `$ref` placeholder with nothing but its name.
    pub fn is_stub(&self) -> bool {
        self.circular || self.truncated
    }

    /// Number of nodes in this tree, the root included.
    pub fn node_count(&self) -> usize {
        1 + self.items.as_deref().map_or(0, Schema::node_count)
            + self.properties.iter().map(|(_, s)| s.node_count()).sum::<usize>()
            + self.all_of.iter().map(Schema::node_count).sum::<usize>()
            + self.one_of.iter().map(Schema::node_count).sum::<usize>()
    }
}

/// Flatten an `allOf` composition into a single schema.
///
/// Returns `None` when `schema.all_of` is empty. The input and its children
/// are only read; the result is a fresh tree.
///
/// A subschema that itself carries `allOf` has its own list folded in first,
/// at its position, before its own `type`/`properties`/`required`.
pub fn merge_all_of(schema: &Schema) -> Option<Schema> {
    if schema.all_of.is_empty() {
        return None;
    }
    let mut merged = Schema::default();
    for part in &schema.all_of {
        fold_into(&mut merged, part);
    }
    Some(merged)
}

fn fold_into(merged: &mut Schema, part: &Schema) {
    for inner in &part.all_of {
        fold_into(merged, inner);
    }

    if !part.schema_type.is_empty() {
        merged.schema_type = part.schema_type.clone();
    }

    for (name, prop) in &part.properties {
        match merged.properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = merge_pair(existing, prop),
            None => merged.properties.push((name.clone(), prop.clone())),
        }
    }

    merged.required.extend(part.required.iter().cloned());
}

/// Merge two colliding property definitions as if they were `allOf: [a, b]`.
fn merge_pair(a: &Schema, b: &Schema) -> Schema {
    let mut merged = Schema::default();
    fold_into(&mut merged, a);
    fold_into(&mut merged, b);
    merged
}

/// Short type label: `string(date-time)`, `array of Pet`, `object`.
pub fn type_string(schema: &Schema) -> String {
    if schema.is_stub() {
        return schema.ref_name.clone().unwrap_or_default();
    }
    match schema.schema_type.as_str() {
        "" => String::new(),
        "array" => match schema.items.as_deref() {
            Some(items) => format!("array of {}", item_label(items)),
            None => "array".to_string(),
        },
        t if schema.format.is_empty() => t.to_string(),
        t => format!("{t}({})", schema.format),
    }
}

fn item_label(items: &Schema) -> String {
    if let Some(name) = &items.ref_name {
        return name.clone();
    }
    let label = type_string(items);
    if label.is_empty() {
        "any".to_string()
    } else {
        label
    }
}

/// Human-readable constraints, e.g. `1 <= n <= 10`, `len <= 30`, `2 <= items`.
pub fn constraint_strings(schema: &Schema) -> Vec<String> {
    let mut out = Vec::new();
    match schema.schema_type.as_str() {
        "integer" | "number" => {
            if schema.min.is_some() || schema.max.is_some() {
                let mut s = "n".to_string();
                if let Some(min) = schema.min {
                    let op = if schema.exclusive_min { "<" } else { "<=" };
                    s = format!("{min} {op} {s}");
                }
                if let Some(max) = schema.max {
                    let op = if schema.exclusive_max { "<" } else { "<=" };
                    s = format!("{s} {op} {max}");
                }
                out.push(s);
            }
            if let Some(m) = schema.multiple_of {
                out.push(format!("multiple of {m}"));
            }
        }
        "string" => {
            if schema.min_length > 0 || schema.max_length.is_some() {
                let mut s = "len".to_string();
                if schema.min_length > 0 {
                    s = format!("{} <= {s}", schema.min_length);
                }
                if let Some(max) = schema.max_length {
                    s = format!("{s} <= {max}");
                }
                out.push(s);
            }
            if !schema.pattern.is_empty() {
                out.push(schema.pattern.clone());
            }
        }
        "array" => {
            if schema.min_items > 0 || schema.max_items.is_some() {
                let mut s = "items".to_string();
                if schema.min_items > 0 {
                    s = format!("{} <= {s}", schema.min_items);
                }
                if let Some(max) = schema.max_items {
                    s = format!("{s} <= {max}");
                }
                out.push(s);
            }
            if schema.unique_items {
                out.push("unique".to_string());
            }
        }
        _ => {}
    }
    out
}

/// `[a, b, 3]`; strings are shown without quotes.
pub fn values_string(values: &[Value]) -> String {
    let parts: Vec<String> = values.iter().map(value_string).collect();
    format!("[{}]", parts.join(", "))
}

pub fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
