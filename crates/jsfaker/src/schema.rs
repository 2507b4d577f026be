//! # Schema Model — Typed View of a Schema Node
//!
//! A schema node arrives as untyped JSON. This module performs the single
//! JSON-to-typed-node parse step: [`SchemaNode::from_value`] turns a
//! `serde_json::Value` into a discriminated structure so the generator
//! works against named fields instead of ad hoc key probing.
//!
//! Combinator resolution (`allOf`/`anyOf`/`oneOf`) happens *before*
//! typing, on the raw JSON map, because the merge rule is a shallow
//! last-wins key union over arbitrary keys.
//!
//! ## Merge Semantics
//!
//! `allOf` merges every branch; `anyOf` merges a random non-empty subset;
//! `oneOf` picks a single branch unmerged. The union is shallow and
//! last-wins — it does not intersect overlapping `required` arrays or
//! numeric ranges. This matches the original generator and is kept
//! intentionally (see DESIGN.md).

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FakerError, Result};
use crate::providers;

/// The seven value kinds a schema node can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl SchemaType {
    /// Every kind, in the order the JSON Schema specification lists them.
    pub const ALL: [SchemaType; 7] = [
        SchemaType::Null,
        SchemaType::Boolean,
        SchemaType::Integer,
        SchemaType::Number,
        SchemaType::String,
        SchemaType::Array,
        SchemaType::Object,
    ];

    /// Parse a declared type name.
    ///
    /// # Errors
    ///
    /// Returns `FakerError::UnsupportedType` naming the offending value
    /// when the name is not one of the seven kinds.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "null" => Ok(SchemaType::Null),
            "boolean" => Ok(SchemaType::Boolean),
            "integer" => Ok(SchemaType::Integer),
            "number" => Ok(SchemaType::Number),
            "string" => Ok(SchemaType::String),
            "array" => Ok(SchemaType::Array),
            "object" => Ok(SchemaType::Object),
            other => Err(FakerError::UnsupportedType(other.to_string())),
        }
    }

    /// The canonical keyword for this kind.
    pub fn name(self) -> &'static str {
        match self {
            SchemaType::Null => "null",
            SchemaType::Boolean => "boolean",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::String => "string",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }
}

/// A `type` declaration: a single kind or an ordered list to choose among.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// `"type": "string"`
    One(String),
    /// `"type": ["string", "null"]`
    Many(Vec<String>),
}

/// The `additionalProperties` keyword: a boolean switch or a subschema
/// applied to every property not covered by `properties`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` (the default) or `false`.
    Allowed(bool),
    /// A schema for extra properties.
    Schema(Map<String, Value>),
}

impl Default for AdditionalProperties {
    fn default() -> Self {
        AdditionalProperties::Allowed(true)
    }
}

/// Typed view of one schema node. Any field may be absent.
///
/// `items` stays a raw `Value` because it is either a single schema
/// object or a sequence of schemas; the distinction is enforced at the
/// point of use (`InvalidItems` otherwise). Property subschemas likewise
/// stay raw — they re-enter generation, which performs its own parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaNode {
    /// `$ref` — fragment or external reference string.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// `type` — scalar kind name or list of kind names.
    #[serde(rename = "type")]
    pub type_decl: Option<TypeDecl>,
    /// `enum` — short-circuits all other generation when present.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,

    // Numeric constraints.
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<f64>,

    // String constraints.
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub format: Option<String>,

    // Array constraints.
    pub items: Option<Value>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,

    // Object constraints.
    pub properties: Option<Map<String, Value>>,
    pub required: Vec<String>,
    pub pattern_properties: Option<Map<String, Value>>,
    pub additional_properties: AdditionalProperties,
    pub min_properties: Option<usize>,
    pub max_properties: Option<usize>,
    pub dependencies: Option<HashMap<String, Vec<String>>>,
}

impl SchemaNode {
    /// Parse a raw JSON value into a typed node.
    ///
    /// # Errors
    ///
    /// Returns `FakerError::InvalidSchema` when the value is not a JSON
    /// object or when a recognized keyword carries a malformed value
    /// (e.g. a numeric `required`).
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(FakerError::InvalidSchema(json_kind(value).to_string()));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| FakerError::InvalidSchema(e.to_string()))
    }
}

/// Resolve `allOf`/`anyOf`/`oneOf` on a raw node, returning the effective
/// node to generate from. Nodes without combinators pass through.
pub fn resolve_combinators(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return value.clone();
    };
    if let Some(Value::Array(branches)) = map.get("allOf") {
        return merge_branches(branches.iter());
    }
    if let Some(Value::Array(branches)) = map.get("anyOf") {
        let picked = providers::random_subset(branches);
        return merge_branches(picked.into_iter());
    }
    if let Some(Value::Array(branches)) = map.get("oneOf") {
        if let Some(branch) = providers::random_element(branches) {
            return branch.clone();
        }
    }
    value.clone()
}

/// Shallow key union over schema objects; later branches win on conflict.
fn merge_branches<'a>(branches: impl Iterator<Item = &'a Value>) -> Value {
    let mut merged = Map::new();
    for branch in branches {
        if let Some(object) = branch.as_object() {
            for (key, value) in object {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(merged)
}

/// An anonymous schema with a uniformly chosen type, used when array
/// items or extra object properties have no schema of their own.
pub fn wildcard() -> Value {
    let kind = providers::random_element(&SchemaType::ALL)
        .copied()
        .unwrap_or(SchemaType::Null);
    serde_json::json!({ "type": kind.name() })
}

/// Human-readable kind of a JSON value, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_all_seven_type_names() {
        for kind in SchemaType::ALL {
            assert_eq!(SchemaType::parse(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let err = SchemaType::parse("bogus").unwrap_err();
        assert!(matches!(err, FakerError::UnsupportedType(name) if name == "bogus"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = SchemaNode::from_value(&json!(null)).unwrap_err();
        assert!(matches!(err, FakerError::InvalidSchema(_)));
        let err = SchemaNode::from_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, FakerError::InvalidSchema(_)));
    }

    #[test]
    fn test_from_value_reads_renamed_keywords() {
        let node = SchemaNode::from_value(&json!({
            "$ref": "#/definitions/x",
            "type": "string",
            "enum": [1, 2],
        }))
        .unwrap();
        assert_eq!(node.reference.as_deref(), Some("#/definitions/x"));
        assert!(matches!(node.type_decl, Some(TypeDecl::One(ref t)) if t == "string"));
        assert_eq!(node.enum_values.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_additional_properties_both_arms() {
        let node = SchemaNode::from_value(&json!({ "additionalProperties": false })).unwrap();
        assert!(matches!(node.additional_properties, AdditionalProperties::Allowed(false)));

        let node =
            SchemaNode::from_value(&json!({ "additionalProperties": { "type": "string" } }))
                .unwrap();
        assert!(matches!(node.additional_properties, AdditionalProperties::Schema(_)));

        // Default is permissive.
        let node = SchemaNode::from_value(&json!({})).unwrap();
        assert!(matches!(node.additional_properties, AdditionalProperties::Allowed(true)));
    }

    #[test]
    fn test_all_of_merge_is_shallow_last_wins() {
        let merged = resolve_combinators(&json!({
            "allOf": [
                { "type": "integer", "minimum": 1, "maximum": 5 },
                { "maximum": 10 },
            ]
        }));
        assert_eq!(merged["type"], "integer");
        assert_eq!(merged["minimum"], 1);
        assert_eq!(merged["maximum"], 10);
    }

    #[test]
    fn test_all_of_merge_drops_sibling_keys() {
        // Keys outside the combinator list do not survive the merge.
        let merged = resolve_combinators(&json!({
            "title": "host",
            "allOf": [{ "type": "boolean" }],
        }));
        assert_eq!(merged["type"], "boolean");
        assert!(merged.get("title").is_none());
    }

    #[test]
    fn test_one_of_picks_a_listed_branch() {
        let schema = json!({
            "oneOf": [{ "type": "integer" }, { "type": "boolean" }]
        });
        for _ in 0..20 {
            let picked = resolve_combinators(&schema);
            let name = picked["type"].as_str().unwrap();
            assert!(name == "integer" || name == "boolean");
        }
    }

    #[test]
    fn test_any_of_merges_non_empty_subset() {
        let schema = json!({
            "anyOf": [{ "type": "integer" }, { "minimum": 3 }]
        });
        for _ in 0..20 {
            let merged = resolve_combinators(&schema);
            let object = merged.as_object().unwrap();
            assert!(!object.is_empty());
        }
    }

    #[test]
    fn test_wildcard_has_recognized_type() {
        for _ in 0..20 {
            let node = wildcard();
            let name = node["type"].as_str().unwrap();
            assert!(SchemaType::parse(name).is_ok());
        }
    }
}
