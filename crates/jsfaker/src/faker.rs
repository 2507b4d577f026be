//! # Faker — Recursive Schema Value Generator
//!
//! Depth-first interpreter over a schema graph. For every node the order
//! is fixed: combinators collapse first, a surviving `$ref` delegates to
//! the resolver, `enum` short-circuits, then generation dispatches on the
//! effective type.
//!
//! The resolution context (the directory relative `$ref` targets resolve
//! against) is an explicit `&Path` parameter on every recursive call,
//! never ambient state, so sibling subschemas loaded from different files
//! cannot leak their directory into each other.
//!
//! ## Known Deviations (kept on purpose)
//!
//! - `multipleOf` multiplies the random value *after* bounding, so the
//!   result may exceed `minimum`/`maximum` when the multiple is not 1.
//! - `uniqueItems` deduplicates after generation and may return fewer
//!   elements than the sampled size.
//! - Numeric bounds truncate to integers before sampling, so fractional
//!   `minimum`/`maximum` values (e.g. `minimum: 0.5`) admit results
//!   below/above the declared bound.
//!
//! Both reproduce the behavior fixture consumers already rely on; see
//! DESIGN.md.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{FakerError, Result};
use crate::providers;
use crate::refs;
use crate::schema::{self, AdditionalProperties, SchemaNode, SchemaType, TypeDecl};

/// Default numeric bound when a schema declares none.
const DEFAULT_BOUND: i64 = i32::MAX as i64;

/// Schema-driven fixture generator.
///
/// Stateless; every generation samples the thread RNG, so repeated runs
/// produce different but equally valid instances.
#[derive(Debug, Default)]
pub struct Faker;

impl Faker {
    pub fn new() -> Self {
        Faker
    }

    /// Generate a fixture for a schema file. The file's directory becomes
    /// the resolution context for relative external references.
    ///
    /// # Errors
    ///
    /// `SchemaFileNotFound` when the path does not name a readable file,
    /// otherwise any error from [`Faker::generate`].
    pub fn generate_file(&self, path: &Path) -> Result<Value> {
        let file = path
            .canonicalize()
            .map_err(|_| FakerError::SchemaFileNotFound(path.to_path_buf()))?;
        let dir = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let document: Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
        tracing::debug!(file = %file.display(), "generating fixture from schema file");
        self.generate(&document, None, &dir)
    }

    /// Generate a value for one schema node.
    ///
    /// `parent` is consulted only when resolving in-document fragment
    /// references; `dir` is the directory relative external references
    /// resolve against.
    pub fn generate(&self, schema: &Value, parent: Option<&Value>, dir: &Path) -> Result<Value> {
        let resolved = schema::resolve_combinators(schema);
        let node = SchemaNode::from_value(&resolved)?;

        if node.reference.is_some() {
            return refs::resolve(self, &node, &resolved, parent, dir);
        }
        if let Some(choices) = &node.enum_values {
            return Ok(providers::random_element(choices)
                .cloned()
                .unwrap_or(Value::Null));
        }

        let kind = match &node.type_decl {
            Some(TypeDecl::One(name)) => SchemaType::parse(name)?,
            Some(TypeDecl::Many(names)) => {
                let name = providers::random_element(names)
                    .ok_or_else(|| FakerError::UnsupportedType("(empty type list)".into()))?;
                SchemaType::parse(name)?
            }
            None => return Err(FakerError::UnsupportedType("(missing)".into())),
        };

        match kind {
            SchemaType::Null => Ok(Value::Null),
            SchemaType::Boolean => Ok(Value::Bool(providers::random_bool())),
            SchemaType::Integer => Ok(self.fake_integer(&node)),
            SchemaType::Number => Ok(self.fake_number(&node)),
            SchemaType::String => self.fake_string(&node),
            SchemaType::Array => self.fake_array(&node, &resolved, dir),
            SchemaType::Object => self.fake_object(&node, &resolved, dir),
        }
    }

    /// Lower bound after applying `exclusiveMinimum`. Fractional bounds
    /// truncate toward zero (a known deviation, kept).
    fn effective_minimum(&self, node: &SchemaNode) -> i64 {
        let base = node.minimum.map(|m| m as i64).unwrap_or(-DEFAULT_BOUND);
        base + i64::from(node.exclusive_minimum)
    }

    /// Upper bound after applying `exclusiveMaximum`. Fractional bounds
    /// truncate toward zero (a known deviation, kept).
    fn effective_maximum(&self, node: &SchemaNode) -> i64 {
        let base = node.maximum.map(|m| m as i64).unwrap_or(DEFAULT_BOUND);
        base - i64::from(node.exclusive_maximum)
    }

    fn fake_integer(&self, node: &SchemaNode) -> Value {
        let minimum = self.effective_minimum(node);
        let maximum = self.effective_maximum(node);
        let multiple = node.multiple_of.map(|m| m as i64).unwrap_or(1);
        // Multiplied after bounding; may exceed the declared range.
        Value::from(providers::integer_between(minimum, maximum).saturating_mul(multiple))
    }

    fn fake_number(&self, node: &SchemaNode) -> Value {
        let minimum = self.effective_minimum(node) as f64;
        let maximum = self.effective_maximum(node) as f64;
        let multiple = node.multiple_of.unwrap_or(1.0);
        Value::from(providers::float_between(minimum, maximum) * multiple)
    }

    fn fake_string(&self, node: &SchemaNode) -> Result<Value> {
        if let Some(format) = &node.format {
            return Ok(Value::String(self.formatted_value(format)?));
        }
        if let Some(pattern) = &node.pattern {
            return Ok(Value::String(providers::regexify(pattern)));
        }
        let min = node.min_length.unwrap_or(1);
        let max = node.max_length.unwrap_or_else(|| 5.max(min + 1));
        if max < 5 {
            return Ok(Value::String(providers::lorem_text(5).chars().take(max).collect()));
        }
        let mut lorem = providers::lorem_text(max);
        if lorem.chars().count() < min {
            lorem = lorem.repeat(min);
        }
        Ok(Value::String(lorem.chars().take(max).collect()))
    }

    fn formatted_value(&self, format: &str) -> Result<String> {
        Ok(match format {
            // RFC 3339, section 5.6.
            "date-time" => providers::date_time_rfc3339(),
            // RFC 5322, section 3.4.1.
            "email" => providers::email(),
            // RFC 1034, section 3.1.
            "hostname" => providers::hostname(),
            "ipv4" => providers::ipv4(),
            "ipv6" => providers::ipv6(),
            // RFC 3986.
            "uri" => providers::url(),
            other => return Err(FakerError::UnsupportedFormat(other.to_string())),
        })
    }

    fn fake_array(&self, node: &SchemaNode, raw: &Value, dir: &Path) -> Result<Value> {
        let subschemas: Vec<Value> = match &node.items {
            // Schema-less arrays still produce varied contents.
            None => vec![schema::wildcard()],
            Some(single @ Value::Object(_)) => vec![single.clone()],
            Some(Value::Array(tuple)) => tuple.clone(),
            Some(other) => {
                return Err(FakerError::InvalidItems(schema::json_kind(other).to_string()))
            }
        };

        let size = providers::integer_between(
            node.min_items.unwrap_or(0) as i64,
            node.max_items.unwrap_or(subschemas.len()) as i64,
        ) as usize;
        // Tuple slots cycle over the sized prefix, matching the original
        // slice-then-modulo behavior.
        let slots = &subschemas[..size.min(subschemas.len())];

        let mut elements = Vec::with_capacity(size);
        if !slots.is_empty() {
            for i in 0..size {
                elements.push(self.generate(&slots[i % slots.len()], Some(raw), dir)?);
            }
        }

        if node.unique_items {
            let mut unique: Vec<Value> = Vec::with_capacity(elements.len());
            for element in elements {
                if !unique.contains(&element) {
                    unique.push(element);
                }
            }
            elements = unique;
        }
        Ok(Value::Array(elements))
    }

    fn fake_object(&self, node: &SchemaNode, raw: &Value, dir: &Path) -> Result<Value> {
        let empty = Map::new();
        let properties = node.properties.as_ref().unwrap_or(&empty);

        let mut object = Map::new();
        for name in self.property_names(node) {
            let subschema = match properties.get(&name) {
                Some(explicit) => explicit.clone(),
                None => self
                    .additional_property_schema(node, &name)
                    .unwrap_or_else(schema::wildcard),
            };
            object.insert(name, self.generate(&subschema, Some(raw), dir)?);
        }
        Ok(Value::Object(object))
    }

    /// Select the property names to generate: all required keys, a random
    /// subset of optional keys expanded through `dependencies`, then
    /// filler names until `minProperties` is met.
    fn property_names(&self, node: &SchemaNode) -> Vec<String> {
        let optional: Vec<String> = node
            .properties
            .as_ref()
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default();
        let max_properties = node
            .max_properties
            .unwrap_or_else(|| optional.len().saturating_sub(node.required.len()));
        let pick = providers::integer_between(0, optional.len().min(max_properties) as i64) as usize;

        let mut names: Vec<String> = node.required.clone();
        for key in providers::sample(&optional, pick) {
            if !names.contains(key) {
                names.push(key.clone());
            }
            if let Some(dependents) = node.dependencies.as_ref().and_then(|d| d.get(key)) {
                for dependent in dependents {
                    if !names.contains(dependent) {
                        names.push(dependent.clone());
                    }
                }
            }
        }

        let patterns: Vec<String> = node
            .pattern_properties
            .as_ref()
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default();
        let extras_allowed =
            !matches!(node.additional_properties, AdditionalProperties::Allowed(false));
        while names.len() < node.min_properties.unwrap_or(0) {
            let name = if extras_allowed {
                providers::lorem_word()
            } else {
                match providers::random_element(&patterns) {
                    Some(pattern) => providers::regexify(pattern),
                    // No pattern to draw names from; fall back to words
                    // rather than spinning.
                    None => providers::lorem_word(),
                }
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Subschema for a property not listed in `properties`: the first
    /// matching `patternProperties` regex, else a schema-valued
    /// `additionalProperties`, else nothing (caller falls back to a
    /// wildcard).
    fn additional_property_schema(&self, node: &SchemaNode, name: &str) -> Option<Value> {
        if let Some(patterns) = &node.pattern_properties {
            for (pattern, subschema) in patterns {
                if let Ok(re) = regex::Regex::new(pattern) {
                    if re.is_match(name) {
                        return Some(subschema.clone());
                    }
                }
            }
        }
        if let AdditionalProperties::Schema(map) = &node.additional_properties {
            return Some(Value::Object(map.clone()));
        }
        None
    }
}
