//! # Reference Resolver — `$ref` Targets to Values
//!
//! Resolving a reference ultimately re-enters generation: fragment refs
//! walk a document already in memory, external refs load and parse the
//! target file and switch the resolution context to its directory.
//!
//! A `#` anywhere in the joined external path marks a combined
//! external+fragment reference (`other.json#/definitions/x`) and is
//! detected before any filesystem probe, so the fragment marker never has
//! to name a literal file.
//!
//! Cycles (`a.json` referencing `b.json` referencing `a.json`) recurse
//! without bound; bounding is the caller's responsibility.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{FakerError, Result};
use crate::faker::Faker;
use crate::schema::SchemaNode;

/// Resolve the `$ref` carried by `node` and generate a value for its
/// target.
///
/// For fragment refs the effective parent is `parent` when given, else
/// the ref node itself (`raw`), which supports self-referential
/// top-level documents.
pub fn resolve(
    faker: &Faker,
    node: &SchemaNode,
    raw: &Value,
    parent: Option<&Value>,
    dir: &Path,
) -> Result<Value> {
    let reference = node.reference.as_deref().unwrap_or_default();
    if let Some(fragment) = reference.strip_prefix('#') {
        let root = parent.unwrap_or(raw);
        let target = walk_fragment(root, fragment, reference)?;
        // Fragment targets generate standalone, not re-merged with
        // their container.
        return faker.generate(&target, None, dir);
    }
    external_ref(faker, reference, parent, dir)
}

/// Walk `root` by successive key lookup along a `/`-separated fragment.
fn walk_fragment(root: &Value, fragment: &str, reference: &str) -> Result<Value> {
    let mut current = root;
    for segment in fragment.split('/').filter(|s| !s.is_empty()) {
        current = current.get(segment).ok_or_else(|| FakerError::BrokenReference {
            reference: reference.to_string(),
            segment: segment.to_string(),
        })?;
    }
    Ok(current.clone())
}

fn external_ref(
    faker: &Faker,
    reference: &str,
    parent: Option<&Value>,
    dir: &Path,
) -> Result<Value> {
    let file_name = reference.strip_prefix("./").unwrap_or(reference);
    let joined = dir.join(file_name);
    let joined_text = joined.to_string_lossy().into_owned();
    if joined_text.contains('#') {
        return fragment_in_external(faker, &joined_text);
    }
    if !joined.is_file() {
        return Err(FakerError::SchemaFileNotFound(joined));
    }

    let file = joined.canonicalize()?;
    tracing::debug!(file = %file.display(), "following external $ref");
    let document: Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
    let next_dir = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    // The original parent passes through so a continuation can still see
    // its context; the directory switches to the target file's.
    faker.generate(&document, parent, &next_dir)
}

/// `path/to/other.json#/definitions/x`: load the file half, then apply
/// the fragment against the freshly parsed document as its own parent.
fn fragment_in_external(faker: &Faker, path: &str) -> Result<Value> {
    let parts: Vec<&str> = path.split('#').collect();
    let &[file_part, fragment] = parts.as_slice() else {
        return Err(FakerError::InvalidReferenceFormat(path.to_string()));
    };
    let file = Path::new(file_part);
    if !file.is_file() {
        return Err(FakerError::SchemaFileNotFound(file.to_path_buf()));
    }
    let document: Value = serde_json::from_str(&fs::read_to_string(file)?)?;
    let target = walk_fragment(&document, fragment, path)?;
    let dir = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new(".").to_path_buf());
    faker.generate(&target, None, &dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_walk_fragment_reaches_nested_target() {
        let root = json!({
            "definitions": { "inner": { "type": "integer" } }
        });
        let target = walk_fragment(&root, "/definitions/inner", "#/definitions/inner").unwrap();
        assert_eq!(target, json!({ "type": "integer" }));
    }

    #[test]
    fn test_walk_fragment_missing_segment() {
        let root = json!({ "definitions": {} });
        let err = walk_fragment(&root, "/definitions/nope", "#/definitions/nope").unwrap_err();
        match err {
            FakerError::BrokenReference { segment, .. } => assert_eq!(segment, "nope"),
            other => panic!("expected BrokenReference, got {other}"),
        }
    }

    #[test]
    fn test_external_ref_missing_file() {
        let faker = Faker::new();
        let err = external_ref(&faker, "./does-not-exist.json", None, Path::new("/tmp"))
            .unwrap_err();
        assert!(matches!(err, FakerError::SchemaFileNotFound(_)));
    }

    #[test]
    fn test_combined_ref_with_extra_hash_is_invalid() {
        let faker = Faker::new();
        let err = fragment_in_external(&faker, "/tmp/a.json#/x#/y").unwrap_err();
        assert!(matches!(err, FakerError::InvalidReferenceFormat(_)));
    }
}
