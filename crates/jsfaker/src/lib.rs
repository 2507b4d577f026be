//! # jsfaker — Example Data from JSON Schema
//!
//! Synthesizes example instances that conform to a JSON Schema document,
//! given only the schema. Used to produce realistic fixtures for testing
//! and documentation without hand-writing payloads.
//!
//! ## Pipeline
//!
//! For every node: combinators (`allOf`/`anyOf`/`oneOf`) collapse into an
//! effective node, a surviving `$ref` is handed to the [`refs`] resolver
//! (which re-enters generation on its target), `enum` short-circuits with
//! a uniform pick, and otherwise generation dispatches on the declared
//! type, recursing into subschemas for arrays and objects.
//!
//! ```no_run
//! use jsfaker::Faker;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["id"],
//!     "properties": {
//!         "id": { "type": "integer", "minimum": 1 },
//!         "mail": { "type": "string", "format": "email" },
//!     },
//! });
//! let fixture = Faker::new()
//!     .generate(&schema, None, std::path::Path::new("."))
//!     .unwrap();
//! assert!(fixture["id"].as_i64().unwrap() >= 1);
//! ```
//!
//! ## Crate Policy
//!
//! - Output is not deterministic; repeated runs produce different but
//!   equally valid instances.
//! - Input schemas are trusted: well-formedness is not validated, and a
//!   cyclic `$ref` chain recurses without bound.
//! - Unsupported draft keywords (`not`, `if`/`then`/`else`) are ignored.

pub mod error;
pub mod faker;
pub mod providers;
pub mod refs;
pub mod schema;

pub use error::{FakerError, Result};
pub use faker::Faker;
pub use schema::{AdditionalProperties, SchemaNode, SchemaType, TypeDecl};
