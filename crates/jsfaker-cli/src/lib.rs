//! # jsfaker-cli — Fixture Tree Generation
//!
//! Library surface for the `jsfaker` binary: walks a schema directory,
//! generates one fixture per `*.json` schema file, mirrors the directory
//! structure under the output root, and keeps going past per-file
//! failures.

pub mod generate;
