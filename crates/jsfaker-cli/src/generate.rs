//! Fixture tree generation: schema directory in, fixture directory out.
//!
//! Errors from individual schema files are reported and skipped; this is
//! the recovery boundary for the generator's propagation policy. Only
//! setup failures (unreadable schema root, unwritable output root) abort
//! the run.

use std::fs;
use std::path::{Path, PathBuf};

use jsfaker::Faker;
use serde_json::Value;

/// Arguments for fixture tree generation.
#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Directory tree containing JSON Schema files.
    pub schema_dir: PathBuf,

    /// Directory to write generated fixtures into (created if absent).
    pub out_dir: PathBuf,

    /// Base URI stamped into each generated object root as `$schema`,
    /// suffixed with the schema file name.
    #[arg(long)]
    pub schema_uri: Option<String>,
}

/// Outcome counters for one run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Fixtures successfully written.
    pub generated: usize,
    /// Schema files skipped after a generation or write failure.
    pub failed: usize,
}

/// Generate a fixture for every `*.json` schema under `schema_dir`.
pub fn run(args: &GenerateArgs) -> anyhow::Result<Summary> {
    anyhow::ensure!(
        args.schema_dir.is_dir(),
        "schema directory does not exist: {}",
        args.schema_dir.display()
    );

    let faker = Faker::new();
    let mut summary = Summary::default();
    for path in find_schema_files(&args.schema_dir) {
        match generate_one(&faker, &path, args) {
            Ok(target) => {
                summary.generated += 1;
                tracing::info!(fixture = %target.display(), "wrote fixture");
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!(schema = %path.display(), error = %e, "skipping schema file");
            }
        }
    }
    tracing::info!(
        generated = summary.generated,
        failed = summary.failed,
        "fixture generation finished"
    );
    Ok(summary)
}

fn generate_one(faker: &Faker, path: &Path, args: &GenerateArgs) -> anyhow::Result<PathBuf> {
    let mut fixture = faker.generate_file(path)?;

    if let (Value::Object(object), Some(uri)) = (&mut fixture, &args.schema_uri) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        object.insert(
            "$schema".to_string(),
            Value::String(format!("{uri}/{file_name}")),
        );
    }

    let relative = path.strip_prefix(&args.schema_dir).unwrap_or(path);
    let target = args.out_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut text = serde_json::to_string_pretty(&fixture)?;
    text.push('\n');
    fs::write(&target, text)?;
    Ok(target)
}

/// Recursively collect every `*.json` file under `dir`, sorted.
fn find_schema_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(find_schema_files(&path));
            } else if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}
