//! Collector parameter files
//!
//! Collectors are started with a parameter module written next to them. The
//! default format is an importable Python module:
//!
//! ```text
//! # Forum search parameters (Search ID: 42)
//! SEARCH_PARAMS = {
//!     "and_terms": [
//!         "wheat"
//!     ],
//!     ...
//! }
//!
//! MINIMUM_POSTS = 10000
//! ```
//!
//! The JSON format carries the same document for collectors that do not
//! import Python.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::dialect::{CollectorQuerySpec, Dialect};

const INDENT: &str = "    ";

/// On-disk format of a parameter file
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ParamsFormat {
    Json,
    #[default]
    Python,
}

impl ParamsFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ParamsFormat::Json => "json",
            ParamsFormat::Python => "py",
        }
    }
}

/// Name of the minimum-count constant the collector reads.
pub fn minimum_key(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Forum => "MINIMUM_POSTS",
        Dialect::Feed => "MINIMUM_TWEETS",
    }
}

/// File name for a dialect's parameters: `<dialect>_search_params_<id>.<ext>`
pub fn file_name(dialect: Dialect, search_id: &str, format: ParamsFormat) -> String {
    format!(
        "{}_search_params_{}.{}",
        dialect.name(),
        search_id,
        format.extension()
    )
}

/// Stable file name collectors can import without knowing the search ID:
/// `<dialect>_search_params.<ext>`
pub fn latest_file_name(dialect: Dialect, format: ParamsFormat) -> String {
    format!("{}_search_params.{}", dialect.name(), format.extension())
}

/// Check that a search ID can be embedded in a file name.
pub fn validate_search_id(search_id: &str) -> Result<()> {
    if search_id.is_empty() {
        bail!("Search ID cannot be empty");
    }
    if search_id.contains(&['/', '\\'][..]) || search_id.contains("..") {
        bail!("Search ID must not contain path separators or '..': {}", search_id);
    }
    Ok(())
}

/// Render a parameter file body.
pub fn render(
    search_id: &str,
    spec: &CollectorQuerySpec,
    format: ParamsFormat,
    minimum: u64,
) -> Result<String> {
    let dialect = spec.dialect();
    match format {
        ParamsFormat::Python => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "# {} search parameters (Search ID: {})",
                title(dialect),
                search_id
            );
            out.push_str("SEARCH_PARAMS = ");
            let value = spec.to_value().context("Failed to serialize search parameters")?;
            write_python(&mut out, &value, 0);
            out.push_str("\n\n");
            let _ = writeln!(out, "{} = {}", minimum_key(dialect), minimum);
            Ok(out)
        }
        ParamsFormat::Json => {
            let mut doc = serde_json::Map::new();
            doc.insert("search_id".to_string(), Value::from(search_id));
            doc.insert("dialect".to_string(), Value::from(dialect.name()));
            let value = spec.to_value().context("Failed to serialize search parameters")?;
            doc.insert("search_params".to_string(), value);
            doc.insert(
                minimum_key(dialect).to_ascii_lowercase(),
                Value::from(minimum),
            );
            let mut out = serde_json::to_string_pretty(&Value::Object(doc))
                .context("Failed to serialize search parameters")?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Write the parameter file for `spec` into `dir`, creating it if needed.
pub fn write_params(
    dir: &Path,
    search_id: &str,
    spec: &CollectorQuerySpec,
    format: ParamsFormat,
    minimum: u64,
) -> Result<PathBuf> {
    validate_search_id(search_id)?;
    let contents = render(search_id, spec, format, minimum)?;
    write_file(dir, &file_name(spec.dialect(), search_id, format), &contents)
}

/// Like [`write_params`], but to the stable [`latest_file_name`], replacing
/// whatever an earlier search left there.
pub fn write_latest(
    dir: &Path,
    search_id: &str,
    spec: &CollectorQuerySpec,
    format: ParamsFormat,
    minimum: u64,
) -> Result<PathBuf> {
    validate_search_id(search_id)?;
    let contents = render(search_id, spec, format, minimum)?;
    write_file(dir, &latest_file_name(spec.dialect(), format), &contents)
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create params directory: {:?}", dir))?;
    let path = dir.join(name);
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write params file: {:?}", path))?;

    info!(path = %path.display(), "wrote search parameters");
    Ok(path)
}

fn title(dialect: Dialect) -> String {
    let name = dialect.name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Append `value` as a Python literal, pretty-printed like `json.dumps(indent=4)`.
fn write_python(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        // JSON string escapes are valid Python string escapes
        Value::String(s) => out.push_str(&Value::String(s.clone()).to_string()),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_python(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(out, depth + 1);
                out.push_str(&Value::String(key.clone()).to_string());
                out.push_str(": ");
                write_python(out, item, depth + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
