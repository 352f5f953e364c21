//! Flat TOML tables.
//!
//! TOML has no null, so nulls are refused on write.

use std::path::Path;

use serde_json::Value;

use crate::core::types::Environment;
use crate::error::{FormatError, Result};

/// Read a top-level TOML table.
pub fn read(path: &Path) -> Result<Environment> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<Environment> {
    let table: toml::Table = toml::from_str(contents).map_err(|source| FormatError::TomlParse {
        path: path.display().to_string(),
        source,
    })?;

    match serde_json::to_value(table)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(FormatError::NotAnObject {
            path: path.display().to_string(),
        }
        .into()),
    }
}

/// Render as `KEY = value` lines.
pub fn render(env: &Environment) -> Result<String> {
    if let Some((key, _)) = env.iter().find(|(_, v)| contains_null(v)) {
        return Err(FormatError::Unrepresentable {
            key: key.clone(),
            format: "toml",
        }
        .into());
    }
    let text = toml::to_string(env).map_err(FormatError::TomlWrite)?;
    Ok(text)
}

fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(contains_null),
        Value::Object(map) => map.values().any(contains_null),
        _ => false,
    }
}
