//! Flat JSON objects.

use std::path::Path;

use serde_json::Value;

use crate::core::types::Environment;
use crate::error::{FormatError, Result};

/// Read a top-level JSON object.
pub fn read(path: &Path) -> Result<Environment> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<Environment> {
    let value: Value = serde_json::from_str(contents).map_err(|source| FormatError::Json {
        path: path.display().to_string(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(FormatError::NotAnObject {
            path: path.display().to_string(),
        }
        .into()),
    }
}

/// Pretty-printed object with sorted keys.
pub fn render(env: &Environment) -> Result<String> {
    let mut text = serde_json::to_string_pretty(env)?;
    text.push('\n');
    Ok(text)
}
