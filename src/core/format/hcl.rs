//! Flat HCL bodies: one `KEY = value` attribute per variable.

use std::path::Path;

use serde_json::Value;

use crate::core::types::Environment;
use crate::error::{FormatError, Result};

/// Read the attributes of an HCL body.
pub fn read(path: &Path) -> Result<Environment> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<Environment> {
    let value: Value = hcl::from_str(contents).map_err(|source| FormatError::HclParse {
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

/// Render as an HCL body.
pub fn render(env: &Environment) -> Result<String> {
    let text = hcl::to_string(env).map_err(FormatError::HclWrite)?;
    Ok(text)
}
