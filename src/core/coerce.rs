//! Value coercion between environment values and field strings.
//!
//! Fields only hold strings. Environment files can carry numbers, booleans
//! and nested structures (JSON, TOML), so values are flattened on the way in
//! and re-inflated on the way out.
//!
//! The round trip is lossy for ambiguous text: anything that
//! looks like an integer or JSON comes back as the richer type. `"007"`
//! becomes `7` and `"+5"` becomes `5`.

use serde_json::Value;

/// Render a value as field text.
///
/// Strings pass through untouched so values read from `.env` files do not
/// pick up quotes. Everything else is compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Serializing a Value cannot fail: its map keys are always strings.
        other => other.to_string(),
    }
}

/// Turn field text back into a value.
///
/// Integers are parsed before JSON so large ids keep full precision instead
/// of going through `f64`. An integer too large for `u64` stays a string.
pub fn destringify(text: &str) -> Value {
    let text = text.trim();

    if is_integer(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(n) = text.trim_start_matches('+').parse::<u64>() {
            return Value::from(n);
        }
        return Value::String(text.to_string());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::String(_)) | Err(_) => Value::String(text.to_string()),
        Ok(value) => value,
    }
}

/// Matches `^[+-]?[0-9]+$`.
fn is_integer(text: &str) -> bool {
    let digits = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
