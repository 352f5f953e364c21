//! `.env` files.
//!
//! Reads the layered set `<path>.local`, `<path>`, `<path>.<env>`,
//! `<path>.<env>.local`, later files overriding earlier ones.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::core::coerce;
use crate::core::types::Environment;
use crate::error::Result;

/// Files consulted for `path` and `environment`, in override order.
pub fn layered_paths(path: &Path, environment: &str) -> Vec<PathBuf> {
    let base = path.to_string_lossy();
    vec![
        PathBuf::from(format!("{}.local", base)),
        path.to_path_buf(),
        PathBuf::from(format!("{}.{}", base, environment)),
        PathBuf::from(format!("{}.{}.local", base, environment)),
    ]
}

/// Read and merge every existing file of the layered set.
///
/// Missing files are skipped; an environment with no files at all is empty.
/// References in a file resolve against its own earlier lines, then the
/// layers read before it, then the process environment.
///
/// # Errors
///
/// Returns error if an existing file cannot be read.
pub fn read_layered(path: &Path, environment: &str) -> Result<Environment> {
    let mut env = Environment::new();
    for file in layered_paths(path, environment) {
        if !file.is_file() {
            continue;
        }
        let contents = std::fs::read_to_string(&file)?;
        let entries = parse(&contents, &env);
        debug!(path = %file.display(), entries = entries.len(), "read env file");
        for (key, value) in entries {
            env.insert(key, Value::String(value));
        }
    }
    Ok(env)
}

/// Parse `.env` text into key/value pairs, in file order.
///
/// Skips empty lines and comments (lines starting with #), and drops a
/// trailing ` # comment` after a value. Supports values with or without
/// quotes and an optional `export ` prefix.
///
/// `$NAME` and `${NAME}` expand in unquoted and double-quoted values, looked
/// up in earlier lines, then `known`, then the process environment; unknown
/// names expand to nothing. Single-quoted values are taken literally and
/// `\$` keeps a literal dollar sign.
pub fn parse(contents: &str, known: &Environment) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, raw)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = {
            let lookup = |name: &str| resolve(name, &entries, known);
            parse_value(raw.trim(), &lookup)
        };
        entries.push((key.to_string(), value));
    }

    entries
}

/// Render an environment as `.env` text, one `KEY=value` per line.
///
/// Quotes values that contain spaces or special characters.
pub fn render(env: &Environment) -> String {
    let mut output = String::new();

    for (key, value) in env {
        let value = coerce::stringify(value);
        if needs_quotes(&value) {
            output.push_str(&format!("{}=\"{}\"\n", key, escape(&value)));
        } else {
            output.push_str(&format!("{}={}\n", key, value));
        }
    }

    output
}

fn resolve(name: &str, entries: &[(String, String)], known: &Environment) -> String {
    entries
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .or_else(|| known.get(name).map(coerce::stringify))
        .or_else(|| std::env::var(name).ok())
        .unwrap_or_default()
}

fn parse_value(raw: &str, lookup: &dyn Fn(&str) -> String) -> String {
    if let Some(inner) = raw.strip_prefix('"') {
        if let Some(end) = closing_quote(inner) {
            if is_trailer(&inner[end + 1..]) {
                return expand(&inner[..end], true, lookup);
            }
        }
    }

    if let Some(inner) = raw.strip_prefix('\'') {
        if let Some(end) = inner.find('\'') {
            if is_trailer(&inner[end + 1..]) {
                return inner[..end].to_string();
            }
        }
    }

    expand(strip_comment(raw), false, lookup)
}

/// Byte offset of the first unescaped `"`.
fn closing_quote(value: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in value.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Whatever follows a closing quote: nothing, or a comment.
fn is_trailer(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with('#')
}

/// Cut an unquoted value at the first `#` that follows whitespace.
fn strip_comment(raw: &str) -> &str {
    let cut = raw
        .char_indices()
        .find(|&(i, ch)| ch == '#' && raw[..i].ends_with(char::is_whitespace))
        .map(|(i, _)| i);

    match cut {
        Some(i) => raw[..i].trim_end(),
        None => raw,
    }
}

/// Expand variable references, and with `escapes` decode `\n`, `\r`,
/// `\"` and `\\`.
fn expand(text: &str, escapes: bool, lookup: &dyn Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];
        match ch {
            '\\' => match rest.chars().next() {
                Some('$') => {
                    out.push('$');
                    rest = &rest[1..];
                }
                Some(next) if escapes => {
                    rest = &rest[next.len_utf8()..];
                    match next {
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        '"' | '\\' => out.push(next),
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                _ => out.push('\\'),
            },
            '$' => match variable(rest) {
                Some((name, tail)) => {
                    out.push_str(&lookup(name));
                    rest = tail;
                }
                None => out.push('$'),
            },
            _ => out.push(ch),
        }
    }

    out
}

/// Split `NAME...` or `{NAME}...` into the name and what follows it.
fn variable(text: &str) -> Option<(&str, &str)> {
    if let Some(inner) = text.strip_prefix('{') {
        let end = inner.find('}')?;
        let name = &inner[..end];
        return is_name(name).then(|| (name, &inner[end + 1..]));
    }

    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    let name = &text[..end];
    is_name(name).then(|| (name, &text[end..]))
}

fn is_name(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains(['#', '=', '"', '\'', '\\', '$'])
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
