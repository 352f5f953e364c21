//! Environment file formats.
//!
//! `import` reads an [`Environment`] from one of these formats and `export`
//! writes one back. Only `.env` files are layered per environment; JSON,
//! TOML and HCL are read from the single path given.

mod dotenv;
mod hcl;
mod json;
mod toml;

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::core::types::Environment;
use crate::error::Result;

/// Supported environment file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// `KEY=value` lines
    #[default]
    Env,
    /// A flat JSON object
    Json,
    /// A flat TOML table
    Toml,
    /// HCL attributes
    Hcl,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Env => "env",
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Hcl => "hcl",
        };
        f.write_str(name)
    }
}

/// Read an environment from `path`.
///
/// `environment` selects the `.env` overlay files and is ignored by the
/// other formats. A missing JSON, TOML or HCL file is an error; missing `.env`
/// layers are skipped.
///
/// # Errors
///
/// Returns `Error::Io` or a `FormatError` describing the bad input.
pub fn read(format: Format, path: &Path, environment: &str) -> Result<Environment> {
    debug!(format = %format, path = %path.display(), environment, "reading environment");
    match format {
        Format::Env => dotenv::read_layered(path, environment),
        Format::Json => json::read(path),
        Format::Toml => toml::read(path),
        Format::Hcl => hcl::read(path),
    }
}

/// Render an environment as text in `format`.
///
/// # Errors
///
/// Returns `FormatError::Unrepresentable` for values the format cannot hold.
pub fn render(format: Format, env: &Environment) -> Result<String> {
    match format {
        Format::Env => Ok(dotenv::render(env)),
        Format::Json => json::render(env),
        Format::Toml => toml::render(env),
        Format::Hcl => hcl::render(env),
    }
}

/// Write an environment to `out`, or to stdout when `out` is `None`.
///
/// Files are created with mode 0600 on Unix.
pub fn write(format: Format, env: &Environment, out: Option<&Path>) -> Result<()> {
    let text = render(format, env)?;
    match out {
        Some(path) => write_private(path, &text),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

fn write_private(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    debug!(path = %path.display(), "environment written");
    Ok(())
}
