//! Error types.
//!
//! A single top-level [`Error`] wraps the per-concern enums so callers can
//! match on the broad kind (not found, remote failure, bad config) and still
//! get a precise message.

use thiserror::Error;

/// Top-level error for every envop operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An import parsed zero environment variables.
    #[error("no environment variables found in {origin}")]
    EmptyInput { origin: String },

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A field points at a section id the item does not contain.
    #[error("field '{field}' references unknown section id '{section_id}'")]
    StructuralInconsistency { field: String, section_id: String },

    /// Move copied the section but could not remove it from the source.
    #[error("section '{section}' was copied to the destination but is still present in the source: {cause}")]
    PartialMove {
        section: String,
        #[source]
        cause: Box<Error>,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Whether this error means a vault, item or section is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Something looked up by title does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("vault not found: {0}")]
    Vault(String),

    #[error("item '{item}' not found in vault {vault}")]
    Item { item: String, vault: String },

    #[error("section '{section}' not found in item {item}")]
    Section { section: String, item: String },
}

/// Failures talking to the remote item store.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("store rejected read of {url} ({status}): {message}")]
    Read {
        url: String,
        status: u16,
        message: String,
    },

    /// The store refused a create, replace or delete.
    #[error("store rejected {operation} ({status}): {message}")]
    Write {
        operation: &'static str,
        status: u16,
        message: String,
    },

    #[error("unexpected response from store: {0}")]
    Decode(String),
}

/// Invalid arguments to an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cannot copy section '{0}' onto itself")]
    SameSection(String),

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Configuration loading and resolution errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no store host configured (use --host, OP_CONNECT_HOST or [connect] host)")]
    MissingHost,

    #[error("no store token configured (use --token, OP_CONNECT_TOKEN or [connect] token)")]
    MissingToken,

    #[error("no vault given (use --vault or [defaults] vault)")]
    MissingVault,

    #[error("home directory not found")]
    NoHome,
}

/// Environment file read/write errors.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("{path}: expected a top-level object")]
    NotAnObject { path: String },

    #[error("{path}: invalid json: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: invalid toml: {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot write toml: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("{path}: invalid hcl: {source}")]
    HclParse {
        path: String,
        #[source]
        source: hcl::Error,
    },

    #[error("cannot write hcl: {0}")]
    HclWrite(#[source] hcl::Error),

    #[error("{key}: null values cannot be written as {format}")]
    Unrepresentable { key: String, format: &'static str },
}

/// Result alias used throughout envop.
pub type Result<T> = std::result::Result<T, Error>;
