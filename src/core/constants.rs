//! Constants used throughout envop.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name, looked up in the home directory.
pub const CONFIG_FILE: &str = ".envop.toml";

/// Base name of environment files (.env).
pub const ENV_FILE: &str = ".env";

/// Environment name used when `--env` is not given.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Field type tag for every field envop writes.
pub const CONCEALED: &str = "CONCEALED";

/// Category given to items created by `import`.
pub const DEFAULT_CATEGORY: &str = "SERVER";

/// Environment variable holding the store host.
pub const HOST_ENV: &str = "OP_CONNECT_HOST";

/// Environment variable holding the store token.
pub const TOKEN_ENV: &str = "OP_CONNECT_TOKEN";

/// Environment variable read for the tracing filter.
pub const LOG_ENV: &str = "ENVOP_LOG";

/// Environment variable selecting the log line format (`json` or text).
pub const LOG_FORMAT_ENV: &str = "ENVOP_LOG_FORMAT";

/// Generate a fresh opaque identifier for a section or field.
///
/// Identifiers are never reused: every copy, upsert and reindex mints new ones.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
