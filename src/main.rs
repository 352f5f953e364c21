//! envop - Sync .env configuration with vault items.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envop::cli::output;
use envop::cli::{execute, Cli};
use envop::core::constants;
use envop::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.global.verbose {
            EnvFilter::new("envop=debug")
        } else {
            EnvFilter::new("envop=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs() {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
            .init();
    }

    if let Err(e) = execute(cli.command, cli.global) {
        output::error(&e.to_string());
        if let Some(hint) = hint(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

/// `ENVOP_LOG_FORMAT=json` switches log lines to one JSON object each.
fn json_logs() -> bool {
    std::env::var(constants::LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Suggest a next step for errors the user can fix.
fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::MissingHost | ConfigError::MissingToken) => {
            Some("set OP_CONNECT_HOST and OP_CONNECT_TOKEN, or add [connect] to ~/.envop.toml")
        }
        Error::Config(ConfigError::MissingVault) => Some("pass --vault or set [defaults] vault"),
        Error::EmptyInput { .. } => Some("check --path, --env and --format"),
        Error::PartialMove { .. } => Some("re-run the move, or rm the section from the source"),
        Error::StructuralInconsistency { .. } => Some("fix or remove that field in the vault, then retry"),
        Error::NotFound(_) => Some("titles are matched exactly, including case"),
        _ => None,
    }
}
