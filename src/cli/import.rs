//! Import command - merge an environment file into an item section.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::cli::{Context, ItemArgs};
use crate::core::format::{self, Format};
use crate::error::{Error, Result};

/// Import an environment into `target`, creating the item if it is absent.
///
/// The file is read before anything touches the store, so an empty input
/// never opens a connection.
pub fn execute(
    ctx: &Context,
    target: &ItemArgs,
    section: Option<&str>,
    path: &Path,
    environment: &str,
    format: Format,
) -> Result<()> {
    let env = format::read(format, path, environment)?;
    if env.is_empty() {
        return Err(Error::EmptyInput {
            origin: path.display().to_string(),
        });
    }
    let section = section.unwrap_or(environment);
    info!(variables = env.len(), section, "environment loaded");

    let session = ctx.session()?;
    let vault = session.resolve_vault(&ctx.vault_title(target.vault.as_deref())?)?;
    let item = session.upsert(&vault, &target.item, section, &env)?;

    output::success(&format!(
        "imported {} variables into {}/{}",
        env.len(),
        output::name(&item.title),
        output::name(section)
    ));
    Ok(())
}
