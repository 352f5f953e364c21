//! Export command - write an item section out as an environment file.

use std::path::Path;

use crate::cli::output;
use crate::cli::{Context, ItemArgs};
use crate::core::format::{self, Format};
use crate::error::Result;

/// Export `section` of `target` (or every field) in `format`.
///
/// With no `out` file the environment goes to stdout and nothing else is
/// printed there.
pub fn execute(
    ctx: &Context,
    target: &ItemArgs,
    section: Option<&str>,
    format: Format,
    out: Option<&Path>,
) -> Result<()> {
    let session = ctx.session()?;
    let (_, item) = ctx.resolve(&session, target.vault.as_deref(), &target.item)?;
    let env = session.export(&item, section)?;

    format::write(format, &env, out)?;

    if let Some(path) = out {
        output::success(&format!(
            "exported {} variables to {}",
            env.len(),
            output::name(&path.display().to_string())
        ));
    }
    Ok(())
}
