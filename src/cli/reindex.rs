//! Reindex command.

use crate::cli::output;
use crate::cli::{Context, ItemArgs};
use crate::error::Result;

/// Regenerate every section and field id of an item.
pub fn execute(ctx: &Context, target: &ItemArgs) -> Result<()> {
    let session = ctx.session()?;
    let (_, item) = ctx.resolve(&session, target.vault.as_deref(), &target.item)?;

    let item = session.reindex(item)?;

    output::success(&format!(
        "reindexed {} ({} sections, {} fields)",
        output::name(&item.title),
        item.sections.len(),
        item.fields.len()
    ));
    Ok(())
}
