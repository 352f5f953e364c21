//! Delete command.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Context, ItemArgs};
use crate::error::Result;

/// Delete an item, asking first unless `yes` is set.
pub fn execute(ctx: &Context, target: &ItemArgs, yes: bool) -> Result<()> {
    let session = ctx.session()?;
    let (vault, item) = ctx.resolve(&session, target.vault.as_deref(), &target.item)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} from {}?", item.title, vault.title))
            .default(false)
            .interact()?;
        if !confirmed {
            output::dimmed("aborted");
            return Ok(());
        }
    }

    session.delete(&item)?;
    output::success(&format!("deleted {}", output::name(&item.title)));
    Ok(())
}
