//! Section commands: cp, mv, rm.

use crate::cli::output;
use crate::cli::{Context, ItemArgs, TransferArgs};
use crate::core::domain::{Item, SectionRef};
use crate::core::session::Session;
use crate::core::store::Connect;
use crate::error::Result;

/// Both ends of a transfer, resolved against the store.
struct Endpoints {
    source: Item,
    destination: Item,
    from: String,
    to: String,
}

fn resolve(ctx: &Context, session: &Session<Connect>, args: &TransferArgs) -> Result<Endpoints> {
    let source_vault = ctx.vault_title(args.source_vault.as_deref())?;
    let (_, source) = ctx.resolve(session, Some(&source_vault), &args.source_item)?;

    let dest_vault = args.destination_vault.as_deref().unwrap_or(&source_vault);
    let dest_item = args.destination_item.as_deref().unwrap_or(&args.source_item);
    let (_, destination) = ctx.resolve(session, Some(dest_vault), dest_item)?;

    Ok(Endpoints {
        source,
        destination,
        from: args.source_section.clone(),
        to: args
            .destination_section
            .clone()
            .unwrap_or_else(|| args.source_section.clone()),
    })
}

impl Endpoints {
    /// Warn when the copy lands in a section that already has fields.
    fn warn_if_appending(&self) {
        let onto_self = self.source.id == self.destination.id && self.from == self.to;
        if onto_self {
            return;
        }
        if let Some(section) = self.destination.section(&SectionRef::title(&self.to)) {
            if self.destination.fields_in(&section.id).next().is_some() {
                output::warn(&format!(
                    "{} already has section {}, copied fields are appended",
                    output::name(&self.destination.title),
                    output::name(&self.to)
                ));
            }
        }
    }
}

/// Copy a section.
pub fn copy(ctx: &Context, args: &TransferArgs) -> Result<()> {
    let session = ctx.session()?;
    let ends = resolve(ctx, &session, args)?;
    ends.warn_if_appending();

    let item = session.copy_section(&ends.source, &ends.from, ends.destination, &ends.to)?;

    output::success(&format!(
        "copied {} to {}/{}",
        output::name(&ends.from),
        output::name(&item.title),
        output::name(&ends.to)
    ));
    Ok(())
}

/// Move a section.
pub fn mv(ctx: &Context, args: &TransferArgs) -> Result<()> {
    let session = ctx.session()?;
    let ends = resolve(ctx, &session, args)?;
    ends.warn_if_appending();

    let moved = session.move_section(&ends.source, &ends.from, ends.destination, &ends.to)?;

    output::success(&format!(
        "moved {} from {} to {}/{}",
        output::name(&ends.from),
        output::name(&moved.source.title),
        output::name(&moved.destination.title),
        output::name(&ends.to)
    ));
    Ok(())
}

/// Remove a section.
pub fn rm(ctx: &Context, target: &ItemArgs, section: &str) -> Result<()> {
    let session = ctx.session()?;
    let (_, item) = ctx.resolve(&session, target.vault.as_deref(), &target.item)?;

    let item = session.remove_section(item, section)?;

    output::success(&format!(
        "removed {} from {}",
        output::name(section),
        output::name(&item.title)
    ));
    Ok(())
}
