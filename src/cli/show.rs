//! Show command - list an item's layout without revealing values.

use serde_json::json;

use crate::cli::output;
use crate::cli::{Context, ItemArgs};
use crate::core::domain::Item;
use crate::error::Result;

/// Print sections and field titles of an item.
pub fn execute(ctx: &Context, target: &ItemArgs, as_json: bool) -> Result<()> {
    let session = ctx.session()?;
    let (_, item) = ctx.resolve(&session, target.vault.as_deref(), &target.item)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&layout(&item))?);
        return Ok(());
    }

    output::header(&format!("{} (v{})", item.title, item.version));
    if item.fields.is_empty() {
        output::dimmed("no fields");
    }
    for section in &item.sections {
        println!();
        println!("{}", output::name(&section.title));
        for field in item.fields_in(&section.id) {
            output::list_item(&field.title);
        }
    }

    let loose: Vec<&str> = item
        .fields
        .iter()
        .filter(|f| f.section_id.is_none())
        .map(|f| f.title.as_str())
        .collect();
    if !loose.is_empty() {
        println!();
        output::dimmed("(no section)");
        for title in loose {
            output::list_item(title);
        }
    }
    Ok(())
}

fn layout(item: &Item) -> serde_json::Value {
    let sections: Vec<serde_json::Value> = item
        .sections
        .iter()
        .map(|s| {
            let fields: Vec<&str> = item.fields_in(&s.id).map(|f| f.title.as_str()).collect();
            json!({ "title": s.title, "fields": fields })
        })
        .collect();
    let loose: Vec<&str> = item
        .fields
        .iter()
        .filter(|f| f.section_id.is_none())
        .map(|f| f.title.as_str())
        .collect();

    json!({
        "id": item.id,
        "title": item.title,
        "version": item.version,
        "sections": sections,
        "unsectioned": loose,
    })
}
