//! Regenerate every section and field identifier of an item.

use std::collections::HashMap;

use tracing::debug;

use crate::core::constants;
use crate::core::domain::{Item, Section};
use crate::core::types::SectionId;
use crate::error::{Error, Result};

/// Give every section and field of `item` a fresh id.
///
/// Section membership is preserved: each field follows its old section to
/// that section's new id. Unsectioned fields stay unsectioned. Fields are
/// sorted by title afterwards.
///
/// # Errors
///
/// Returns `Error::StructuralInconsistency` if a field references a section
/// id that is not part of the item. The item is left as it was.
pub fn reindex(mut item: Item) -> Result<Item> {
    let mut renamed: HashMap<SectionId, SectionId> = HashMap::new();
    let mut sections = Vec::with_capacity(item.sections.len());

    for section in &item.sections {
        // Duplicate ids collapse onto the first section carrying them.
        if renamed.contains_key(&section.id) {
            continue;
        }
        let fresh = Section {
            id: constants::new_id(),
            ..section.clone()
        };
        renamed.insert(section.id.clone(), fresh.id.clone());
        sections.push(fresh);
    }

    let mut fields = Vec::with_capacity(item.fields.len());
    for field in &item.fields {
        let section_id = match &field.section_id {
            None => None,
            Some(old) => match renamed.get(old) {
                Some(new) => Some(new.clone()),
                None => {
                    return Err(Error::StructuralInconsistency {
                        field: field.title.clone(),
                        section_id: old.clone(),
                    })
                }
            },
        };
        let mut fresh = field.clone();
        fresh.id = constants::new_id();
        fresh.section_id = section_id;
        fields.push(fresh);
    }

    debug!(
        item = %item.title,
        sections = sections.len(),
        fields = fields.len(),
        "reindexed item"
    );

    item.sections = sections;
    item.fields = fields;
    item.sort_fields();
    Ok(item)
}
