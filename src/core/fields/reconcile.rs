//! Merge an environment into one section of an item.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::core::coerce;
use crate::core::domain::{Field, Item, Section, SectionRef};
use crate::core::types::{Environment, SectionId};

/// Find the section titled `title`, appending a new one if there is none.
///
/// Returns the id of the section to write into.
pub fn find_or_create_section(item: &mut Item, title: &str) -> SectionId {
    if let Some(section) = item.section(&SectionRef::title(title)) {
        return section.id.clone();
    }

    let section = Section::new(title);
    let id = section.id.clone();
    debug!(section = title, id = %id, "creating section");
    item.sections.push(section);
    id
}

/// Merge `env` into the section titled `section`.
///
/// Fields of every other section are carried over untouched. Inside the
/// target section each incoming key replaces any field with the same trimmed
/// title, value and id alike; keys not in `env` keep their existing field,
/// with its title trimmed.
/// The resulting field list is sorted by title.
///
/// An empty `env` is a valid no-op merge (apart from creating the section
/// and sorting).
pub fn reconcile(mut item: Item, section: &str, env: &Environment) -> Item {
    let section_id = find_or_create_section(&mut item, section);

    let (in_section, mut fields): (Vec<Field>, Vec<Field>) = std::mem::take(&mut item.fields)
        .into_iter()
        .partition(|f| f.is_in(&section_id));

    let mut working: BTreeMap<String, Field> = in_section
        .into_iter()
        .map(|mut f| {
            let title = f.title.trim().to_string();
            f.title = title.clone();
            (title, f)
        })
        .collect();

    for (key, value) in env {
        let key = key.trim();
        if key.is_empty() {
            warn!(section, "skipping environment entry with an empty name");
            continue;
        }
        let value = coerce::stringify(value);
        working.insert(
            key.to_string(),
            Field::concealed(key, &value, Some(section_id.clone())),
        );
    }

    debug!(
        section,
        merged = working.len(),
        untouched = fields.len(),
        "reconciled section"
    );

    fields.extend(working.into_values());
    item.fields = fields;
    item.sort_fields();
    item
}
