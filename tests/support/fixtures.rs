//! Seed data for tests.

use envop::core::store::Memory;
use envop::{Field, Item, Section, Vault};

/// Build an item from `(section, key, value)` triples.
///
/// Sections are created in order of first appearance.
pub fn item_with(vault: &Vault, title: &str, entries: &[(&str, &str, &str)]) -> Item {
    let mut item = Item::draft(vault.id.clone(), title);
    for (section, key, value) in entries {
        let id = match item.sections.iter().find(|s| s.title == *section) {
            Some(s) => s.id.clone(),
            None => {
                let s = Section::new(*section);
                let id = s.id.clone();
                item.sections.push(s);
                id
            }
        };
        item.fields.push(Field::concealed(key, value, Some(id)));
    }
    item.sort_fields();
    item
}

/// Seed an item into `store` and return the stored copy.
pub fn seed(store: &Memory, vault: &Vault, title: &str, entries: &[(&str, &str, &str)]) -> Item {
    store.insert(item_with(vault, title, entries))
}

/// Titles and values of an item section, in field order.
pub fn section_pairs(item: &Item, section: &str) -> Vec<(String, String)> {
    let Some(s) = item.sections.iter().find(|s| s.title == section) else {
        return Vec::new();
    };
    item.fields_in(&s.id)
        .map(|f| (f.title.clone(), f.value.clone()))
        .collect()
}

/// Owned pairs from string slices.
pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
