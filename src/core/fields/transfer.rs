//! Copy and remove whole sections.
//!
//! Move is not a pure transform: it needs a fresh read of the source between
//! the two halves, so it lives on the session.

use tracing::debug;

use super::find_or_create_section;
use crate::core::constants;
use crate::core::domain::{Field, Item, SectionRef};
use crate::error::{Result, ValidationError};

/// Copy the fields of `source`'s section `from` into `dest`'s section `to`.
///
/// The destination section is created if missing. Copied fields get fresh
/// ids and are appended, then the destination fields are sorted by title.
/// `source` is only read.
///
/// # Errors
///
/// Returns `NotFoundError::Section` if `from` does not exist in `source`,
/// or `ValidationError::SameSection` when copying a section onto itself.
pub fn copy_section(source: &Item, from: &str, mut dest: Item, to: &str) -> Result<Item> {
    let section = source.require_section(&SectionRef::title(from))?;
    debug!(item = %source.title, section = from, "source looked up");

    if source.id == dest.id && from == to {
        return Err(ValidationError::SameSection(from.to_string()).into());
    }

    let dest_section = find_or_create_section(&mut dest, to);
    debug!(item = %dest.title, section = to, "destination prepared");

    let copies: Vec<Field> = source
        .fields_in(&section.id)
        .map(|field| Field {
            id: constants::new_id(),
            section_id: Some(dest_section.clone()),
            ..field.clone()
        })
        .collect();

    debug!(copied = copies.len(), "copied section fields");
    dest.fields.extend(copies);
    dest.sort_fields();
    Ok(dest)
}

/// Drop every field of the section titled `name`, and the section itself.
///
/// # Errors
///
/// Returns `NotFoundError::Section` if `name` does not exist in `item`.
pub fn remove_section(mut item: Item, name: &str) -> Result<Item> {
    let section_id = item.require_section(&SectionRef::title(name))?.id.clone();

    let before = item.fields.len();
    item.fields.retain(|f| !f.is_in(&section_id));
    item.sections.retain(|s| s.id != section_id);

    debug!(
        item = %item.title,
        section = name,
        removed = before - item.fields.len(),
        "removed section"
    );
    Ok(item)
}
