//! Pure transforms over an item's sections and fields.
//!
//! Nothing in here talks to the store. Each function takes an item, returns
//! the item to write back, and leaves persisting it to the session.

mod reconcile;
mod reindex;
mod transfer;

pub use reconcile::{find_or_create_section, reconcile};
pub use reindex::reindex;
pub use transfer::{copy_section, remove_section};

use crate::core::coerce;
use crate::core::domain::{Item, SectionRef};
use crate::core::types::Environment;
use crate::error::Result;

/// Read fields back out as an environment.
///
/// With a section, only that section's fields are read; otherwise every
/// field of the item. Values go through [`coerce::destringify`]. When a
/// title appears twice the later field wins.
///
/// # Errors
///
/// Returns `NotFoundError::Section` if the named section does not exist.
pub fn environment_of(item: &Item, section: Option<&str>) -> Result<Environment> {
    let section_id = match section {
        Some(title) => Some(item.require_section(&SectionRef::title(title))?.id.as_str()),
        None => None,
    };

    Ok(item
        .fields
        .iter()
        .filter(|f| section_id.map_or(true, |id| f.is_in(id)))
        .map(|f| (f.title.clone(), coerce::destringify(&f.value)))
        .collect())
}
