//! Domain types.

mod item;
mod link;
mod section_ref;
mod vault;

pub use item::{Field, Item, ItemCreateParams, Section};
pub use section_ref::SectionRef;
pub use vault::{ItemSummary, Vault};
