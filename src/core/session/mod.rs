//! The primary interface for envop operations.
//!
//! A session owns an item store and runs every operation as
//! read, pure transform from [`crate::core::fields`], then full-item write.

mod items;
mod sections;

pub use sections::Moved;

use tracing::debug;

use crate::core::domain::{Item, Vault};
use crate::core::store::ItemStore;
use crate::error::{Result, ValidationError};

/// Runs envop operations against an item store.
///
/// Holds no state besides the store; every call reads what it needs.
#[derive(Debug)]
pub struct Session<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> Session<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a vault by title.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Vault` if no vault has this title.
    pub fn resolve_vault(&self, title: &str) -> Result<Vault> {
        let vault = self.store.find_vault_by_title(title)?;
        debug!(vault = title, id = %vault.id, "vault resolved");
        Ok(vault)
    }

    /// Resolve an item by title.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Item` if no item has this title.
    pub fn resolve_item(&self, vault: &Vault, title: &str) -> Result<Item> {
        self.store.find_item_by_title(vault, title)
    }

    /// Resolve an item by title, `None` if it does not exist.
    pub fn lookup_item(&self, vault: &Vault, title: &str) -> Result<Option<Item>> {
        self.store.lookup_item(&vault.id, title)
    }

    /// Persist an item with a full replace.
    ///
    /// Refuses items whose fields point at sections they do not have.
    fn write(&self, item: &Item) -> Result<Item> {
        item.check_integrity()?;
        debug!(item = %item.title, fields = item.fields.len(), "replacing item");
        self.store.replace_item(item)
    }
}

/// Reject a title that is empty after trimming.
fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field }.into());
    }
    Ok(())
}
