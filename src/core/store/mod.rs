//! Remote item store.
//!
//! The store only offers whole-item operations: read an item, replace it,
//! create it, delete it. Everything envop does is built on that.
//!
//! ## Adding a New Store Backend
//!
//! 1. Implement the `ItemStore` trait
//! 2. Add the implementation in a new file (e.g., `cli.rs`, `sdk.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Cached { /* ... */ }
//!
//! impl ItemStore for Cached {
//!     fn find_vault_by_title(&self, title: &str) -> Result<Vault> {
//!         // Serve from cache, fall back to the server
//!     }
//!     // ...
//! }
//! ```

use tracing::debug;

use crate::core::domain::{Item, ItemCreateParams, ItemSummary, Vault};
use crate::error::{NotFoundError, Result};

mod connect;
mod memory;

pub use connect::Connect;
pub use memory::Memory;

/// Whole-item access to a remote vault.
///
/// Every call is a blocking round trip. Implementations never retry.
pub trait ItemStore {
    /// Find a vault by exact title.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Vault` if no vault has this title.
    fn find_vault_by_title(&self, title: &str) -> Result<Vault>;

    /// List the items of a vault.
    fn list_items(&self, vault_id: &str) -> Result<Vec<ItemSummary>>;

    /// Fetch a full item.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Item` if the item does not exist.
    fn get_item(&self, vault_id: &str, item_id: &str) -> Result<Item>;

    /// Create an item and return the stored copy.
    fn create_item(&self, params: &ItemCreateParams) -> Result<Item>;

    /// Overwrite an item. The returned copy is authoritative.
    fn replace_item(&self, item: &Item) -> Result<Item>;

    /// Delete an item.
    fn delete_item(&self, vault_id: &str, item_id: &str) -> Result<()>;

    /// Resolve an item by exact, case-sensitive title.
    ///
    /// Scans the vault listing and fetches the first match.
    fn lookup_item(&self, vault_id: &str, title: &str) -> Result<Option<Item>> {
        let summary = self
            .list_items(vault_id)?
            .into_iter()
            .find(|summary| summary.title == title);

        match summary {
            Some(summary) => {
                debug!(item = title, id = %summary.id, "item resolved");
                self.get_item(vault_id, &summary.id).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Resolve an item by title, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Item` if no item has this title.
    fn find_item_by_title(&self, vault: &Vault, title: &str) -> Result<Item> {
        self.lookup_item(&vault.id, title)?.ok_or_else(|| {
            NotFoundError::Item {
                item: title.to_string(),
                vault: vault.title.clone(),
            }
            .into()
        })
    }
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn find_vault_by_title(&self, title: &str) -> Result<Vault> {
        (**self).find_vault_by_title(title)
    }

    fn list_items(&self, vault_id: &str) -> Result<Vec<ItemSummary>> {
        (**self).list_items(vault_id)
    }

    fn get_item(&self, vault_id: &str, item_id: &str) -> Result<Item> {
        (**self).get_item(vault_id, item_id)
    }

    fn create_item(&self, params: &ItemCreateParams) -> Result<Item> {
        (**self).create_item(params)
    }

    fn replace_item(&self, item: &Item) -> Result<Item> {
        (**self).replace_item(item)
    }

    fn delete_item(&self, vault_id: &str, item_id: &str) -> Result<()> {
        (**self).delete_item(vault_id, item_id)
    }
}
