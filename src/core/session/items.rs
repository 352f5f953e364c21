//! Whole-item operations: create, reconcile, reindex, delete.

use tracing::{debug, info};

use super::{require, Session};
use crate::core::domain::{Item, ItemCreateParams, Vault};
use crate::core::fields;
use crate::core::store::ItemStore;
use crate::core::types::Environment;
use crate::error::Result;

impl<S: ItemStore> Session<S> {
    /// Create a new item holding `env` in section `section`.
    ///
    /// # Returns
    ///
    /// The item as stored.
    pub fn create(&self, vault: &Vault, title: &str, section: &str, env: &Environment) -> Result<Item> {
        require(title, "item title")?;
        require(section, "section")?;
        let draft = fields::reconcile(Item::draft(vault.id.clone(), title), section, env);
        draft.check_integrity()?;
        debug!(item = title, fields = draft.fields.len(), "creating item");

        let created = self.store.create_item(&ItemCreateParams::from(draft))?;
        info!(item = %created.title, id = %created.id, "item created");
        Ok(created)
    }

    /// Merge `env` into section `section` of `item` and persist it.
    ///
    /// Other sections are left as they are. An empty `env` still writes the
    /// item back; deciding that empty input is an error is up to the caller.
    ///
    /// # Returns
    ///
    /// The item as stored, which may carry server-side changes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Empty` for a blank section name,
    /// `Error::StructuralInconsistency` if the merged item has a field whose
    /// section is missing, or the store's error if the replace fails.
    pub fn reconcile(&self, item: Item, section: &str, env: &Environment) -> Result<Item> {
        require(section, "section")?;
        let merged = fields::reconcile(item, section, env);
        self.write(&merged)
    }

    /// Reconcile into the item titled `title`, creating it if needed.
    pub fn upsert(&self, vault: &Vault, title: &str, section: &str, env: &Environment) -> Result<Item> {
        match self.lookup_item(vault, title)? {
            Some(item) => {
                info!(item = title, section, "updating existing item");
                self.reconcile(item, section, env)
            }
            None => self.create(vault, title, section, env),
        }
    }

    /// Regenerate every section and field id of `item` and persist it.
    ///
    /// # Errors
    ///
    /// Returns `Error::StructuralInconsistency` without writing if a field
    /// references a section the item does not have.
    pub fn reindex(&self, item: Item) -> Result<Item> {
        let reindexed = fields::reindex(item)?;
        self.write(&reindexed)
    }

    /// Read a section (or the whole item) back as an environment.
    pub fn export(&self, item: &Item, section: Option<&str>) -> Result<Environment> {
        fields::environment_of(item, section)
    }

    /// Delete an item.
    pub fn delete(&self, item: &Item) -> Result<()> {
        self.store.delete_item(&item.vault_id, &item.id)?;
        info!(item = %item.title, "item deleted");
        Ok(())
    }
}
