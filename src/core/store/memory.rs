//! In-memory item store.
//!
//! Behaves like the remote store where it matters for envop: whole-item
//! replace, a version bump on every write, ids assigned on create. Also
//! counts writes and can refuse writes to chosen items, which is how tests
//! exercise failure paths.

use std::cell::RefCell;
use std::collections::HashSet;

use super::ItemStore;
use crate::core::constants;
use crate::core::domain::{Item, ItemCreateParams, ItemSummary, Vault};
use crate::core::types::ItemId;
use crate::error::{NotFoundError, RemoteError, Result};

#[derive(Debug, Default)]
struct State {
    vaults: Vec<Vault>,
    items: Vec<Item>,
    writes: usize,
    rejected: HashSet<ItemId>,
}

/// Item store kept in process memory.
#[derive(Debug, Default)]
pub struct Memory {
    state: RefCell<State>,
}

impl Memory {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vault and return it.
    pub fn add_vault(&self, title: &str) -> Vault {
        let vault = Vault {
            id: constants::new_id(),
            title: title.to_string(),
        };
        self.state.borrow_mut().vaults.push(vault.clone());
        vault
    }

    /// Seed an item without counting it as a write.
    ///
    /// Assigns an id if the item has none.
    pub fn insert(&self, mut item: Item) -> Item {
        if item.id.is_empty() {
            item.id = constants::new_id();
        }
        let mut state = self.state.borrow_mut();
        state.items.retain(|i| i.id != item.id);
        state.items.push(item.clone());
        item
    }

    /// Current stored copy of an item.
    pub fn item(&self, item_id: &str) -> Option<Item> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
    }

    /// Number of successful create, replace and delete calls.
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    /// Make every following write to `item_id` fail.
    pub fn reject_writes_to(&self, item_id: &str) {
        self.state
            .borrow_mut()
            .rejected
            .insert(item_id.to_string());
    }

    fn check_writable(&self, item_id: &str, operation: &'static str) -> Result<()> {
        if self.state.borrow().rejected.contains(item_id) {
            return Err(RemoteError::Write {
                operation,
                status: 403,
                message: format!("writes to {} are rejected", item_id),
            }
            .into());
        }
        Ok(())
    }

    fn require_vault(&self, vault_id: &str) -> Result<()> {
        if self.state.borrow().vaults.iter().any(|v| v.id == vault_id) {
            Ok(())
        } else {
            Err(NotFoundError::Vault(vault_id.to_string()).into())
        }
    }
}

impl ItemStore for Memory {
    fn find_vault_by_title(&self, title: &str) -> Result<Vault> {
        self.state
            .borrow()
            .vaults
            .iter()
            .find(|v| v.title == title)
            .cloned()
            .ok_or_else(|| NotFoundError::Vault(title.to_string()).into())
    }

    fn list_items(&self, vault_id: &str) -> Result<Vec<ItemSummary>> {
        self.require_vault(vault_id)?;
        Ok(self
            .state
            .borrow()
            .items
            .iter()
            .filter(|i| i.vault_id == vault_id)
            .map(|i| ItemSummary {
                id: i.id.clone(),
                title: i.title.clone(),
                vault_id: i.vault_id.clone(),
            })
            .collect())
    }

    fn get_item(&self, vault_id: &str, item_id: &str) -> Result<Item> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|i| i.vault_id == vault_id && i.id == item_id)
            .cloned()
            .ok_or_else(|| {
                NotFoundError::Item {
                    item: item_id.to_string(),
                    vault: vault_id.to_string(),
                }
                .into()
            })
    }

    fn create_item(&self, params: &ItemCreateParams) -> Result<Item> {
        self.require_vault(&params.vault_id)?;

        let mut item = Item::draft(params.vault_id.clone(), params.title.clone());
        item.id = constants::new_id();
        item.category = params.category.clone();
        item.version = 1;
        item.sections = params.sections.clone();
        item.fields = params.fields.clone();

        let mut state = self.state.borrow_mut();
        state.items.push(item.clone());
        state.writes += 1;
        Ok(item)
    }

    fn replace_item(&self, item: &Item) -> Result<Item> {
        self.check_writable(&item.id, "replace")?;

        let mut state = self.state.borrow_mut();
        let stored = state
            .items
            .iter_mut()
            .find(|i| i.vault_id == item.vault_id && i.id == item.id)
            .ok_or_else(|| NotFoundError::Item {
                item: item.title.clone(),
                vault: item.vault_id.clone(),
            })?;

        let version = stored.version + 1;
        *stored = Item {
            version,
            ..item.clone()
        };
        let saved = stored.clone();
        state.writes += 1;
        Ok(saved)
    }

    fn delete_item(&self, vault_id: &str, item_id: &str) -> Result<()> {
        self.check_writable(item_id, "delete")?;

        let mut state = self.state.borrow_mut();
        let before = state.items.len();
        state
            .items
            .retain(|i| !(i.vault_id == vault_id && i.id == item_id));
        if state.items.len() == before {
            return Err(NotFoundError::Item {
                item: item_id.to_string(),
                vault: vault_id.to_string(),
            }
            .into());
        }
        state.writes += 1;
        Ok(())
    }
}
