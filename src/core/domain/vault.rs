//! Vault and item listing types.

use serde::{Deserialize, Serialize};

use super::link;
use crate::core::types::{ItemId, VaultId};

/// A vault in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: VaultId,
    /// Vault display name
    #[serde(rename = "name", default)]
    pub title: String,
}

/// An entry of an item listing; enough to resolve an item by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "vault", with = "link")]
    pub vault_id: VaultId,
}
