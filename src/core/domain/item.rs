//! Item, Section and Field.
//!
//! These mirror the store's JSON representation closely enough to be sent
//! back verbatim on a full replace. Anything envop does not model is kept in
//! the flattened `extra` maps.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::link;
use super::SectionRef;
use crate::core::constants::{self, CONCEALED, DEFAULT_CATEGORY};
use crate::core::types::{FieldId, ItemId, SectionId, VaultId};
use crate::error::{Error, NotFoundError, Result};

/// A named group of fields inside an item.
///
/// The title is the externally meaningful key; the id is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: SectionId,
    #[serde(rename = "label", default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Section {
    /// A new section with a freshly generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: constants::new_id(),
            title: title.into(),
            extra: Map::new(),
        }
    }
}

/// A single key/value entry of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub id: FieldId,
    #[serde(rename = "label", default)]
    pub title: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default = "concealed")]
    pub kind: String,
    #[serde(
        rename = "section",
        default,
        with = "link::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_id: Option<SectionId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn concealed() -> String {
    CONCEALED.to_string()
}

impl Field {
    /// A concealed field with a fresh id; title and value are trimmed.
    pub fn concealed(title: &str, value: &str, section_id: Option<SectionId>) -> Self {
        Self {
            id: constants::new_id(),
            title: title.trim().to_string(),
            value: value.trim().to_string(),
            kind: concealed(),
            section_id,
            extra: Map::new(),
        }
    }

    /// Whether this field belongs to the section with the given id.
    pub fn is_in(&self, section_id: &str) -> bool {
        self.section_id.as_deref() == Some(section_id)
    }
}

/// A vault item: the unit of every read and write against the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "vault", with = "link")]
    pub vault_id: VaultId,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sections: Vec<Section>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// An empty, not yet persisted item.
    ///
    /// Used as the starting point for the create path; the store assigns the id.
    pub fn draft(vault_id: impl Into<VaultId>, title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            vault_id: vault_id.into(),
            category: default_category(),
            version: 0,
            sections: Vec::new(),
            fields: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Look up a section. Title lookups return the first match.
    pub fn section(&self, section: &SectionRef) -> Option<&Section> {
        self.sections.iter().find(|s| section.matches(s))
    }

    /// Look up a section that must exist.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Section` if no section matches.
    pub fn require_section(&self, section: &SectionRef) -> Result<&Section> {
        self.section(section).ok_or_else(|| {
            NotFoundError::Section {
                section: section.to_string(),
                item: self.title.clone(),
            }
            .into()
        })
    }

    /// Fields belonging to the section with the given id.
    pub fn fields_in<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.is_in(section_id))
    }

    /// Verify every field's section reference resolves within this item.
    ///
    /// # Errors
    ///
    /// Returns `Error::StructuralInconsistency` for the first dangling reference.
    pub fn check_integrity(&self) -> Result<()> {
        for field in &self.fields {
            if let Some(section_id) = &field.section_id {
                if self.section(&SectionRef::Id(section_id.clone())).is_none() {
                    return Err(Error::StructuralInconsistency {
                        field: field.title.clone(),
                        section_id: section_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Sort fields by title, byte-wise ascending. Stable for equal titles.
    pub fn sort_fields(&mut self) {
        self.fields.sort_by(|a, b| a.title.cmp(&b.title));
    }
}

/// Body of a create request: an item without server-assigned properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCreateParams {
    pub title: String,
    #[serde(rename = "vault", serialize_with = "link::serialize")]
    pub vault_id: VaultId,
    pub category: String,
    pub sections: Vec<Section>,
    pub fields: Vec<Field>,
}

impl From<Item> for ItemCreateParams {
    fn from(item: Item) -> Self {
        Self {
            title: item.title,
            vault_id: item.vault_id,
            category: item.category,
            sections: item.sections,
            fields: item.fields,
        }
    }
}
