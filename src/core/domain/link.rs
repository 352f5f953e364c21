//! Serde helpers for `{"id": "..."}` back-references.
//!
//! The store nests references to other objects (an item's vault, a field's
//! section) as small objects; the domain types keep just the id.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
struct Link {
    id: String,
}

pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
    Link { id: id.to_string() }.serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Link::deserialize(deserializer).map(|link| link.id)
}

/// Same as the parent module for references that may be absent.
pub mod optional {
    use super::Link;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(id: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        id.as_ref()
            .map(|id| Link { id: id.clone() })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<Link>::deserialize(deserializer)?.map(|link| link.id))
    }
}
