//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// Opaque identifier of a vault.
pub type VaultId = String;

/// Opaque identifier of an item within a vault.
pub type ItemId = String;

/// Opaque identifier of a section within an item.
///
/// Regenerated freely; never used as a lookup key by callers.
pub type SectionId = String;

/// Opaque identifier of a field within an item.
pub type FieldId = String;

/// A flat environment: variable name to scalar or structured value.
///
/// Kept ordered so iteration, and therefore output, is deterministic.
pub type Environment = BTreeMap<String, serde_json::Value>;
