//! envop - Sync .env configuration with vault items.
//!
//! Environment variables live as concealed fields inside named sections of a
//! vault item. envop merges environment files into those sections, reads
//! them back out, and copies or moves whole sections between items.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── import        # Environment file -> item section
//! │   ├── export        # Item section -> environment file
//! │   ├── section       # cp / mv / rm
//! │   ├── reindex       # Regenerate ids
//! │   ├── show          # Item layout
//! │   ├── delete        # Delete an item
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # ~/.envop.toml
//!     ├── coerce        # Value <-> field text
//!     ├── domain/       # Item, Section, Field, Vault
//!     ├── fields/       # Pure transforms: reconcile, reindex, transfer
//!     ├── format/       # .env, json, toml, hcl
//!     ├── session/      # Operations: read, transform, write back
//!     └── store/        # Item store trait
//!         ├── connect   # HTTP backend
//!         └── memory    # In-process backend
//! ```
//!
//! # Example
//!
//! ```
//! use envop::{Environment, Memory, Session};
//! use serde_json::json;
//!
//! let store = Memory::new();
//! let vault = store.add_vault("Engineering");
//! let session = Session::new(&store);
//!
//! let mut env = Environment::new();
//! env.insert("PORT".to_string(), json!(5432));
//! let item = session.upsert(&vault, "api", "prod", &env).unwrap();
//!
//! assert_eq!(session.export(&item, Some("prod")).unwrap(), env);
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::coerce::{destringify, stringify};
pub use crate::core::domain::{Field, Item, Section, SectionRef, Vault};
pub use crate::core::session::{Moved, Session};
pub use crate::core::store::{Connect, ItemStore, Memory};
pub use crate::core::types::Environment;
pub use crate::error::{Error, Result};
