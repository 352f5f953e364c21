//! Core library components.
//!
//! This module contains the item model, the pure field transforms, the item
//! store seam and the session that ties them together.

pub mod coerce;
pub mod config;
pub mod constants;
pub mod domain;
pub mod fields;
pub mod format;
pub mod session;
pub mod store;
pub mod types;
