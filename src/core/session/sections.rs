//! Section transfer: copy, move and remove a named section.
//!
//! Transfer runs through these stages, each logged at debug level:
//!
//! ```text
//! START -> SOURCE_LOOKED_UP -> DEST_PREPARED -> DEST_WRITTEN
//!       -> (move only: SOURCE_REREAD -> SOURCE_WRITTEN) -> DONE
//! ```
//!
//! A lookup failure stops before any write. A move that fails after
//! `DEST_WRITTEN` leaves the copy in place; nothing is rolled back.

use std::fmt;

use tracing::{debug, info};

use super::{require, Session};
use crate::core::domain::{Item, SectionRef};
use crate::core::fields;
use crate::core::store::ItemStore;
use crate::error::{Error, Result};

/// Progress of a section transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    SourceLookedUp,
    DestPrepared,
    DestWritten,
    SourceReread,
    SourceWritten,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "START",
            Stage::SourceLookedUp => "SOURCE_LOOKED_UP",
            Stage::DestPrepared => "DEST_PREPARED",
            Stage::DestWritten => "DEST_WRITTEN",
            Stage::SourceReread => "SOURCE_REREAD",
            Stage::SourceWritten => "SOURCE_WRITTEN",
            Stage::Done => "DONE",
            Stage::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

fn log_stage(stage: Stage, section: &str) {
    debug!(stage = %stage, section, "transfer");
}

/// Both sides of a completed move.
#[derive(Debug, Clone, PartialEq)]
pub struct Moved {
    /// Destination item as stored, now holding the section.
    pub destination: Item,
    /// Source item as stored, with the section removed.
    pub source: Item,
}

impl<S: ItemStore> Session<S> {
    /// Copy section `from` of `source` into section `to` of `dest`.
    ///
    /// Only `dest` is written. Copied fields get fresh ids.
    ///
    /// # Returns
    ///
    /// The destination item as stored.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Section` if `from` is missing, or
    /// `ValidationError::SameSection` for a copy onto itself. Nothing is
    /// written in either case.
    pub fn copy_section(&self, source: &Item, from: &str, dest: Item, to: &str) -> Result<Item> {
        log_stage(Stage::Start, from);
        let result = self.copy_inner(source, from, dest, to);
        match &result {
            Ok(item) => {
                log_stage(Stage::Done, from);
                info!(section = from, into = %item.title, "section copied");
            }
            Err(_) => log_stage(Stage::Failed, from),
        }
        result
    }

    fn copy_inner(&self, source: &Item, from: &str, dest: Item, to: &str) -> Result<Item> {
        require(from, "section")?;
        require(to, "destination section")?;
        source.require_section(&SectionRef::title(from))?;
        log_stage(Stage::SourceLookedUp, from);

        let copied = fields::copy_section(source, from, dest, to)?;
        log_stage(Stage::DestPrepared, to);

        let written = self.write(&copied)?;
        log_stage(Stage::DestWritten, to);
        Ok(written)
    }

    /// Remove section `name` and all its fields from `item`.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Section` without writing if `name` is missing.
    pub fn remove_section(&self, item: Item, name: &str) -> Result<Item> {
        require(name, "section")?;
        let pruned = fields::remove_section(item, name)?;
        let written = self.write(&pruned)?;
        info!(section = name, item = %written.title, "section removed");
        Ok(written)
    }

    /// Move section `from` of `source` into section `to` of `dest`.
    ///
    /// Copies first, then re-reads the source from the store and removes
    /// the section from that fresh copy, so changes made to the source in
    /// between are kept. This narrows, but does not close, the window for
    /// a concurrent writer touching the same section.
    ///
    /// When `source` and `dest` are the same item, the removal runs on the
    /// item as written by the copy.
    ///
    /// # Errors
    ///
    /// Failures before the destination is written are returned as is and
    /// nothing has been written. Failures after that are wrapped in
    /// `Error::PartialMove`: the destination holds the section and the
    /// source still does too. Re-running the move or a remove recovers.
    pub fn move_section(&self, source: &Item, from: &str, dest: Item, to: &str) -> Result<Moved> {
        log_stage(Stage::Start, from);
        let destination = match self.copy_inner(source, from, dest, to) {
            Ok(item) => item,
            Err(e) => {
                log_stage(Stage::Failed, from);
                return Err(e);
            }
        };

        match self.remove_from_fresh(source, from) {
            Ok(source) => {
                log_stage(Stage::Done, from);
                info!(section = from, into = %destination.title, "section moved");
                let destination = if destination.id == source.id {
                    source.clone()
                } else {
                    destination
                };
                Ok(Moved {
                    destination,
                    source,
                })
            }
            Err(cause) => {
                log_stage(Stage::Failed, from);
                Err(Error::PartialMove {
                    section: from.to_string(),
                    cause: Box::new(cause),
                })
            }
        }
    }

    fn remove_from_fresh(&self, source: &Item, from: &str) -> Result<Item> {
        let fresh = self.store.get_item(&source.vault_id, &source.id)?;
        log_stage(Stage::SourceReread, from);

        let pruned = fields::remove_section(fresh, from)?;
        let written = self.write(&pruned)?;
        log_stage(Stage::SourceWritten, from);
        Ok(written)
    }
}
