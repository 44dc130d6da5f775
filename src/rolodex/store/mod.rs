//! # Storage Layer
//!
//! An [`EntityStore`] is an in-memory collection of records mirrored to a
//! whole-document JSON snapshot. The snapshot is read once, when the store is
//! opened, and rewritten in full after every mutating call.
//!
//! ## Split of Responsibilities
//!
//! - [`EntityStore`] owns the "what": the records, the groups that point at
//!   them, id assignment, validation and the snapshot format.
//! - [`SnapshotBackend`] owns the "how": where the serialized document lives.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: a JSON file, replaced atomically (tmp + rename).
//! - [`mem_backend::MemBackend`]: a shared string, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── contacts.json   # Contacts and contact groups
//! ├── tasks.json      # Tasks and the task id counter
//! └── config.json     # Settings
//! ```
//!
//! ## Snapshot Format
//!
//! ```json
//! { "last_id": 2, "records": [ ... ], "groups": [ ... ] }
//! ```
//!
//! `last_id` is left out while zero and `groups` while empty. A bare JSON
//! array of records is also accepted when reading.
//!
//! ## Failure Semantics
//!
//! - Missing snapshot: the store opens empty.
//! - Unparsable snapshot, or duplicate ids: `CorruptState`. The caller decides
//!   whether to abort or [`EntityStore::reset`].
//! - Failed write: the error is returned, but the in-memory change stays.

use crate::error::{Result, RolodexError};
use crate::model::{Contact, Task};
use crate::validation::Rules;
use std::fmt;
use std::str::FromStr;

pub mod backend;
pub mod entity_store;
pub mod fs_backend;
pub mod groups;
pub mod mem_backend;
pub mod snapshot;

pub use backend::{BackendProvider, SnapshotBackend};
pub use entity_store::EntityStore;
pub use snapshot::Snapshot;

pub type ContactBook<B> = EntityStore<Contact, B>;
pub type TaskList<B> = EntityStore<Task, B>;

/// The snapshot files rolodex keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Contacts,
    Tasks,
}

impl StoreKind {
    pub const ALL: [StoreKind; 2] = [StoreKind::Contacts, StoreKind::Tasks];

    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKind::Contacts => "contacts.json",
            StoreKind::Tasks => "tasks.json",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Contacts => write!(f, "contacts"),
            StoreKind::Tasks => write!(f, "tasks"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contacts" | "contact" => Ok(StoreKind::Contacts),
            "tasks" | "task" => Ok(StoreKind::Tasks),
            other => Err(RolodexError::Api(format!(
                "Unknown store: {} (expected contacts or tasks)",
                other
            ))),
        }
    }
}

/// Settings a store is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub rules: Rules,
    pub pretty_json: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            pretty_json: true,
        }
    }
}

impl StoreOptions {
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_kind_parses_singular_and_plural() {
        assert_eq!("contacts".parse::<StoreKind>().unwrap(), StoreKind::Contacts);
        assert_eq!("task".parse::<StoreKind>().unwrap(), StoreKind::Tasks);
        assert!("groups".parse::<StoreKind>().is_err());
    }

    #[test]
    fn store_kind_display_round_trips() {
        for kind in StoreKind::ALL {
            assert_eq!(kind.to_string().parse::<StoreKind>().unwrap(), kind);
        }
    }
}
