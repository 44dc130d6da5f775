use crate::model::{Group, Record, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The persisted form of a store: every record, every group, and the
/// sequential id counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", deny_unknown_fields)]
pub struct Snapshot<R: Record> {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_id: u64,
    pub records: Vec<R>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group<R::Id>>,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// Accepted on read: the current document, or a bare list of records.
#[derive(Deserialize)]
#[serde(bound = "", untagged)]
enum SnapshotFile<R: Record> {
    Document(Snapshot<R>),
    Records(Vec<R>),
}

impl<R: Record> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            last_id: 0,
            records: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl<R: Record> Snapshot<R> {
    /// Parse and check a raw snapshot. The error is a human-readable reason,
    /// wrapped into `CorruptState` by the caller, who knows the location.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        let file: SnapshotFile<R> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let mut snapshot = match file {
            SnapshotFile::Document(snapshot) => snapshot,
            SnapshotFile::Records(records) => Snapshot {
                records,
                ..Snapshot::default()
            },
        };

        let mut seen = BTreeSet::new();
        for record in &snapshot.records {
            if !seen.insert(record.id()) {
                return Err(format!("duplicate {} id {}", R::KIND, record.id()));
            }
        }
        let mut seen_groups = BTreeSet::new();
        for group in &snapshot.groups {
            if !seen_groups.insert(group.id) {
                return Err(format!("duplicate group id {}", group.id));
            }
        }

        // The counter must stay ahead of every sequential id on file.
        let highest = snapshot
            .records
            .iter()
            .filter_map(|r| r.id().sequence())
            .max()
            .unwrap_or(0);
        snapshot.last_id = snapshot.last_id.max(highest);

        Ok(snapshot)
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
