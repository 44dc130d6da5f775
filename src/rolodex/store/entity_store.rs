use super::backend::SnapshotBackend;
use super::snapshot::Snapshot;
use super::StoreOptions;
use crate::error::{Result, RolodexError};
use crate::model::{Group, Record, RecordId};
use log::{debug, info, warn};

pub struct EntityStore<R: Record, B: SnapshotBackend> {
    backend: B,
    options: StoreOptions,
    pub(super) records: Vec<R>,
    pub(super) groups: Vec<Group<R::Id>>,
    last_id: u64,
}

impl<R: Record, B: SnapshotBackend> EntityStore<R, B> {
    /// Load the snapshot behind `backend`, or start empty if there is none.
    pub fn open(backend: B, options: StoreOptions) -> Result<Self> {
        let snapshot = match backend.load()? {
            None => {
                info!(
                    "No {} snapshot at {}, starting empty",
                    R::KIND,
                    backend.location()
                );
                Snapshot::default()
            }
            Some(raw) => Snapshot::parse(&raw).map_err(|reason| {
                warn!("Corrupt {} snapshot at {}: {}", R::KIND, backend.location(), reason);
                RolodexError::CorruptState {
                    location: backend.location(),
                    reason,
                }
            })?,
        };

        info!(
            "Opened {} store at {} ({} records, {} groups)",
            R::KIND,
            backend.location(),
            snapshot.records.len(),
            snapshot.groups.len()
        );

        Ok(Self {
            backend,
            options,
            records: snapshot.records,
            groups: snapshot.groups,
            last_id: snapshot.last_id,
        })
    }

    /// Overwrite whatever `backend` holds with an empty snapshot.
    pub fn reset(backend: B, options: StoreOptions) -> Result<Self> {
        let store = Self {
            backend,
            options,
            records: Vec::new(),
            groups: Vec::new(),
            last_id: 0,
        };
        store.persist()?;
        info!("Reset {} store at {}", R::KIND, store.backend.location());
        Ok(store)
    }

    pub fn create(&mut self, draft: R::Draft) -> Result<R> {
        R::validate(&draft, &self.options.rules)?;
        let id = self.fresh_id()?;
        let record = R::from_draft(id, draft);
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    pub fn update(&mut self, id: R::Id, draft: R::Draft) -> Result<R> {
        let pos = self
            .position(id)
            .ok_or_else(|| RolodexError::not_found(R::KIND, id))?;
        R::validate(&draft, &self.options.rules)?;
        self.records[pos].apply(draft);
        let updated = self.records[pos].clone();
        self.persist()?;
        Ok(updated)
    }

    /// Remove a record. Absent ids are not an error; the snapshot is written
    /// either way. Groups keep pointing at the removed id until their members
    /// are next read.
    pub fn remove(&mut self, id: R::Id) -> Result<Option<R>> {
        let removed = self.position(id).map(|pos| self.records.remove(pos));
        if removed.is_none() {
            debug!("Remove of unknown {} {} is a no-op", R::KIND, id);
        }
        self.persist()?;
        Ok(removed)
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// All records matching `predicate`, in insertion order.
    pub fn find<P>(&self, predicate: P) -> Vec<&R>
    where
        P: Fn(&R) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    pub fn snapshot(&self) -> Snapshot<R> {
        Snapshot {
            last_id: self.last_id,
            records: self.records.clone(),
            groups: self.groups.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        self.snapshot()
            .to_json(self.options.pretty_json)
            .map_err(RolodexError::Serialization)
    }

    pub(super) fn persist(&self) -> Result<()> {
        let json = self.to_json()?;
        self.backend.save(&json)?;
        debug!(
            "Persisted {} {} records and {} groups to {}",
            self.records.len(),
            R::KIND,
            self.groups.len(),
            self.backend.location()
        );
        Ok(())
    }

    fn position(&self, id: R::Id) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn fresh_id(&mut self) -> Result<R::Id> {
        loop {
            let id = R::Id::generate(&mut self.last_id).ok_or_else(|| {
                RolodexError::Store(format!(
                    "{} id counter exhausted at {}",
                    R::KIND,
                    self.backend.location()
                ))
            })?;
            if self.position(id).is_none() {
                return Ok(id);
            }
        }
    }
}
