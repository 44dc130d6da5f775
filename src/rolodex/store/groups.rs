//! Group operations on [`EntityStore`].
//!
//! Groups hold record ids, not records. Removing a record leaves its id in
//! every group that lists it; [`EntityStore::members_of`] drops such stale
//! ids the next time the group is read and persists the pruned group. All
//! other operations treat an unknown group or record id as `NotFound`.

use super::backend::SnapshotBackend;
use super::EntityStore;
use crate::error::{Result, RolodexError};
use crate::model::{Group, Record, GROUP_KIND};
use crate::validation;
use log::warn;
use std::collections::BTreeSet;
use uuid::Uuid;

impl<R: Record, B: SnapshotBackend> EntityStore<R, B> {
    pub fn groups(&self) -> &[Group<R::Id>] {
        &self.groups
    }

    pub fn group(&self, group_id: Uuid) -> Option<&Group<R::Id>> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn create_group<I>(&mut self, title: impl Into<String>, members: I) -> Result<Group<R::Id>>
    where
        I: IntoIterator<Item = R::Id>,
    {
        let title = title.into();
        validation::require_non_empty("title", &title)?;
        let members: BTreeSet<R::Id> = members.into_iter().collect();
        for id in &members {
            self.require_record(*id)?;
        }

        let group = Group::new(title, members);
        self.groups.push(group.clone());
        self.persist()?;
        Ok(group)
    }

    pub fn add_member(&mut self, group_id: Uuid, record_id: R::Id) -> Result<Group<R::Id>> {
        let idx = self.group_index(group_id)?;
        self.require_record(record_id)?;
        self.groups[idx].members.insert(record_id);
        self.persist()?;
        Ok(self.groups[idx].clone())
    }

    pub fn remove_member(&mut self, group_id: Uuid, record_id: R::Id) -> Result<Group<R::Id>> {
        let idx = self.group_index(group_id)?;
        self.require_record(record_id)?;
        self.groups[idx].members.remove(&record_id);
        self.persist()?;
        Ok(self.groups[idx].clone())
    }

    pub fn rename_group(&mut self, group_id: Uuid, title: impl Into<String>) -> Result<Group<R::Id>> {
        let idx = self.group_index(group_id)?;
        let title = title.into();
        validation::require_non_empty("title", &title)?;
        self.groups[idx].title = title;
        self.persist()?;
        Ok(self.groups[idx].clone())
    }

    /// Remove a group. Like record removal, an unknown id is a no-op.
    pub fn remove_group(&mut self, group_id: Uuid) -> Result<Option<Group<R::Id>>> {
        let removed = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .map(|idx| self.groups.remove(idx));
        self.persist()?;
        Ok(removed)
    }

    /// Resolve a group's members, in record order.
    pub fn members_of(&mut self, group_id: Uuid) -> Result<Vec<R>> {
        let idx = self.group_index(group_id)?;

        let stale: Vec<R::Id> = self.groups[idx]
            .members
            .iter()
            .copied()
            .filter(|id| self.get(*id).is_none())
            .collect();
        if !stale.is_empty() {
            let group = &mut self.groups[idx];
            for id in &stale {
                group.members.remove(id);
            }
            warn!(
                "Pruned {} dangling member(s) from group {}",
                stale.len(),
                group_id
            );
            self.persist()?;
        }

        let members = &self.groups[idx].members;
        Ok(self
            .records
            .iter()
            .filter(|r| members.contains(&r.id()))
            .cloned()
            .collect())
    }

    fn group_index(&self, group_id: Uuid) -> Result<usize> {
        self.groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| RolodexError::not_found(GROUP_KIND, group_id))
    }

    fn require_record(&self, id: R::Id) -> Result<()> {
        match self.get(id) {
            Some(_) => Ok(()),
            None => Err(RolodexError::not_found(R::KIND, id)),
        }
    }
}
