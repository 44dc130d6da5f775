//! # API Facade
//!
//! The API layer is a thin facade over the command layer. It is the single
//! entry point for all rolodex operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Opens stores lazily**: a snapshot is read the first time a command needs it
//! - **Normalizes inputs**: printable ids (UUID prefixes, task numbers) become typed ids
//! - **Dispatches** to the matching function in `commands/*.rs`
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no terminal I/O and holds no business logic.
//!
//! ## Generic Over BackendProvider
//!
//! `RolodexApi<P: BackendProvider>` is generic over where snapshots live:
//! - Production: `RolodexApi<StorePaths>`
//! - Testing: `RolodexApi<MemProvider>`
//!
//! Stores are opened independently, so a corrupt `tasks.json` does not stop
//! contact commands, and `reset` never reads the snapshot it replaces.

use crate::commands::{self, CmdMessage, CmdResult};
use crate::commands::config::ConfigAction;
use crate::commands::contacts::ContactEdit;
use crate::commands::helpers::{parse_task_id, resolve_contact, resolve_group};
use crate::commands::tasks::{TaskEdit, TaskFilter};
use crate::error::{Result, RolodexError};
use crate::model::{Contact, ContactDraft, Task, TaskDraft};
use crate::store::{BackendProvider, ContactBook, EntityStore, StoreKind, StoreOptions, TaskList};
use std::path::{Path, PathBuf};

/// The main API facade for rolodex operations.
pub struct RolodexApi<P: BackendProvider> {
    provider: P,
    config_dir: PathBuf,
    options: StoreOptions,
    contacts: Option<ContactBook<P::Backend>>,
    tasks: Option<TaskList<P::Backend>>,
}

impl<P: BackendProvider> RolodexApi<P> {
    pub fn new(provider: P, config_dir: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            provider,
            config_dir: config_dir.into(),
            options,
            contacts: None,
            tasks: None,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    fn contact_book(&mut self) -> Result<&mut ContactBook<P::Backend>> {
        let book = match self.contacts.take() {
            Some(book) => book,
            None => EntityStore::open(self.provider.backend(StoreKind::Contacts)?, self.options)?,
        };
        Ok(self.contacts.insert(book))
    }

    fn task_list(&mut self) -> Result<&mut TaskList<P::Backend>> {
        let tasks = match self.tasks.take() {
            Some(tasks) => tasks,
            None => EntityStore::open(self.provider.backend(StoreKind::Tasks)?, self.options)?,
        };
        Ok(self.tasks.insert(tasks))
    }

    // Contacts

    pub fn add_contact(&mut self, draft: ContactDraft) -> Result<CmdResult> {
        commands::contacts::add(self.contact_book()?, draft)
    }

    pub fn list_contacts(&mut self, search: Option<&str>) -> Result<CmdResult> {
        commands::contacts::list(self.contact_book()?, search)
    }

    pub fn show_contact(&mut self, id: &str) -> Result<CmdResult> {
        let book = self.contact_book()?;
        let id = resolve_contact(book, id)?;
        commands::contacts::show(book, id)
    }

    pub fn update_contact(&mut self, id: &str, edit: ContactEdit) -> Result<CmdResult> {
        let book = self.contact_book()?;
        let id = resolve_contact(book, id)?;
        commands::contacts::update(book, id, edit)
    }

    pub fn remove_contact(&mut self, id: &str) -> Result<CmdResult> {
        let book = self.contact_book()?;
        match resolve_contact(book, id) {
            Ok(id) => commands::contacts::remove(book, id),
            Err(RolodexError::NotFound { kind, .. }) => Ok(nothing_removed(kind, id)),
            Err(e) => Err(e),
        }
    }

    // Contact groups

    pub fn list_groups(&mut self) -> Result<CmdResult> {
        commands::groups::list(self.contact_book()?)
    }

    pub fn create_group<I: AsRef<str>>(&mut self, title: String, members: &[I]) -> Result<CmdResult> {
        let book = self.contact_book()?;
        let members = members
            .iter()
            .map(|m| resolve_contact(book, m.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        commands::groups::create(book, title, members)
    }

    pub fn show_group(&mut self, group: &str) -> Result<CmdResult> {
        let book = self.contact_book()?;
        let group_id = resolve_group(book, group)?;
        commands::groups::show(book, group_id)
    }

    pub fn rename_group(&mut self, group: &str, title: String) -> Result<CmdResult> {
        let book = self.contact_book()?;
        let group_id = resolve_group(book, group)?;
        commands::groups::rename(book, group_id, title)
    }

    pub fn add_group_member(&mut self, group: &str, contact: &str) -> Result<CmdResult> {
        let book = self.contact_book()?;
        let group_id = resolve_group(book, group)?;
        let contact_id = resolve_contact(book, contact)?;
        commands::groups::add_member(book, group_id, contact_id)
    }

    pub fn remove_group_member(&mut self, group: &str, contact: &str) -> Result<CmdResult> {
        let book = self.contact_book()?;
        let group_id = resolve_group(book, group)?;
        let contact_id = resolve_contact(book, contact)?;
        commands::groups::remove_member(book, group_id, contact_id)
    }

    pub fn remove_group(&mut self, group: &str) -> Result<CmdResult> {
        let book = self.contact_book()?;
        match resolve_group(book, group) {
            Ok(group_id) => commands::groups::remove(book, group_id),
            Err(RolodexError::NotFound { kind, .. }) => Ok(nothing_removed(kind, group)),
            Err(e) => Err(e),
        }
    }

    // Tasks

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<CmdResult> {
        commands::tasks::add(self.task_list()?, draft)
    }

    pub fn list_tasks(&mut self, filter: TaskFilter) -> Result<CmdResult> {
        commands::tasks::list(self.task_list()?, filter)
    }

    pub fn complete_task(&mut self, id: &str) -> Result<CmdResult> {
        let id = parse_task_id(id)?;
        commands::tasks::set_done(self.task_list()?, id, true)
    }

    pub fn reopen_task(&mut self, id: &str) -> Result<CmdResult> {
        let id = parse_task_id(id)?;
        commands::tasks::set_done(self.task_list()?, id, false)
    }

    pub fn update_task(&mut self, id: &str, edit: TaskEdit) -> Result<CmdResult> {
        let id = parse_task_id(id)?;
        commands::tasks::update(self.task_list()?, id, edit)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<CmdResult> {
        let id = parse_task_id(id)?;
        commands::tasks::remove(self.task_list()?, id)
    }

    // Housekeeping

    /// Show or change settings. A change applies to stores opened afterwards,
    /// so any open store is dropped.
    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let changes = matches!(action, ConfigAction::Set(..));
        let result = commands::config::run(&self.config_dir, action)?;
        if changes {
            if let Some(config) = &result.config {
                self.options = config.store_options();
            }
            self.contacts = None;
            self.tasks = None;
        }
        Ok(result)
    }

    pub fn paths(&self) -> Result<CmdResult> {
        commands::paths::run(&self.provider, &self.config_dir)
    }

    pub fn reset(&mut self, kind: StoreKind) -> Result<CmdResult> {
        let backend = self.provider.backend(kind)?;
        match kind {
            StoreKind::Contacts => {
                let (book, result) = commands::reset::run::<Contact, _>(backend, self.options)?;
                self.contacts = Some(book);
                Ok(result)
            }
            StoreKind::Tasks => {
                let (tasks, result) = commands::reset::run::<Task, _>(backend, self.options)?;
                self.tasks = Some(tasks);
                Ok(result)
            }
        }
    }
}

/// Removal of an id that matches nothing is a no-op, whether the caller gave
/// a full id or a prefix.
fn nothing_removed(kind: &str, input: &str) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "No {} matching {}, nothing removed",
        kind.to_lowercase(),
        input.trim()
    )));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::short_id;
    use crate::store::mem_backend::MemProvider;
    use crate::store::SnapshotBackend;
    use crate::validation::Rules;
    use tempfile::TempDir;

    fn api() -> (RolodexApi<MemProvider>, MemProvider, TempDir) {
        let provider = MemProvider::new();
        let dir = TempDir::new().unwrap();
        let api = RolodexApi::new(provider.clone(), dir.path(), StoreOptions::default());
        (api, provider, dir)
    }

    fn alya() -> ContactDraft {
        ContactDraft::new("Alya", "790011122233")
    }

    #[test]
    fn stores_are_opened_on_first_use() {
        let (mut api, provider, _dir) = api();
        provider.tasks.set_simulate_write_error(true);

        // Contacts work even though the task backend refuses writes.
        api.add_contact(alya()).unwrap();
        assert!(provider.contacts.contents().is_some());
        assert!(provider.tasks.contents().is_none());
    }

    #[test]
    fn contact_ids_resolve_by_prefix() {
        let (mut api, _, _dir) = api();
        let id = api.add_contact(alya()).unwrap().contacts[0].id;

        let shown = api.show_contact(&short_id(&id)).unwrap();
        assert_eq!(shown.contacts[0].id, id);

        api.remove_contact(&id.to_string()).unwrap();
        assert!(api.list_contacts(None).unwrap().contacts.is_empty());
    }

    #[test]
    fn removing_an_unknown_prefix_is_a_no_op() {
        let (mut api, _, _dir) = api();
        let id = api.add_contact(alya()).unwrap().contacts[0].id;
        let unused = if id.to_string().starts_with("ffff") { "eeee" } else { "ffff" };

        let result = api.remove_contact(unused).unwrap();
        assert_eq!(result.messages[0].level, crate::commands::MessageLevel::Info);
        assert!(result.messages[0].content.contains("nothing removed"));
        assert_eq!(api.list_contacts(None).unwrap().contacts.len(), 1);

        let result = api.remove_group(unused).unwrap();
        assert!(result.messages[0].content.starts_with("No group matching"));

        // Lookups other than removal still report the miss.
        assert!(matches!(
            api.show_contact(unused),
            Err(RolodexError::NotFound { .. })
        ));
        // A malformed id is still rejected.
        assert!(matches!(api.remove_contact("xy"), Err(RolodexError::Api(_))));
    }

    #[test]
    fn malformed_contact_id_is_an_api_error() {
        let (mut api, _, _dir) = api();
        assert!(matches!(api.show_contact("xy"), Err(RolodexError::Api(_))));
    }

    #[test]
    fn group_lifecycle_through_the_facade() {
        let (mut api, _, _dir) = api();
        let alya = api.add_contact(alya()).unwrap().contacts[0].id.to_string();
        let ira = api
            .add_contact(ContactDraft::new("Ira", "380001112233"))
            .unwrap()
            .contacts[0]
            .id
            .to_string();

        let created = api.create_group("Friends".into(), &[alya.as_str()]).unwrap();
        let group = created.groups[0].group.id.to_string();

        api.add_group_member(&group, &ira).unwrap();
        assert_eq!(api.show_group(&group).unwrap().groups[0].members.len(), 2);

        api.remove_contact(&alya).unwrap();
        let shown = api.show_group(&group).unwrap();
        assert_eq!(shown.groups[0].members.len(), 1);
        assert_eq!(shown.groups[0].members[0].name, "Ira");

        api.rename_group(&group, "Pals".into()).unwrap();
        assert_eq!(api.list_groups().unwrap().groups[0].group.title, "Pals");

        api.remove_group(&group).unwrap();
        assert!(api.list_groups().unwrap().groups.is_empty());
    }

    #[test]
    fn task_ids_must_be_numbers() {
        let (mut api, _, _dir) = api();
        api.add_task(TaskDraft::new("Notes")).unwrap();

        assert!(matches!(api.complete_task("one"), Err(RolodexError::Api(_))));
        api.complete_task("1").unwrap();
        assert_eq!(api.list_tasks(TaskFilter::Done).unwrap().tasks.len(), 1);
        api.reopen_task("1").unwrap();
        assert_eq!(api.list_tasks(TaskFilter::Pending).unwrap().tasks.len(), 1);
    }

    #[test]
    fn config_change_applies_to_reopened_stores() {
        let (mut api, _, _dir) = api();
        assert!(matches!(
            api.add_contact(ContactDraft::new("Alya", "+7911")),
            Err(RolodexError::Validation { field: "phone", .. })
        ));

        api.config(ConfigAction::Set("strict-phone".into(), "false".into()))
            .unwrap();
        assert_eq!(api.options().rules, Rules::lenient());
        api.add_contact(ContactDraft::new("Alya", "+7911")).unwrap();
        assert_eq!(api.list_contacts(None).unwrap().contacts.len(), 1);
    }

    #[test]
    fn reset_replaces_a_corrupt_snapshot() {
        let (mut api, provider, _dir) = api();
        provider.contacts.save("[1, 2").unwrap();

        assert!(matches!(
            api.list_contacts(None),
            Err(RolodexError::CorruptState { .. })
        ));
        api.reset(StoreKind::Contacts).unwrap();
        assert!(api.list_contacts(None).unwrap().contacts.is_empty());
    }

    #[test]
    fn paths_lists_three_locations() {
        let (api, _, dir) = api();
        let result = api.paths().unwrap();
        assert_eq!(result.locations.len(), 3);
        assert_eq!(
            result.locations[2],
            dir.path().join("config.json").display().to_string()
        );
    }
}
