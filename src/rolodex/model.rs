//! Core data types: the [`Record`] abstraction and the concrete records it
//! is implemented for ([`Contact`], [`Task`]), plus [`Group`].
//!
//! A record is split into an immutable id and a *draft*, the set of mutable
//! fields. `create` turns a draft into a record under a fresh id; `update`
//! swaps the draft of an existing record. Keeping the draft as its own type
//! lets callers (and the CLI) build partial edits on top of [`Record::to_draft`].

use crate::error::Result;
use crate::validation::{self, Rules};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Identifier type of a record collection.
pub trait RecordId:
    Copy + Default + Eq + Ord + fmt::Debug + fmt::Display + Serialize + DeserializeOwned
{
    /// Produce a fresh id. `counter` is the store's monotonic sequence and is
    /// only advanced by sequential id types. `None` once the sequence is used up.
    fn generate(counter: &mut u64) -> Option<Self>;

    /// The sequence number carried by this id, if it was drawn from the counter.
    fn sequence(&self) -> Option<u64>;
}

impl RecordId for Uuid {
    fn generate(_counter: &mut u64) -> Option<Self> {
        Some(Uuid::new_v4())
    }

    fn sequence(&self) -> Option<u64> {
        None
    }
}

impl RecordId for u64 {
    fn generate(counter: &mut u64) -> Option<Self> {
        *counter = counter.checked_add(1)?;
        Some(*counter)
    }

    fn sequence(&self) -> Option<u64> {
        Some(*self)
    }
}

/// A managed entity with a stable id and a validated set of mutable fields.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    type Id: RecordId;
    type Draft: Clone + fmt::Debug + PartialEq;

    /// Human-readable name of the record kind, used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Check a draft before it is turned into (or applied to) a record.
    fn validate(draft: &Self::Draft, rules: &Rules) -> Result<()>;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// Replace all mutable fields with the draft.
    fn apply(&mut self, draft: Self::Draft);

    fn to_draft(&self) -> Self::Draft;
}

// --- Contacts ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInfo {
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl WorkInfo {
    pub fn new(job_title: impl Into<String>, company: Option<String>) -> Self {
        Self {
            job_title: job_title.into(),
            company,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<WorkInfo>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Name and surname joined, without a trailing space when there is no surname.
    pub fn full_name(&self) -> String {
        if self.surname.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.surname)
        }
    }

    /// Case-insensitive substring match over name, surname, phone and email.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            Some(self.name.as_str()),
            Some(self.surname.as_str()),
            Some(self.phone.as_str()),
            self.email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: Option<String>,
    pub work: Option<WorkInfo>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: String::new(),
            phone: phone.into(),
            email: None,
            work: None,
        }
    }

    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = surname.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_work(mut self, work: WorkInfo) -> Self {
        self.work = Some(work);
        self
    }
}

impl Record for Contact {
    type Id = Uuid;
    type Draft = ContactDraft;

    const KIND: &'static str = "Contact";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(draft: &ContactDraft, rules: &Rules) -> Result<()> {
        validation::require_non_empty("name", &draft.name)?;
        validation::check_phone(&draft.phone, rules)?;
        if let Some(email) = &draft.email {
            validation::check_email(email)?;
        }
        if let Some(work) = &draft.work {
            validation::require_non_empty("job title", &work.job_title)?;
        }
        Ok(())
    }

    fn from_draft(id: Uuid, draft: ContactDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: draft.name,
            surname: draft.surname,
            phone: draft.phone,
            email: draft.email,
            work: draft.work,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: ContactDraft) {
        self.name = draft.name;
        self.surname = draft.surname;
        self.phone = draft.phone;
        self.email = draft.email;
        self.work = draft.work;
        self.updated_at = Utc::now();
    }

    fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            surname: self.surname.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            work: self.work.clone(),
        }
    }
}

// --- Tasks ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub is_done: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            is_done: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }
}

impl Record for Task {
    type Id = u64;
    type Draft = TaskDraft;

    const KIND: &'static str = "Task";

    fn id(&self) -> u64 {
        self.id
    }

    fn validate(draft: &TaskDraft, _rules: &Rules) -> Result<()> {
        validation::require_non_empty("title", &draft.title)
    }

    fn from_draft(id: u64, draft: TaskDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title,
            description: draft.description,
            is_done: draft.is_done,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.is_done = draft.is_done;
        self.updated_at = Utc::now();
    }

    fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            is_done: self.is_done,
        }
    }
}

// --- Groups ---

pub const GROUP_KIND: &str = "Group";

/// A named set of record ids. Members are plain ids, never owned records:
/// a member may outlive the record it points to until the next
/// `members_of` read prunes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group<I: Ord> {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub members: BTreeSet<I>,
}

impl<I: Ord> Group<I> {
    pub fn new(title: impl Into<String>, members: BTreeSet<I>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_advance_the_counter() {
        let mut counter = 0;
        assert_eq!(u64::generate(&mut counter), Some(1));
        assert_eq!(u64::generate(&mut counter), Some(2));
        assert_eq!(counter, 2);
    }

    #[test]
    fn exhausted_counter_yields_no_id() {
        let mut counter = u64::MAX;
        assert_eq!(u64::generate(&mut counter), None);
        assert_eq!(counter, u64::MAX);
    }

    #[test]
    fn uuid_ids_leave_the_counter_alone() {
        let mut counter = 5;
        let a = Uuid::generate(&mut counter).unwrap();
        let b = Uuid::generate(&mut counter).unwrap();
        assert_ne!(a, b);
        assert_eq!(counter, 5);
        assert_eq!(a.sequence(), None);
    }

    #[test]
    fn contact_draft_round_trips_through_record() {
        let draft = ContactDraft::new("Julia", "380001112233")
            .with_surname("Sam")
            .with_email("julia@example.com")
            .with_work(WorkInfo::new("Engineer", Some("Acme".into())));
        let contact = Contact::from_draft(Uuid::new_v4(), draft.clone());
        assert_eq!(contact.to_draft(), draft);
        assert_eq!(contact.full_name(), "Julia Sam");
    }

    #[test]
    fn contact_matches_is_case_insensitive() {
        let contact = Contact::from_draft(
            Uuid::new_v4(),
            ContactDraft::new("Alya", "+7911").with_email("Alya@Mail.ru"),
        );
        assert!(contact.matches("alya"));
        assert!(contact.matches("mail.RU"));
        assert!(contact.matches("+79"));
        assert!(!contact.matches("julia"));
    }

    #[test]
    fn apply_keeps_id_and_creation_time() {
        let mut task = Task::from_draft(3, TaskDraft::new("Notes"));
        let created = task.created_at;
        task.apply(TaskDraft::new("Notes v2").done(true));
        assert_eq!(task.id, 3);
        assert_eq!(task.created_at, created);
        assert!(task.is_done);
        assert!(task.updated_at >= created);
    }

    #[test]
    fn contact_deserializes_without_optional_fields() {
        let json = r#"{"id":"6f1c1b34-9a57-4d43-8a0b-7c1f1a9f2a10","name":"Ira","phone":"Nil"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.surname, "");
        assert_eq!(contact.email, None);
        assert_eq!(contact.work, None);
    }
}
