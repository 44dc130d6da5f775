use crate::commands::helpers::short_id;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RolodexError};
use crate::model::{Contact, ContactDraft, Record, WorkInfo};
use crate::store::{ContactBook, SnapshotBackend};
use uuid::Uuid;

/// A partial change to a contact. `None` leaves a field alone; for the
/// optional fields an empty string clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEdit {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}

impl ContactEdit {
    pub fn is_empty(&self) -> bool {
        self == &ContactEdit::default()
    }

    fn apply_to(self, mut draft: ContactDraft) -> ContactDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(surname) = self.surname {
            draft.surname = surname;
        }
        if let Some(phone) = self.phone {
            draft.phone = phone;
        }
        if let Some(email) = self.email {
            draft.email = non_empty(email);
        }
        match self.job_title.map(non_empty) {
            Some(None) => draft.work = None,
            Some(Some(job_title)) => {
                let company = draft.work.take().and_then(|w| w.company);
                draft.work = Some(WorkInfo::new(job_title, company));
            }
            None => {}
        }
        if let Some(company) = self.company {
            let mut work = draft
                .work
                .take()
                .unwrap_or_else(|| WorkInfo::new(String::new(), None));
            work.company = non_empty(company);
            draft.work = Some(work);
        }
        draft
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn add<B: SnapshotBackend>(book: &mut ContactBook<B>, draft: ContactDraft) -> Result<CmdResult> {
    let contact = book.create(draft)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact added ({}): {}",
        short_id(&contact.id),
        contact.full_name()
    )));
    result.contacts.push(contact);
    Ok(result)
}

pub fn list<B: SnapshotBackend>(book: &ContactBook<B>, search: Option<&str>) -> Result<CmdResult> {
    let listed: Vec<Contact> = book
        .find(|c| search.map_or(true, |term| c.matches(term)))
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_contacts(listed))
}

pub fn show<B: SnapshotBackend>(book: &ContactBook<B>, id: Uuid) -> Result<CmdResult> {
    let contact = book
        .get(id)
        .cloned()
        .ok_or_else(|| RolodexError::not_found(Contact::KIND, id))?;
    Ok(CmdResult::default().with_contacts(vec![contact]))
}

pub fn update<B: SnapshotBackend>(
    book: &mut ContactBook<B>,
    id: Uuid,
    edit: ContactEdit,
) -> Result<CmdResult> {
    let current = book
        .get(id)
        .ok_or_else(|| RolodexError::not_found(Contact::KIND, id))?;

    if edit.is_empty() {
        let mut result = CmdResult::default().with_contacts(vec![current.clone()]);
        result.add_message(CmdMessage::warning("Nothing to update"));
        return Ok(result);
    }

    let draft = edit.apply_to(current.to_draft());
    let contact = book.update(id, draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact updated ({}): {}",
        short_id(&contact.id),
        contact.full_name()
    )));
    result.contacts.push(contact);
    Ok(result)
}

pub fn remove<B: SnapshotBackend>(book: &mut ContactBook<B>, id: Uuid) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match book.remove(id)? {
        Some(contact) => {
            result.add_message(CmdMessage::success(format!(
                "Contact removed ({}): {}",
                short_id(&contact.id),
                contact.full_name()
            )));
            result.contacts.push(contact);
        }
        None => result.add_message(CmdMessage::info(format!(
            "No contact with id {}, nothing removed",
            id
        ))),
    }
    Ok(result)
}
