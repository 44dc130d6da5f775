use crate::config::RolodexConfig;
use crate::model::{Contact, Group, Task};
use uuid::Uuid;

pub mod config;
pub mod contacts;
pub mod groups;
pub mod helpers;
pub mod paths;
pub mod reset;
pub mod tasks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A contact group with its members resolved.
#[derive(Debug, Clone)]
pub struct GroupListing {
    pub group: Group<Uuid>,
    pub members: Vec<Contact>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub contacts: Vec<Contact>,
    pub tasks: Vec<Task>,
    pub groups: Vec<GroupListing>,
    pub locations: Vec<String>,
    pub config: Option<RolodexConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_groups(mut self, groups: Vec<GroupListing>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_config(mut self, config: RolodexConfig) -> Self {
        self.config = Some(config);
        self
    }
}
