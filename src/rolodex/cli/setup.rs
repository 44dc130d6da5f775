use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rolodex", bin_name = "rolodex", version)]
#[command(about = "Contacts, contact groups and tasks on the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the snapshots and config (overrides ROLODEX_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage contacts
    #[command(subcommand, alias = "c")]
    Contact(ContactCommands),

    /// Manage contact groups
    #[command(subcommand, alias = "g")]
    Group(GroupCommands),

    /// Manage tasks
    #[command(subcommand, alias = "t")]
    Task(TaskCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (strict-phone, pretty-json, log-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print where the snapshots and config live
    Path,

    /// Replace a snapshot with an empty one
    Reset {
        /// Which store: contacts or tasks
        store: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// List contacts
    #[command(alias = "ls")]
    List {
        /// Only contacts whose name, surname, phone or email contain TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,
    },

    /// Add a contact
    Add {
        name: String,
        phone: String,

        #[arg(long)]
        surname: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        job_title: Option<String>,

        /// Requires a job title
        #[arg(long)]
        company: Option<String>,
    },

    /// Show one contact
    Show {
        /// Contact id or a unique prefix of it
        id: String,
    },

    /// Change fields of a contact (an empty value clears email, job title, company)
    Update {
        /// Contact id or a unique prefix of it
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        surname: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        job_title: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },

    /// Remove a contact
    #[command(alias = "rm")]
    Remove {
        /// Contact id or a unique prefix of it
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List groups with their members
    #[command(alias = "ls")]
    List,

    /// Create a group
    Add {
        title: String,

        /// Contacts to put in the group
        #[arg(value_name = "CONTACT_ID")]
        members: Vec<String>,
    },

    /// Show a group and its members
    Show { id: String },

    /// Rename a group
    Rename { id: String, title: String },

    /// Add a contact to a group
    AddMember { group: String, contact: String },

    /// Take a contact out of a group
    RemoveMember { group: String, contact: String },

    /// Remove a group (its contacts stay)
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Only finished tasks
        #[arg(long, conflicts_with = "pending")]
        done: bool,

        /// Only unfinished tasks
        #[arg(long)]
        pending: bool,
    },

    /// Add a task
    Add {
        title: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Mark a task as done
    Done { id: String },

    /// Mark a task as not done
    Undo { id: String },

    /// Change the title or description of a task
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a task
    #[command(alias = "rm")]
    Remove { id: String },
}
