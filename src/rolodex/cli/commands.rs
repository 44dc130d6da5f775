use super::render::{
    print_messages, render_config, render_contact, render_contact_list, render_groups,
    render_task_list,
};
use super::setup::{Cli, Commands, ContactCommands, GroupCommands, TaskCommands};
use clap::Parser;
use directories::ProjectDirs;
use log::{debug, warn};
use rolodex::api::RolodexApi;
use rolodex::commands::config::ConfigAction;
use rolodex::commands::contacts::ContactEdit;
use rolodex::commands::tasks::{TaskEdit, TaskFilter};
use rolodex::commands::CmdResult;
use rolodex::config::RolodexConfig;
use rolodex::error::{Result, RolodexError};
use rolodex::logging;
use rolodex::model::{ContactDraft, TaskDraft, WorkInfo};
use rolodex::store::fs_backend::StorePaths;
use rolodex::store::StoreKind;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const HOME_ENV: &str = "ROLODEX_HOME";

struct AppContext {
    api: RolodexApi<StorePaths>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Contact(cmd)) => match cmd {
            ContactCommands::List { search } => handle_contact_list(&mut ctx, search),
            ContactCommands::Add {
                name,
                phone,
                surname,
                email,
                job_title,
                company,
            } => {
                let mut draft = ContactDraft::new(name, phone);
                if let Some(surname) = surname {
                    draft = draft.with_surname(surname);
                }
                if let Some(email) = email {
                    draft = draft.with_email(email);
                }
                if job_title.is_some() || company.is_some() {
                    draft = draft.with_work(WorkInfo::new(job_title.unwrap_or_default(), company));
                }
                handle_contact_add(&mut ctx, draft)
            }
            ContactCommands::Show { id } => handle_contact_show(&mut ctx, &id),
            ContactCommands::Update {
                id,
                name,
                surname,
                phone,
                email,
                job_title,
                company,
            } => {
                let edit = ContactEdit {
                    name,
                    surname,
                    phone,
                    email,
                    job_title,
                    company,
                };
                handle_contact_update(&mut ctx, &id, edit)
            }
            ContactCommands::Remove { id } => handle_contact_remove(&mut ctx, &id),
        },
        Some(Commands::Group(cmd)) => match cmd {
            GroupCommands::List => handle_group_list(&mut ctx),
            GroupCommands::Add { title, members } => handle_group_add(&mut ctx, title, members),
            GroupCommands::Show { id } => handle_group_show(&mut ctx, &id),
            GroupCommands::Rename { id, title } => finish(&ctx.api.rename_group(&id, title)?),
            GroupCommands::AddMember { group, contact } => {
                finish(&ctx.api.add_group_member(&group, &contact)?)
            }
            GroupCommands::RemoveMember { group, contact } => {
                finish(&ctx.api.remove_group_member(&group, &contact)?)
            }
            GroupCommands::Remove { id } => finish(&ctx.api.remove_group(&id)?),
        },
        Some(Commands::Task(cmd)) => match cmd {
            TaskCommands::List { done, pending } => {
                let filter = match (done, pending) {
                    (true, _) => TaskFilter::Done,
                    (_, true) => TaskFilter::Pending,
                    _ => TaskFilter::All,
                };
                handle_task_list(&mut ctx, filter)
            }
            TaskCommands::Add { title, description } => {
                let mut draft = TaskDraft::new(title);
                if let Some(description) = description {
                    draft = draft.with_description(description);
                }
                finish(&ctx.api.add_task(draft)?)
            }
            TaskCommands::Done { id } => finish(&ctx.api.complete_task(&id)?),
            TaskCommands::Undo { id } => finish(&ctx.api.reopen_task(&id)?),
            TaskCommands::Update {
                id,
                title,
                description,
            } => finish(&ctx.api.update_task(&id, TaskEdit { title, description })?),
            TaskCommands::Remove { id } => finish(&ctx.api.remove_task(&id)?),
        },
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Path) => handle_paths(&ctx),
        Some(Commands::Reset { store }) => handle_reset(&mut ctx, &store),
        None => handle_contact_list(&mut ctx, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone(), std::env::var_os(HOME_ENV))?;

    let (config, config_error) = match RolodexConfig::load(&data_dir) {
        Ok(config) => (config, None),
        Err(e) => (RolodexConfig::default(), Some(e)),
    };

    let level = logging::effective_level(cli.verbose, &config.log_level);
    if let Err(e) = logging::init_logging(level) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    if let Some(e) = config_error {
        warn!("Ignoring unreadable config in {}: {}", data_dir.display(), e);
    }
    debug!("Data directory: {}", data_dir.display());

    let api = RolodexApi::new(
        StorePaths::new(&data_dir),
        data_dir,
        config.store_options(),
    );
    Ok(AppContext { api })
}

fn resolve_data_dir(flag: Option<PathBuf>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "rolodex", "rolodex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            RolodexError::Store(format!(
                "Could not determine a data directory; set {} or pass --data-dir",
                HOME_ENV
            ))
        })
}

fn finish(result: &CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_contact_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.list_contacts(search.as_deref())?;
    print!("{}", render_contact_list(&result.contacts));
    finish(&result)
}

fn handle_contact_add(ctx: &mut AppContext, draft: ContactDraft) -> Result<()> {
    let result = ctx.api.add_contact(draft)?;
    finish(&result)
}

fn handle_contact_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_contact(id)?;
    for contact in &result.contacts {
        print!("{}", render_contact(contact));
    }
    finish(&result)
}

fn handle_contact_update(ctx: &mut AppContext, id: &str, edit: ContactEdit) -> Result<()> {
    let result = ctx.api.update_contact(id, edit)?;
    finish(&result)
}

fn handle_contact_remove(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.remove_contact(id)?;
    finish(&result)
}

fn handle_group_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_groups()?;
    print!("{}", render_groups(&result.groups));
    finish(&result)
}

fn handle_group_add(ctx: &mut AppContext, title: String, members: Vec<String>) -> Result<()> {
    let result = ctx.api.create_group(title, &members)?;
    finish(&result)
}

fn handle_group_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_group(id)?;
    print!("{}", render_groups(&result.groups));
    finish(&result)
}

fn handle_task_list(ctx: &mut AppContext, filter: TaskFilter) -> Result<()> {
    let result = ctx.api.list_tasks(filter)?;
    print!("{}", render_task_list(&result.tasks));
    finish(&result)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    finish(&result)
}

fn handle_paths(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.paths()?;
    for location in &result.locations {
        println!("{}", location);
    }
    finish(&result)
}

fn handle_reset(ctx: &mut AppContext, store: &str) -> Result<()> {
    let kind: StoreKind = store.parse()?;
    let result = ctx.api.reset(kind)?;
    finish(&result)
}
