use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RolodexError};
use crate::model::{Record, Task, TaskDraft};
use crate::store::{SnapshotBackend, TaskList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Done,
    Pending,
}

impl TaskFilter {
    fn accepts(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Done => task.is_done,
            TaskFilter::Pending => !task.is_done,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
}

fn existing<B: SnapshotBackend>(tasks: &TaskList<B>, id: u64) -> Result<&Task> {
    tasks
        .get(id)
        .ok_or_else(|| RolodexError::not_found(Task::KIND, id))
}

pub fn add<B: SnapshotBackend>(tasks: &mut TaskList<B>, draft: TaskDraft) -> Result<CmdResult> {
    let task = tasks.create(draft)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Task added ({}): {}",
        task.id, task.title
    )));
    result.tasks.push(task);
    Ok(result)
}

pub fn list<B: SnapshotBackend>(tasks: &TaskList<B>, filter: TaskFilter) -> Result<CmdResult> {
    let listed: Vec<Task> = tasks
        .find(|t| filter.accepts(t))
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_tasks(listed))
}

/// Mark a task done or not done.
pub fn set_done<B: SnapshotBackend>(tasks: &mut TaskList<B>, id: u64, done: bool) -> Result<CmdResult> {
    let current = existing(tasks, id)?;
    let mut result = CmdResult::default();

    if current.is_done == done {
        let state = if done { "already done" } else { "not done yet" };
        result.add_message(CmdMessage::info(format!(
            "Task {} is {}: {}",
            id, state, current.title
        )));
        result.tasks.push(current.clone());
        return Ok(result);
    }

    let draft = current.to_draft().done(done);
    let task = tasks.update(id, draft)?;
    let verb = if done { "completed" } else { "reopened" };
    result.add_message(CmdMessage::success(format!(
        "Task {} ({}): {}",
        verb, task.id, task.title
    )));
    result.tasks.push(task);
    Ok(result)
}

pub fn update<B: SnapshotBackend>(tasks: &mut TaskList<B>, id: u64, edit: TaskEdit) -> Result<CmdResult> {
    let current = existing(tasks, id)?;
    if edit == TaskEdit::default() {
        let mut result = CmdResult::default().with_tasks(vec![current.clone()]);
        result.add_message(CmdMessage::warning("Nothing to update"));
        return Ok(result);
    }

    let mut draft = current.to_draft();
    if let Some(title) = edit.title {
        draft.title = title;
    }
    if let Some(description) = edit.description {
        draft.description = description;
    }
    let task = tasks.update(id, draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Task updated ({}): {}",
        task.id, task.title
    )));
    result.tasks.push(task);
    Ok(result)
}

pub fn remove<B: SnapshotBackend>(tasks: &mut TaskList<B>, id: u64) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match tasks.remove(id)? {
        Some(task) => {
            result.add_message(CmdMessage::success(format!(
                "Task removed ({}): {}",
                task.id, task.title
            )));
            result.tasks.push(task);
        }
        None => result.add_message(CmdMessage::info(format!(
            "No task with id {}, nothing removed",
            id
        ))),
    }
    Ok(result)
}
