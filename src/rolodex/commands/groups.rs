use crate::commands::helpers::short_id;
use crate::commands::{CmdMessage, CmdResult, GroupListing};
use crate::error::{Result, RolodexError};
use crate::model::{Group, GROUP_KIND};
use crate::store::{ContactBook, SnapshotBackend};
use uuid::Uuid;

fn listing<B: SnapshotBackend>(book: &mut ContactBook<B>, group: Group<Uuid>) -> Result<GroupListing> {
    let members = book.members_of(group.id)?;
    // Re-read: members_of may have pruned the stored group.
    let group = book.group(group.id).cloned().unwrap_or(group);
    Ok(GroupListing { group, members })
}

/// All groups with their members. Reading members prunes dangling ids.
pub fn list<B: SnapshotBackend>(book: &mut ContactBook<B>) -> Result<CmdResult> {
    let groups: Vec<Group<Uuid>> = book.groups().to_vec();
    let mut listed = Vec::with_capacity(groups.len());
    for group in groups {
        listed.push(listing(book, group)?);
    }
    Ok(CmdResult::default().with_groups(listed))
}

pub fn show<B: SnapshotBackend>(book: &mut ContactBook<B>, group_id: Uuid) -> Result<CmdResult> {
    let group = book
        .group(group_id)
        .cloned()
        .ok_or_else(|| RolodexError::not_found(GROUP_KIND, group_id))?;
    let listed = listing(book, group)?;
    Ok(CmdResult::default().with_groups(vec![listed]))
}

pub fn create<B: SnapshotBackend>(
    book: &mut ContactBook<B>,
    title: String,
    members: Vec<Uuid>,
) -> Result<CmdResult> {
    let group = book.create_group(title, members)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Group added ({}): {}",
        short_id(&group.id),
        group.title
    )));
    result.groups.push(listing(book, group)?);
    Ok(result)
}

pub fn rename<B: SnapshotBackend>(
    book: &mut ContactBook<B>,
    group_id: Uuid,
    title: String,
) -> Result<CmdResult> {
    let old_title = book.group(group_id).map(|g| g.title.clone());
    let group = book.rename_group(group_id, title)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Group renamed ({}): {} -> {}",
        short_id(&group.id),
        old_title.unwrap_or_default(),
        group.title
    )));
    Ok(result)
}

pub fn add_member<B: SnapshotBackend>(
    book: &mut ContactBook<B>,
    group_id: Uuid,
    contact_id: Uuid,
) -> Result<CmdResult> {
    let already = book
        .group(group_id)
        .is_some_and(|g| g.members.contains(&contact_id));
    let group = book.add_member(group_id, contact_id)?;
    let name = member_name(book, contact_id);

    let mut result = CmdResult::default();
    if already {
        result.add_message(CmdMessage::info(format!(
            "{} is already in {}",
            name, group.title
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Added {} to {}",
            name, group.title
        )));
    }
    Ok(result)
}

pub fn remove_member<B: SnapshotBackend>(
    book: &mut ContactBook<B>,
    group_id: Uuid,
    contact_id: Uuid,
) -> Result<CmdResult> {
    let was_member = book
        .group(group_id)
        .is_some_and(|g| g.members.contains(&contact_id));
    let group = book.remove_member(group_id, contact_id)?;
    let name = member_name(book, contact_id);

    let mut result = CmdResult::default();
    if was_member {
        result.add_message(CmdMessage::success(format!(
            "Removed {} from {}",
            name, group.title
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} is not in {}",
            name, group.title
        )));
    }
    Ok(result)
}

pub fn remove<B: SnapshotBackend>(book: &mut ContactBook<B>, group_id: Uuid) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match book.remove_group(group_id)? {
        Some(group) => result.add_message(CmdMessage::success(format!(
            "Group removed ({}): {}",
            short_id(&group.id),
            group.title
        ))),
        None => result.add_message(CmdMessage::info(format!(
            "No group with id {}, nothing removed",
            group_id
        ))),
    }
    Ok(result)
}

fn member_name<B: SnapshotBackend>(book: &ContactBook<B>, contact_id: Uuid) -> String {
    book.get(contact_id)
        .map(|c| c.full_name())
        .unwrap_or_else(|| contact_id.to_string())
}
