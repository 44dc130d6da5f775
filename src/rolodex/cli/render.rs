use chrono::{DateTime, Utc};
use colored::Colorize;
use rolodex::commands::helpers::short_id;
use rolodex::commands::{CmdMessage, GroupListing, MessageLevel};
use rolodex::config::{RolodexConfig, KEYS};
use rolodex::model::{Contact, Task};
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const NAME_WIDTH: usize = 28;
const PHONE_WIDTH: usize = 16;
const DONE_MARKER: &str = "✓";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per contact: short id, name, phone, email, age.
pub(super) fn render_contact_list(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts found.\n".to_string();
    }

    let mut out = String::new();
    for contact in contacts {
        let id = format!("{}  ", short_id(&contact.id));
        let name = pad_to_width(&truncate_to_width(&contact.full_name(), NAME_WIDTH), NAME_WIDTH);
        let phone = pad_to_width(&contact.phone, PHONE_WIDTH);

        let fixed = id.width() + NAME_WIDTH + PHONE_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let email = truncate_to_width(contact.email.as_deref().unwrap_or(""), available);
        let email = pad_to_width(&email, available);

        let _ = writeln!(
            out,
            "{}{} {} {}{}",
            id.yellow(),
            name,
            phone,
            email,
            format_time_ago(contact.created_at).dimmed()
        );
    }
    out
}

pub(super) fn render_contact(contact: &Contact) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", short_id(&contact.id).yellow(), contact.full_name().bold());
    let _ = writeln!(out, "--------------------------------");
    let _ = writeln!(out, "{:<10}{}", "id", contact.id);
    let _ = writeln!(out, "{:<10}{}", "phone", contact.phone);
    if let Some(email) = &contact.email {
        let _ = writeln!(out, "{:<10}{}", "email", email);
    }
    if let Some(work) = &contact.work {
        let job = match &work.company {
            Some(company) => format!("{} at {}", work.job_title, company),
            None => work.job_title.clone(),
        };
        let _ = writeln!(out, "{:<10}{}", "work", job);
    }
    let _ = writeln!(
        out,
        "{:<10}{}",
        "updated",
        format_time_ago(contact.updated_at).trim_start()
    );
    out
}

/// Groups with their members indented underneath.
pub(super) fn render_groups(groups: &[GroupListing]) -> String {
    if groups.is_empty() {
        return "No groups found.\n".to_string();
    }

    let mut out = String::new();
    for (i, listing) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let count = match listing.members.len() {
            1 => "1 member".to_string(),
            n => format!("{} members", n),
        };
        let _ = writeln!(
            out,
            "{}  {} {}",
            short_id(&listing.group.id).yellow(),
            listing.group.title.bold(),
            format!("({})", count).dimmed()
        );
        for member in &listing.members {
            let _ = writeln!(
                out,
                "    {}  {} {}",
                short_id(&member.id),
                pad_to_width(&truncate_to_width(&member.full_name(), NAME_WIDTH), NAME_WIDTH),
                member.phone
            );
        }
    }
    out
}

pub(super) fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let id_width = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for task in tasks {
        let marker = if task.is_done { DONE_MARKER } else { " " };
        let idx = format!("{:>width$}. ", task.id, width = id_width);
        let prefix = format!("  [{}] ", marker);

        let text = if task.description.is_empty() {
            task.title.clone()
        } else {
            let preview: String = task
                .description
                .chars()
                .take(50)
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect();
            format!("{} {}", task.title, preview)
        };

        let fixed = prefix.width() + idx.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let text = pad_to_width(&truncate_to_width(&text, available), available);

        let text = if task.is_done {
            text.dimmed().to_string()
        } else {
            text
        };
        let _ = writeln!(
            out,
            "{}{}{}{}",
            prefix.green(),
            idx,
            text,
            format_time_ago(task.created_at).dimmed()
        );
    }
    out
}

pub(super) fn render_config(config: &RolodexConfig) -> String {
    let mut out = String::new();
    for key in KEYS {
        if let Some(value) = config.get(key) {
            let _ = writeln!(out, "{} = {}", key, value);
        }
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
