use chrono::NaiveDate;

use crate::error::InputError;
use crate::model::task::Task;
use crate::time::{parse_schedule_date, DateTimeResolver};

/// One parsed input line. Task numbers are kept 1-based as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Find(String),
    Schedule(NaiveDate),
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Add(Task),
}

impl Command {
    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Exit)
    }
}

pub fn parse_command(line: &str, resolver: &DateTimeResolver) -> Result<Command, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyCommand);
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    match keyword.to_lowercase().as_str() {
        "bye" => Ok(Command::Exit),
        "list" => Ok(Command::List),
        "find" => {
            if rest.is_empty() {
                return Err(InputError::MissingKeyword);
            }
            Ok(Command::Find(rest.to_string()))
        }
        "schedule" => Ok(Command::Schedule(parse_schedule_date(rest)?)),
        "mark" => Ok(Command::Mark(parse_task_number(rest, "mark")?)),
        "unmark" => Ok(Command::Unmark(parse_task_number(rest, "unmark")?)),
        "delete" => Ok(Command::Delete(parse_task_number(rest, "delete")?)),
        "todo" => {
            if rest.is_empty() {
                return Err(InputError::EmptyDescription("todo"));
            }
            Ok(Command::Add(Task::todo(rest)))
        }
        "deadline" => parse_deadline(rest, resolver).map(Command::Add),
        "event" => parse_event(rest, resolver).map(Command::Add),
        _ => Err(InputError::UnknownCommand(keyword.to_string())),
    }
}

fn parse_task_number(arg: &str, command: &'static str) -> Result<usize, InputError> {
    if arg.is_empty() {
        return Err(InputError::MissingIndex(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(InputError::InvalidIndex(command)),
    }
}

fn parse_deadline(rest: &str, resolver: &DateTimeResolver) -> Result<Task, InputError> {
    if rest.is_empty() {
        return Err(InputError::EmptyDescription("deadline"));
    }
    let (description, by) = split_on_flag(rest, "/by").ok_or(InputError::MissingSeparator {
        command: "deadline",
        separator: "/by",
    })?;

    if description.is_empty() {
        return Err(InputError::EmptyDescription("deadline"));
    }
    if by.is_empty() {
        return Err(InputError::MissingField {
            command: "deadline",
            field: "time",
        });
    }
    Ok(Task::deadline(description, by, resolver))
}

fn parse_event(rest: &str, resolver: &DateTimeResolver) -> Result<Task, InputError> {
    if rest.is_empty() {
        return Err(InputError::EmptyDescription("event"));
    }
    let (description, range) = split_on_flag(rest, "/from").ok_or(InputError::MissingSeparator {
        command: "event",
        separator: "/from",
    })?;
    let (from, to) = split_on_flag(range, "/to").ok_or(InputError::MissingSeparator {
        command: "event",
        separator: "/to",
    })?;

    if description.is_empty() {
        return Err(InputError::EmptyDescription("event"));
    }
    if from.is_empty() {
        return Err(InputError::MissingField {
            command: "event",
            field: "start time",
        });
    }
    if to.is_empty() {
        return Err(InputError::MissingField {
            command: "event",
            field: "end time",
        });
    }
    Ok(Task::event(description, from, to, resolver))
}

/// Splits at the first standalone occurrence of `flag` (whitespace or the
/// string boundary on both sides). Both halves come back trimmed.
fn split_on_flag<'a>(text: &'a str, flag: &str) -> Option<(&'a str, &'a str)> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(flag) {
        let start = search_from + offset;
        let end = start + flag.len();

        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let after_ok = text[end..].chars().next().map_or(true, char::is_whitespace);

        if before_ok && after_ok {
            return Some((text[..start].trim(), text[end..].trim()));
        }
        search_from = end;
    }
    None
}
