use std::path::PathBuf;

use thiserror::Error;

const DEADLINE_USAGE: &str = "Format: deadline <description> /by <date-time>\n\
Date-time examples: 2019-12-02 1800, 2019-12-02, 1800, Dec 02 2019, 6:00 PM";
const EVENT_USAGE: &str = "Format: event <description> /from <start> /to <end>\n\
Date-time examples: 2019-12-02 1800, 2019-12-02, 1800, Dec 02 2019, 6:00 PM";
const SCHEDULE_USAGE: &str = "Format: schedule yyyy-MM-dd (e.g., schedule 2019-12-02)";

/// Usage hint shown alongside format errors for the given command keyword.
pub fn usage_for(command: &str) -> &'static str {
    match command {
        "deadline" => DEADLINE_USAGE,
        "event" => EVENT_USAGE,
        "schedule" => SCHEDULE_USAGE,
        _ => "",
    }
}

/// Errors caused by what the user typed. Always recoverable; the display
/// string is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a command!")]
    EmptyCommand,
    #[error("I'm sorry, but I don't know what '{0}' means :-(")]
    UnknownCommand(String),
    #[error("The {0} description cannot be empty!")]
    EmptyDescription(&'static str),
    #[error("The {command} {field} cannot be empty!")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },
    #[error("Invalid {command} format! Missing '{separator}'.\n{}", usage_for(.command))]
    MissingSeparator {
        command: &'static str,
        separator: &'static str,
    },
    #[error("Please specify a task number to {0}")]
    MissingIndex(&'static str),
    #[error("Please enter a valid number after '{0}'")]
    InvalidIndex(&'static str),
    #[error("Please specify a keyword to search for")]
    MissingKeyword,
    #[error("Please specify a date to check the schedule\n{}", usage_for("schedule"))]
    MissingDate,
    #[error("Invalid date format '{0}'! Please use yyyy-MM-dd (e.g., 2019-12-02)")]
    InvalidDate(String),
    #[error("No tasks available to {0}! Add some tasks first.")]
    NoTasks(&'static str),
    #[error("Invalid task number! Please select between 1 and {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// I/O failures while reading or writing the data file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Could not determine home directory")]
    NoHomeDir,
    #[error("Could not create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error reading tasks from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error saving tasks to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single persisted line could not be decoded. Never fatal to a load.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorruptRecord {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),
    #[error("unknown task type '{0}'")]
    UnknownTag(String),
    #[error("task type '{tag}' does not take {found} fields")]
    FieldCount { tag: char, found: usize },
    #[error("done flag must be 0 or 1, found '{0}'")]
    InvalidDoneFlag(String),
    #[error("time flag must be 0 or 1, found '{0}'")]
    InvalidTimeFlag(String),
    #[error("description is empty")]
    EmptyDescription,
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
