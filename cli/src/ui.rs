use std::io::{self, Write};

use taskline_core::time::DATE_DISPLAY;
use taskline_core::{NumberedTask, Outcome, Startup};

pub const HORIZONTAL_LINE: &str = "____________________________________________________________";

/// Reply lines for a finished command, without the trailing separator.
pub fn render_outcome(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Exit => vec![" Bye. Hope to see you again soon!".to_string()],
        Outcome::Listed(tasks) => {
            numbered_block(" Here are the tasks in your list:", " No tasks added yet!", tasks)
        }
        Outcome::Found(tasks) => numbered_block(
            " Here are the matching tasks in your list:",
            " No matching tasks found!",
            tasks,
        ),
        Outcome::Scheduled { date, tasks } => {
            let day = date.format(DATE_DISPLAY);
            numbered_block(
                &format!(" Here are the tasks scheduled for {}:", day),
                &format!(" No tasks scheduled for {}!", day),
                tasks,
            )
        }
        Outcome::Added { task, count } => vec![
            " Got it. I've added this task:".to_string(),
            format!("   {}", task),
            count_line(*count),
        ],
        Outcome::Deleted { task, count } => vec![
            " Noted. I've removed this task:".to_string(),
            format!("   {}", task),
            count_line(*count),
        ],
        Outcome::Marked(task) => vec![
            " Nice! I've marked this task as done:".to_string(),
            format!("   {}", task),
        ],
        Outcome::Unmarked(task) => vec![
            " OK, I've marked this task as unfinished:".to_string(),
            format!("   {}", task),
        ],
    }
}

pub fn render_error(message: &str) -> Vec<String> {
    message
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!(" Error: {}", line)
            } else {
                format!(" {}", line)
            }
        })
        .collect()
}

pub fn render_welcome(startup: &Startup) -> Vec<String> {
    let mut lines = vec![
        " Hello! I'm taskline".to_string(),
        " What can I do for you?".to_string(),
    ];
    if startup.load_error.is_some() {
        lines.push(" Error loading tasks from file. Starting with an empty task list.".to_string());
    } else if startup.loaded > 0 {
        lines.push(format!(" Loaded {} task(s) from file.", startup.loaded));
    }
    if !startup.skipped.is_empty() {
        lines.push(format!(
            " Warning: skipped {} corrupted line(s) in the data file.",
            startup.skipped.len()
        ));
    }
    lines
}

/// Writes `lines` followed by the separator.
pub fn print_block<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{}", HORIZONTAL_LINE)?;
    out.flush()
}

fn numbered_block(header: &str, empty: &str, tasks: &[NumberedTask]) -> Vec<String> {
    if tasks.is_empty() {
        return vec![empty.to_string()];
    }
    let mut lines = vec![header.to_string()];
    lines.extend(
        tasks
            .iter()
            .map(|entry| format!(" {}.{}", entry.number, entry.task)),
    );
    lines
}

fn count_line(count: usize) -> String {
    format!(" Now you have {} tasks in the list.", count)
}
