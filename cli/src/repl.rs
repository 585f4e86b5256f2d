use std::io::{BufRead, Write};

use anyhow::Result;
use taskline_core::{Startup, TaskRepository, TaskService};

use crate::ui;

/// Reads commands line by line until `bye` or end of input.
pub fn run<R, I, W>(
    service: &mut TaskService<R>,
    startup: &Startup,
    input: I,
    out: &mut W,
) -> Result<()>
where
    R: TaskRepository,
    I: BufRead,
    W: Write,
{
    ui::print_block(out, &ui::render_welcome(startup))?;

    // Split on bytes so a non-UTF-8 line cannot end the session.
    for bytes in input.split(b'\n') {
        let bytes = bytes?;
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end_matches('\r');
        let (lines, exit) = match service.execute(line) {
            Ok(outcome) => (ui::render_outcome(&outcome), outcome.is_exit()),
            Err(e) => (ui::render_error(&e.to_string()), false),
        };
        ui::print_block(out, &lines)?;
        if exit {
            break;
        }
    }
    Ok(())
}
