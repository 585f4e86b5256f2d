mod repl;
mod table;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use taskline_core::service::dto::to_json;
use taskline_core::{DateTimeResolver, FileTaskRepository, TaskService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskline")]
#[command(about = "A line-command task tracker", long_about = None)]
struct Cli {
    /// Data file (defaults to ~/.taskline/tasks.txt)
    #[arg(long, global = true, env = "TASKLINE_DATA")]
    data: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Interactive session (default): todo, deadline, event, list, mark, unmark, delete, find, schedule, bye
    Repl,
    /// Print all tasks as a table
    List,
    /// Print all tasks as JSON
    Export,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    let repo = FileTaskRepository::new(cli.data.clone()).context("Failed to open data file")?;
    let data_path = repo.path().to_path_buf();
    let (mut service, startup) = TaskService::open(repo, DateTimeResolver::new());

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            repl::run(&mut service, &startup, stdin.lock(), &mut stdout)?;
        }
        Commands::List => {
            if let Some(e) = startup.load_error {
                return Err(e).with_context(|| format!("Could not read {}", data_path.display()));
            }
            table::show_tasks(service.tasks().as_slice());
        }
        Commands::Export => {
            if let Some(e) = startup.load_error {
                return Err(e).with_context(|| format!("Could not read {}", data_path.display()));
            }
            println!("{}", to_json(service.tasks().as_slice())?);
        }
    }
    Ok(())
}

fn install_tracing(verbose: bool) {
    // RUST_LOG wins; otherwise warnings only, or debug with -v.
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
