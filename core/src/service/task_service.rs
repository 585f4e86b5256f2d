use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{InputError, PersistenceError, Result};
use crate::input::{parse_command, Command};
use crate::model::task::Task;
use crate::repository::{SkippedLine, TaskRepository};
use crate::service::task_list::TaskList;
use crate::time::DateTimeResolver;

/// A task together with the 1-based number the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedTask {
    pub number: usize,
    pub task: Task,
}

/// What a command did, for the caller to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exit,
    Listed(Vec<NumberedTask>),
    Found(Vec<NumberedTask>),
    Scheduled {
        date: NaiveDate,
        tasks: Vec<NumberedTask>,
    },
    Added {
        task: Task,
        count: usize,
    },
    Deleted {
        task: Task,
        count: usize,
    },
    Marked(Task),
    Unmarked(Task),
}

impl Outcome {
    pub fn is_exit(&self) -> bool {
        matches!(self, Outcome::Exit)
    }
}

/// How the initial load went.
#[derive(Debug, Default)]
pub struct Startup {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
    /// Set when the store could not be read at all; the session then starts
    /// empty.
    pub load_error: Option<PersistenceError>,
}

pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
    resolver: DateTimeResolver,
}

impl<R: TaskRepository> TaskService<R> {
    /// Loads the repository into memory. A failed load never aborts: the
    /// service starts with an empty list and the error is returned in
    /// [`Startup`].
    pub fn open(repo: R, resolver: DateTimeResolver) -> (Self, Startup) {
        let (tasks, startup) = match repo.load() {
            Ok(report) => {
                info!(
                    loaded = report.tasks.len(),
                    skipped = report.skipped.len(),
                    "task list loaded"
                );
                let startup = Startup {
                    loaded: report.tasks.len(),
                    skipped: report.skipped,
                    load_error: None,
                };
                (TaskList::from_tasks(report.tasks), startup)
            }
            Err(e) => {
                warn!(error = %e, "could not load tasks, starting with an empty list");
                let startup = Startup {
                    load_error: Some(e),
                    ..Startup::default()
                };
                (TaskList::new(), startup)
            }
        };

        (
            Self {
                repo,
                tasks,
                resolver,
            },
            startup,
        )
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Parses and applies one input line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let command = parse_command(line, &self.resolver)?;
        self.apply(command)
    }

    /// Applies a parsed command. Mutations are persisted immediately; if the
    /// save fails the in-memory change is kept and the error is returned.
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Exit => Ok(Outcome::Exit),
            Command::List => {
                let indices = (0..self.tasks.len()).collect();
                Ok(Outcome::Listed(self.numbered(indices)))
            }
            Command::Find(keyword) => {
                let indices = self.tasks.find_indices(&keyword);
                Ok(Outcome::Found(self.numbered(indices)))
            }
            Command::Schedule(date) => {
                let indices = self.tasks.schedule_indices(date);
                Ok(Outcome::Scheduled {
                    date,
                    tasks: self.numbered(indices),
                })
            }
            Command::Add(task) => {
                self.tasks.add(task.clone());
                self.persist()?;
                Ok(Outcome::Added {
                    task,
                    count: self.tasks.len(),
                })
            }
            Command::Delete(number) => {
                self.ensure_not_empty("delete")?;
                let index = self.index_of(number)?;
                let task = self.tasks.delete(index)?;
                self.persist()?;
                Ok(Outcome::Deleted {
                    task,
                    count: self.tasks.len(),
                })
            }
            Command::Mark(number) => {
                self.ensure_not_empty("mark")?;
                let index = self.index_of(number)?;
                let task = self.tasks.get_mut(index)?;
                task.mark_done();
                let task = task.clone();
                self.persist()?;
                Ok(Outcome::Marked(task))
            }
            Command::Unmark(number) => {
                self.ensure_not_empty("unmark")?;
                let index = self.index_of(number)?;
                let task = self.tasks.get_mut(index)?;
                task.mark_undone();
                let task = task.clone();
                self.persist()?;
                Ok(Outcome::Unmarked(task))
            }
        }
    }

    fn ensure_not_empty(&self, action: &'static str) -> Result<(), InputError> {
        if self.tasks.is_empty() {
            return Err(InputError::NoTasks(action));
        }
        Ok(())
    }

    fn index_of(&self, number: usize) -> Result<usize, InputError> {
        number.checked_sub(1).ok_or(InputError::IndexOutOfRange {
            index: 0,
            size: self.tasks.len(),
        })
    }

    fn numbered(&self, indices: Vec<usize>) -> Vec<NumberedTask> {
        indices
            .into_iter()
            .filter_map(|i| {
                self.tasks.get(i).ok().map(|task| NumberedTask {
                    number: i + 1,
                    task: task.clone(),
                })
            })
            .collect()
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        self.repo.save(self.tasks.as_slice())
    }
}
