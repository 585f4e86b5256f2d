pub mod error;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;

pub use error::{CorruptRecord, Error, InputError, PersistenceError};
pub use model::task::{Due, EventSpan, Task, TaskKind};
pub use repository::{FileTaskRepository, LoadReport, SkippedLine, TaskRepository};
pub use input::{parse_command, Command};
pub use time::{DateTimeResolver, Resolution};
pub use service::task_list::TaskList;
pub use service::task_service::{NumberedTask, Outcome, Startup, TaskService};
pub use service::dto::TaskDto;
