use crate::error::{CorruptRecord, PersistenceError};
use crate::model::task::Task;

/// A persisted line that could not be decoded and was left out of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
    pub reason: CorruptRecord,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedLine>,
}

pub trait TaskRepository {
    /// Reads every decodable task. A missing store yields an empty report.
    fn load(&self) -> Result<LoadReport, PersistenceError>;
    /// Replaces the stored snapshot with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError>;
}
