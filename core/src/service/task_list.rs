use chrono::NaiveDate;

use crate::error::InputError;
use crate::model::task::Task;

/// Ordered, contiguous list of tasks. Indices here are 0-based; callers
/// translate from the 1-based numbers users type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task, InputError> {
        let size = self.tasks.len();
        self.tasks
            .get(index)
            .ok_or(InputError::IndexOutOfRange { index, size })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task, InputError> {
        let size = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(InputError::IndexOutOfRange { index, size })
    }

    pub fn delete(&mut self, index: usize) -> Result<Task, InputError> {
        if index >= self.tasks.len() {
            return Err(InputError::IndexOutOfRange {
                index,
                size: self.tasks.len(),
            });
        }
        Ok(self.tasks.remove(index))
    }

    /// Indices whose rendered line contains `keyword`, ignoring case.
    pub fn find_indices(&self, keyword: &str) -> Vec<usize> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.to_string().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn schedule_indices(&self, date: NaiveDate) -> Vec<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.is_scheduled_on(date))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }
}
