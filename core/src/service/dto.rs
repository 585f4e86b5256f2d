use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use crate::model::task::{Task, TaskKind};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Todo,
    Deadline,
    Event,
}

/// Flat, serializable view of a task for exports and tables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDto {
    pub number: usize,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub description: String,
    pub done: bool,

    // Raw text as typed; resolved values are absent when the text was opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDateTime>,
    pub has_clock_time: bool,

    // Rendered forms, ready for tables.
    pub when: String,
    pub display: String,
}

impl TaskDto {
    pub fn from_entity(number: usize, task: &Task) -> Self {
        let mut dto = Self {
            number,
            task_type: TaskType::Todo,
            description: task.description.clone(),
            done: task.done,
            due_raw: None,
            due: None,
            from_raw: None,
            from: None,
            to_raw: None,
            to: None,
            has_clock_time: false,
            when: task.when().unwrap_or_default(),
            display: task.to_string(),
        };

        match &task.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline(due) => {
                dto.task_type = TaskType::Deadline;
                dto.due_raw = Some(due.raw.clone());
                dto.due = due.resolved;
                dto.has_clock_time = due.has_clock_time;
            }
            TaskKind::Event(span) => {
                dto.task_type = TaskType::Event;
                dto.from_raw = Some(span.from_raw.clone());
                dto.from = span.from;
                dto.to_raw = Some(span.to_raw.clone());
                dto.to = span.to;
                dto.has_clock_time = span.has_clock_time;
            }
        }
        dto
    }
}

/// Numbers tasks from 1 in list order.
pub fn to_dtos(tasks: &[Task]) -> Vec<TaskDto> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| TaskDto::from_entity(i + 1, t))
        .collect()
}

pub fn to_json(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_dtos(tasks))
}
