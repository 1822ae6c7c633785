// File: ./src/model/item.rs
use crate::error::{TaskError, TaskResult};
use crate::model::{Priority, TaskKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a due date in strict `YYYY-MM-DD` form.
///
/// chrono alone accepts unpadded fields like `2025-1-5`, so the 4-2-2 digit
/// shape is checked before handing the text to it.
pub fn parse_due_date(input: &str) -> TaskResult<NaiveDate> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(TaskError::InvalidDateFormat(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| TaskError::InvalidDateFormat(input.to_string()))
}

/// One academic task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    title: String,
    description: String,
    due_date: NaiveDate,
    priority: Priority,
    completed: bool,
    kind: TaskKind,
}

impl Task {
    pub fn new(
        title: &str,
        description: &str,
        due_date: &str,
        priority: Priority,
        kind: TaskKind,
    ) -> TaskResult<Self> {
        if title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        let due_date = parse_due_date(due_date)?;
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            priority,
            completed: false,
            kind,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn priority(&self) -> &Priority {
        &self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn due_date_string(&self) -> String {
        self.due_date.format(DATE_FORMAT).to_string()
    }

    /// Reminder line whose wording depends on the task kind.
    pub fn notify(&self) -> String {
        self.kind.notification(&self.title, &self.due_date_string())
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            kind: self.kind.tag().to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date_string(),
            priority: self.priority.label().to_string(),
            completed: self.completed,
        }
    }

    /// Rebuilds a task from its record, keeping the stored completion flag.
    pub fn from_record(record: TaskRecord) -> TaskResult<Self> {
        let mut task = Task::new(
            &record.title,
            &record.description,
            &record.due_date,
            Priority::parse(&record.priority),
            TaskKind::from_tag(&record.kind),
        )?;
        task.set_completed(record.completed);
        Ok(task)
    }
}

/// On-disk shape of a task.
///
/// The Spanish aliases let files written by the first version of the tracker
/// load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "type", alias = "tipo")]
    pub kind: String,
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(alias = "descripcion")]
    pub description: String,
    #[serde(alias = "fecha_limite")]
    pub due_date: String,
    #[serde(alias = "prioridad")]
    pub priority: String,
    #[serde(alias = "completada")]
    pub completed: bool,
}
