// Error taxonomy for task construction, selection and persistence.
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by task operations.
///
/// Every variant is recoverable: the menu reports it and keeps running.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Due-date text is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date format '{0}'. Use YYYY-MM-DD.")]
    InvalidDateFormat(String),

    #[error("Title cannot be empty.")]
    EmptyTitle,

    /// Menu, task type or priority choice outside the valid set
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Index text that is not an integer
    #[error("Invalid index '{0}': expected a whole number.")]
    InvalidInput(String),

    #[error("Index {index} is out of range (0..{len}).")]
    IndexOutOfRange { index: i64, len: usize },

    /// The pending list was computed before the store was replaced
    #[error("The task list changed since it was displayed. List the tasks again.")]
    StaleListing,

    #[error("File {} does not exist.", .0.display())]
    FileNotFound(PathBuf),

    #[error("The task file is corrupt: {0}")]
    MalformedData(String),

    #[error("Task record #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type TaskResult<T> = Result<T, TaskError>;
